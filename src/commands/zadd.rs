use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zincrby::increment_member;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{format_score, parse_float};
use crate::sorted_set::ZAddFlags;

/// Adds all the specified members with the specified scores to the sorted set stored at `key`.
///
/// `NX`/`XX`/`GT`/`LT` restrict which members may change, `CH` counts updated members along
/// with added ones, and `INCR` turns the call into ZINCRBY for a single pair, replying with the
/// new score or a null when the flags blocked it.
///
/// Ref: <https://redis.io/docs/latest/commands/zadd/>
#[derive(Debug, PartialEq)]
pub struct Zadd {
    pub key: Bytes,
    pub flags: ZAddFlags,
    pub ch: bool,
    pub incr: bool,
    pub members: Vec<(f64, Bytes)>,
}

impl Executable for Zadd {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let zset = key.zset_mut()?;

        if self.incr {
            // Parsing guarantees exactly one pair.
            let Some((increment, member)) = self.members.into_iter().next() else {
                return Err(CommandError::ZaddIncrPair);
            };
            let score = increment_member(zset, member, increment, &self.flags)?;
            if score.is_some() {
                key.updated();
            }
            return Ok(score.map_or(Frame::Null, |score| Frame::Bulk(format_score(score))));
        }

        let mut added = 0;
        let mut updated = 0;
        for (score, member) in self.members {
            let result = zset.add_with_flags(member, score, &self.flags);
            added += i64::from(result.added);
            updated += i64::from(result.updated);
        }
        if added + updated > 0 {
            key.updated();
        }

        Ok(Frame::Integer(if self.ch { added + updated } else { added }))
    }
}

impl TryFrom<&mut CommandParser> for Zadd {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let args = parser.rest()?;

        let mut flags = ZAddFlags::default();
        let mut ch = false;
        let mut incr = false;
        let mut i = 0;
        while let Some(arg) = args.get(i) {
            match String::from_utf8_lossy(arg).to_uppercase().as_str() {
                "NX" => flags.nx = true,
                "XX" => flags.xx = true,
                "GT" => flags.gt = true,
                "LT" => flags.lt = true,
                "CH" => ch = true,
                "INCR" => incr = true,
                _ => break,
            }
            i += 1;
        }

        if flags.nx && flags.xx {
            return Err(CommandError::ZaddNxXx);
        }
        if [flags.nx, flags.gt, flags.lt].iter().filter(|set| **set).count() > 1 {
            return Err(CommandError::ZaddNxGtLt);
        }

        let elements = &args[i..];
        if elements.is_empty() || elements.len() % 2 != 0 {
            return Err(CommandError::Syntax);
        }
        if incr && elements.len() != 2 {
            return Err(CommandError::ZaddIncrPair);
        }

        let members = elements
            .chunks(2)
            .map(|pair| {
                let score = parse_float(&pair[0]).ok_or(CommandError::NotFloat)?;
                Ok((score, pair[1].clone()))
            })
            .collect::<Result<Vec<_>, CommandError>>()?;

        Ok(Self {
            key,
            flags,
            ch,
            incr,
            members,
        })
    }
}
