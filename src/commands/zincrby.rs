use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::format_score;
use crate::sorted_set::{SortedSet, ZAddFlags};

/// Adds `increment` to the score of `member`, a missing member counting as 0. Returns the new
/// score, or `None` when `flags` forbid the change.
pub(crate) fn increment_member(
    zset: &mut SortedSet,
    member: Bytes,
    increment: f64,
    flags: &ZAddFlags,
) -> Result<Option<f64>, CommandError> {
    let current = zset.score(&member);
    let score = current.map_or(increment, |current| current + increment);
    if score.is_nan() {
        return Err(CommandError::ScoreIsNaN);
    }
    if !flags.allows(current, score) {
        return Ok(None);
    }
    zset.insert(member, score);
    Ok(Some(score))
}

/// Increments the score of `member` in the sorted set stored at `key` by `increment`.
///
/// Ref: <https://redis.io/docs/latest/commands/zincrby/>
#[derive(Debug, PartialEq)]
pub struct Zincrby {
    pub key: Bytes,
    pub increment: f64,
    pub member: Bytes,
}

impl Executable for Zincrby {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let zset = key.zset_mut()?;
        let score = increment_member(zset, self.member, self.increment, &ZAddFlags::default())?
            .unwrap_or(self.increment);
        key.updated();
        Ok(Frame::Bulk(format_score(score)))
    }
}

impl TryFrom<&mut CommandParser> for Zincrby {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let increment = parser.next_float()?;
        let member = parser.next_bytes()?;
        Ok(Self {
            key,
            increment,
            member,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn increments_scores() {
        let cmd = Command::try_from(frame(&["ZINCRBY", "z", "1.5", "m"])).unwrap();
        assert_eq!(
            cmd,
            Command::Zincrby(Zincrby {
                key: Bytes::from("z"),
                increment: 1.5,
                member: Bytes::from("m"),
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.exec(cmd).unwrap(), bulk("1.5"));
        assert_eq!(harness.run(&["ZINCRBY", "z", "-0.5", "m"]), bulk("1"));
    }

    #[test]
    fn nan_result() {
        let mut harness = Harness::new();
        harness.run(&["ZADD", "z", "inf", "m"]);
        assert_eq!(
            harness.run(&["ZINCRBY", "z", "-inf", "m"]),
            Frame::Error("ERR resulting score is not a number (NaN)".to_string())
        );
        assert_eq!(harness.run(&["ZSCORE", "z", "m"]), bulk("inf"));
    }
}
