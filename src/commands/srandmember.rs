use bytes::Bytes;
use rand::seq::SliceRandom;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns random members of the set stored at `key` without removing them. A positive count
/// returns distinct members; a negative one returns `-count` members that may repeat.
///
/// Ref: <https://redis.io/docs/latest/commands/srandmember/>
#[derive(Debug, PartialEq)]
pub struct Srandmember {
    pub key: Bytes,
    pub count: Option<i64>,
}

impl Executable for Srandmember {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let state = &mut *ctx.state;
        let key = state.dbs[ctx.session.db].key(self.key);
        let members: Vec<&Bytes> = match key.set()? {
            Some(set) => set.iter().collect(),
            None => Vec::new(),
        };
        let rng = &mut state.rng;

        let frame = match self.count {
            None => Frame::bulk_or_null(members.choose(rng).map(|m| (*m).clone())),
            Some(count) if count >= 0 => Frame::array_of_bulks(
                members
                    .choose_multiple(rng, count as usize)
                    .map(|m| (*m).clone())
                    .collect::<Vec<_>>(),
            ),
            Some(count) => {
                let picks: Vec<Bytes> = if members.is_empty() {
                    Vec::new()
                } else {
                    (0..count.unsigned_abs())
                        .filter_map(|_| members.choose(rng).map(|m| (*m).clone()))
                        .collect()
                };
                Frame::array_of_bulks(picks)
            }
        };
        Ok(frame)
    }
}

impl TryFrom<&mut CommandParser> for Srandmember {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let count = if parser.has_next() {
            Some(parser.next_integer()?)
        } else {
            None
        };
        parser.finish()?;
        Ok(Self { key, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    fn array_len(frame: Frame) -> usize {
        match frame {
            Frame::Array(items) => items.len(),
            other => panic!("expected an array, got {:?}", other),
        }
    }

    #[test]
    fn distinct_members() {
        let cmd = Command::try_from(frame(&["SRANDMEMBER", "s", "5"])).unwrap();
        assert_eq!(
            cmd,
            Command::Srandmember(Srandmember {
                key: Bytes::from("s"),
                count: Some(5),
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SADD", "s", "a", "b", "c"]);
        assert_eq!(array_len(harness.exec(cmd).unwrap()), 3);
        assert_eq!(harness.run(&["SCARD", "s"]), Frame::Integer(3));
    }

    #[test]
    fn negative_count_repeats() {
        let mut harness = Harness::new();
        harness.run(&["SADD", "s", "a"]);
        assert_eq!(
            harness.run(&["SRANDMEMBER", "s", "-3"]),
            Frame::Array(vec![Frame::Bulk(Bytes::from("a")); 3])
        );
        assert_eq!(harness.run(&["SRANDMEMBER", "s"]), Frame::Bulk(Bytes::from("a")));
        assert_eq!(harness.run(&["SRANDMEMBER", "missing"]), Frame::Null);
        assert_eq!(array_len(harness.run(&["SRANDMEMBER", "missing", "-2"])), 0);
    }
}
