use bytes::Bytes;
use rand::seq::SliceRandom;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Removes and returns one or more random members from the set value stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/spop/>
#[derive(Debug, PartialEq)]
pub struct Spop {
    pub key: Bytes,
    pub count: Option<usize>,
}

impl Executable for Spop {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let state = &mut *ctx.state;
        let mut key = state.dbs[ctx.session.db].key(self.key);
        let members: Vec<Bytes> = match key.set()? {
            Some(set) => set.iter().cloned().collect(),
            None => Vec::new(),
        };

        let take = self.count.unwrap_or(1);
        let chosen: Vec<Bytes> = members
            .choose_multiple(&mut state.rng, take)
            .cloned()
            .collect();
        if !chosen.is_empty() {
            let set = key.set_mut()?;
            for member in &chosen {
                set.remove(member);
            }
            key.updated();
        }

        match self.count {
            Some(_) => Ok(Frame::array_of_bulks(chosen)),
            None => Ok(Frame::bulk_or_null(chosen.into_iter().next())),
        }
    }
}

impl TryFrom<&mut CommandParser> for Spop {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let count = if parser.has_next() {
            let count = parser.next_integer()?;
            if count < 0 {
                return Err(CommandError::NotPositive);
            }
            Some(count as usize)
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

    #[test]
    fn pops_a_single_member() {
        let cmd = Command::try_from(frame(&["SPOP", "s"])).unwrap();
        assert_eq!(
            cmd,
            Command::Spop(Spop {
                key: Bytes::from("s"),
                count: None,
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.run(&["SPOP", "s"]), Frame::Null);
        harness.run(&["SADD", "s", "only"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Bulk(Bytes::from("only")));
        assert_eq!(harness.run(&["EXISTS", "s"]), Frame::Integer(0));
    }

    #[test]
    fn pops_with_a_count() {
        let mut harness = Harness::new();
        harness.run(&["SADD", "s", "a", "b", "c"]);
        let Frame::Array(popped) = harness.run(&["SPOP", "s", "2"]) else {
            panic!("expected an array");
        };
        assert_eq!(popped.len(), 2);
        assert_eq!(harness.run(&["SCARD", "s"]), Frame::Integer(1));
        for frame in popped {
            let Frame::Bulk(member) = frame else {
                panic!("expected a bulk");
            };
            assert_eq!(
                harness.run(&["SISMEMBER", "s", std::str::from_utf8(&member).unwrap()]),
                Frame::Integer(0)
            );
        }
        assert_eq!(
            harness.run(&["SPOP", "s", "-1"]),
            CommandError::NotPositive.into()
        );
    }
}
