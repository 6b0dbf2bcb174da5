use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrange::scored_reply;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// ZPOPMIN and ZPOPMAX: removes and returns up to `count` members with the lowest or highest
/// scores, as a flat member/score list.
///
/// Ref: <https://redis.io/docs/latest/commands/zpopmin/>
#[derive(Debug, PartialEq)]
pub struct Zpop {
    pub key: Bytes,
    pub count: usize,
    pub max: bool,
}

impl Executable for Zpop {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.zset()?.is_none() {
            return Ok(Frame::Array(Vec::new()));
        }

        let popped = key.zset_mut()?.pop(self.count, self.max);
        if !popped.is_empty() {
            key.updated();
        }
        Ok(scored_reply(popped, true))
    }
}

impl TryFrom<&mut CommandParser> for Zpop {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let max = parser.name() == "zpopmax";
        let key = parser.next_bytes()?;
        let count = if parser.has_next() {
            let count = parser.next_integer()?;
            if count < 0 {
                return Err(CommandError::NotPositive);
            }
            count as usize
        } else {
            1
        };
        parser.finish()?;
        Ok(Self { key, count, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn pops_from_either_end() {
        let cmd = Command::try_from(frame(&["ZPOPMAX", "z", "2"])).unwrap();
        assert_eq!(
            cmd,
            Command::Zpop(Zpop {
                key: Bytes::from("z"),
                count: 2,
                max: true,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["ZADD", "z", "1", "a", "2", "b", "3", "c"]);
        assert_eq!(harness.exec(cmd).unwrap(), bulks(&["c", "3", "b", "2"]));
        assert_eq!(harness.run(&["ZPOPMIN", "z"]), bulks(&["a", "1"]));
        assert_eq!(harness.run(&["ZPOPMIN", "z"]), bulks(&[]));
    }
}
