use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrange::RangeBy;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Removes the members of a sorted set whose rank falls in `start..=stop`.
///
/// Ref: <https://redis.io/docs/latest/commands/zremrangebyrank/>
#[derive(Debug, PartialEq)]
pub struct Zremrangebyrank {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
}

/// Removes every member `by` selects, replying with how many went.
pub(crate) fn remove_range(
    ctx: &mut Context<'_>,
    key: Bytes,
    by: &RangeBy,
) -> Result<Frame, CommandError> {
    let mut key = ctx.db().key(key);
    if key.zset()?.is_none() {
        return Ok(Frame::Integer(0));
    }

    let zset = key.zset_mut()?;
    let range = by.ranks(zset, false);
    let removed = zset.remove_range(range);
    if removed > 0 {
        key.updated();
    }
    Ok(Frame::Integer(removed as i64))
}

impl Executable for Zremrangebyrank {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        remove_range(ctx, self.key, &RangeBy::Rank(self.start, self.stop))
    }
}

impl TryFrom<&mut CommandParser> for Zremrangebyrank {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;
        Ok(Self { key, start, stop })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn removes_by_rank() {
        let cmd = Command::try_from(frame(&["ZREMRANGEBYRANK", "z", "0", "-2"])).unwrap();
        assert_eq!(
            cmd,
            Command::Zremrangebyrank(Zremrangebyrank {
                key: Bytes::from("z"),
                start: 0,
                stop: -2,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["ZADD", "z", "1", "a", "2", "b", "3", "c"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(2));
        assert_eq!(harness.run(&["ZRANGE", "z", "0", "-1"]), bulks(&["c"]));
        assert_eq!(harness.run(&["ZREMRANGEBYRANK", "missing", "0", "-1"]), Frame::Integer(0));
    }
}
