use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Removes the specified members from the sorted set stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/zrem/>
#[derive(Debug, PartialEq)]
pub struct Zrem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Zrem {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.zset()?.is_none() {
            return Ok(Frame::Integer(0));
        }

        let zset = key.zset_mut()?;
        let removed = self.members.iter().filter(|member| zset.remove(member)).count();
        if removed > 0 {
            key.updated();
        }
        Ok(Frame::Integer(removed as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zrem {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let members = parser.rest()?;
        Ok(Self { key, members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn removes_members() {
        let cmd = Command::try_from(frame(&["ZREM", "z", "a", "x"])).unwrap();
        assert_eq!(
            cmd,
            Command::Zrem(Zrem {
                key: Bytes::from("z"),
                members: vec![Bytes::from("a"), Bytes::from("x")],
            })
        );

        let mut harness = Harness::new();
        harness.run(&["ZADD", "z", "1", "a", "2", "b"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.run(&["ZREM", "z", "b"]), Frame::Integer(1));
        assert_eq!(harness.run(&["EXISTS", "z"]), Frame::Integer(0));
    }
}
