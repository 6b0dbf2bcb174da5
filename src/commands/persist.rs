use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Remove the existing timeout on `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/persist/>
#[derive(Debug, PartialEq)]
pub struct Persist {
    pub key: Bytes,
}

impl Executable for Persist {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if !key.exists() || key.expire_at().is_none() {
            return Ok(Frame::Integer(0));
        }
        key.set_expire_at(None);
        Ok(Frame::Integer(1))
    }
}

impl TryFrom<&mut CommandParser> for Persist {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn removes_the_expiry() {
        let cmd = Command::try_from(frame(&["PERSIST", "mykey"])).unwrap();
        assert_eq!(
            cmd,
            Command::Persist(Persist {
                key: Bytes::from("mykey")
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", "Hello", "EX", "10"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.run(&["TTL", "mykey"]), Frame::Integer(-1));
        assert_eq!(harness.run(&["PERSIST", "mykey"]), Frame::Integer(0));
        assert_eq!(harness.run(&["PERSIST", "missing"]), Frame::Integer(0));
    }
}
