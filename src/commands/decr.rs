use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::incrby::incr_by;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Decrements the number stored at `key` by one.
///
/// Ref: <https://redis.io/docs/latest/commands/decr/>
#[derive(Debug, PartialEq)]
pub struct Decr {
    pub key: Bytes,
}

impl Executable for Decr {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        incr_by(ctx, self.key, -1)
    }
}

impl TryFrom<&mut CommandParser> for Decr {
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
    fn existing_key() {
        let cmd = Command::try_from(frame(&["DECR", "mykey"])).unwrap();
        assert_eq!(
            cmd,
            Command::Decr(Decr {
                key: Bytes::from("mykey")
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", "10"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(9));
    }

    #[test]
    fn overflow() {
        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", &i64::MIN.to_string()]);
        assert_eq!(harness.run(&["DECR", "mykey"]), CommandError::Overflow.into());
    }
}
