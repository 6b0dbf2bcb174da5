use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Get the value of `key`. If the key does not exist the special value `nil` is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/get/>
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: Bytes,
}

impl Executable for Get {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        Ok(Frame::bulk_or_null(key.string()?.cloned()))
    }
}

impl TryFrom<&mut CommandParser> for Get {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn existing_key() {
        let cmd = Command::try_from(frame(&["GET", "key1"])).unwrap();
        assert_eq!(
            cmd,
            Command::Get(Get {
                key: Bytes::from("key1")
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "key1", "1"]);

        assert_eq!(harness.exec(cmd).unwrap(), bulk("1"));
    }

    #[test]
    fn missing_key() {
        let mut harness = Harness::new();
        assert_eq!(harness.run(&["GET", "key1"]), Frame::Null);
    }

    #[test]
    fn wrong_type() {
        let mut harness = Harness::new();
        harness.run(&["LPUSH", "list", "a"]);
        assert_eq!(
            harness.run(&["GET", "list"]),
            CommandError::WrongType.into()
        );
    }
}
