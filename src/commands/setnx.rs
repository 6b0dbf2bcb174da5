use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Set `key` to hold string `value` if `key` does not exist.
///
/// Ref: <https://redis.io/docs/latest/commands/setnx/>
#[derive(Debug, PartialEq)]
pub struct Setnx {
    pub key: Bytes,
    pub value: Bytes,
}

impl Executable for Setnx {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.exists() {
            return Ok(Frame::Integer(0));
        }
        key.replace(Value::String(self.value));
        Ok(Frame::Integer(1))
    }
}

impl TryFrom<&mut CommandParser> for Setnx {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let value = parser.next_bytes()?;
        Ok(Self { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn only_sets_missing_keys() {
        let cmd = Command::try_from(frame(&["SETNX", "mykey", "Hello"])).unwrap();
        assert_eq!(
            cmd,
            Command::Setnx(Setnx {
                key: Bytes::from("mykey"),
                value: Bytes::from("Hello"),
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.run(&["SETNX", "mykey", "World"]), Frame::Integer(0));
        assert_eq!(harness.run(&["GET", "mykey"]), bulk("Hello"));
    }
}
