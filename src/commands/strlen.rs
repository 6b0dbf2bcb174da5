use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the length of the string value stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/strlen/>
#[derive(Debug, PartialEq)]
pub struct Strlen {
    pub key: Bytes,
}

impl Executable for Strlen {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let len = key.string()?.map_or(0, |s| s.len());
        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Strlen {
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
    fn existing_and_missing_keys() {
        let cmd = Command::try_from(frame(&["STRLEN", "mykey"])).unwrap();
        assert_eq!(
            cmd,
            Command::Strlen(Strlen {
                key: Bytes::from("mykey")
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", "Hello world"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(11));
        assert_eq!(harness.run(&["STRLEN", "nonexisting"]), Frame::Integer(0));
    }
}
