use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Sets `field` in the hash stored at `key` to `value`, only if `field` does not yet exist.
///
/// Ref: <https://redis.io/docs/latest/commands/hsetnx/>
#[derive(Debug, PartialEq)]
pub struct Hsetnx {
    pub key: Bytes,
    pub field: Bytes,
    pub value: Bytes,
}

impl Executable for Hsetnx {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.hash()?.is_some_and(|hash| hash.contains(&self.field)) {
            return Ok(Frame::Integer(0));
        }
        key.hash_mut()?.insert(self.field, self.value);
        key.updated();
        Ok(Frame::Integer(1))
    }
}

impl TryFrom<&mut CommandParser> for Hsetnx {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let field = parser.next_bytes()?;
        let value = parser.next_bytes()?;
        Ok(Self { key, field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn only_sets_missing_fields() {
        let cmd = Command::try_from(frame(&["HSETNX", "h", "f", "1"])).unwrap();
        assert_eq!(
            cmd,
            Command::Hsetnx(Hsetnx {
                key: Bytes::from("h"),
                field: Bytes::from("f"),
                value: Bytes::from("1"),
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.run(&["HSETNX", "h", "f", "2"]), Frame::Integer(0));
        assert_eq!(harness.run(&["HGET", "h", "f"]), bulk("1"));
    }
}
