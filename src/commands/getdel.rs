use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Get the value of `key` and delete the key. This command is similar to GET, except for the
/// fact that it also deletes the key on success.
///
/// Ref: <https://redis.io/docs/latest/commands/getdel/>
#[derive(Debug, PartialEq)]
pub struct Getdel {
    pub key: Bytes,
}

impl Executable for Getdel {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let value = key.string()?.cloned();
        if value.is_some() {
            key.delete();
        }
        Ok(Frame::bulk_or_null(value))
    }
}

impl TryFrom<&mut CommandParser> for Getdel {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
