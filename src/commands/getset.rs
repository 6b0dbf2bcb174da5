use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Atomically sets `key` to `value` and returns the old value stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/getset/>
#[derive(Debug, PartialEq)]
pub struct Getset {
    pub key: Bytes,
    pub value: Bytes,
}

impl Executable for Getset {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let old = key.string()?.cloned();
        key.replace(Value::String(self.value));
        Ok(Frame::bulk_or_null(old))
    }
}

impl TryFrom<&mut CommandParser> for Getset {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let value = parser.next_bytes()?;
        Ok(Self { key, value })
    }
}
