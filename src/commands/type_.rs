use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the string representation of the type of the value stored at `key`: `string`,
/// `list`, `set`, `zset` or `hash`, or `none` when the key does not exist.
///
/// Ref: <https://redis.io/docs/latest/commands/type/>
#[derive(Debug, PartialEq)]
pub struct Type {
    pub key: Bytes,
}

impl Executable for Type {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let name = match ctx.db().get(&self.key) {
            Some(entry) => entry.value.value_type().to_string(),
            None => "none".to_string(),
        };
        Ok(Frame::Simple(name))
    }
}

impl TryFrom<&mut CommandParser> for Type {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
