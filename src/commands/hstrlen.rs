use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the string length of the value associated with `field` in the hash stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/hstrlen/>
#[derive(Debug, PartialEq)]
pub struct Hstrlen {
    pub key: Bytes,
    pub field: Bytes,
}

impl Executable for Hstrlen {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let len = key
            .hash()?
            .and_then(|hash| hash.get(&self.field))
            .map_or(0, |value| value.len());
        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Hstrlen {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let field = parser.next_bytes()?;
        Ok(Self { key, field })
    }
}
