use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the values associated with the specified fields in the hash stored at `key`, with a
/// null for every field that does not exist.
///
/// Ref: <https://redis.io/docs/latest/commands/hmget/>
#[derive(Debug, PartialEq)]
pub struct Hmget {
    pub key: Bytes,
    pub fields: Vec<Bytes>,
}

impl Executable for Hmget {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let hash = key.hash()?;
        let frames = self
            .fields
            .iter()
            .map(|field| Frame::bulk_or_null(hash.and_then(|hash| hash.get(field)).cloned()))
            .collect();
        Ok(Frame::Array(frames))
    }
}

impl TryFrom<&mut CommandParser> for Hmget {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let fields = parser.rest()?;
        Ok(Self { key, fields })
    }
}
