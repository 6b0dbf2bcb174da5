use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns all field names in the hash stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/hkeys/>
#[derive(Debug, PartialEq)]
pub struct Hkeys {
    pub key: Bytes,
}

impl Executable for Hkeys {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let fields: Vec<Bytes> = key
            .hash()?
            .map(|hash| hash.entries().into_iter().map(|(field, _)| field.clone()).collect())
            .unwrap_or_else(Vec::new);
        Ok(Frame::array_of_bulks(fields))
    }
}

impl TryFrom<&mut CommandParser> for Hkeys {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
