use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns all values in the hash stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/hvals/>
#[derive(Debug, PartialEq)]
pub struct Hvals {
    pub key: Bytes,
}

impl Executable for Hvals {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let values: Vec<Bytes> = key
            .hash()?
            .map(|hash| hash.entries().into_iter().map(|(_, value)| value.clone()).collect())
            .unwrap_or_else(Vec::new);
        Ok(Frame::array_of_bulks(values))
    }
}

impl TryFrom<&mut CommandParser> for Hvals {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
