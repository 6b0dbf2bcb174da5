use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns all the members of the set value stored at `key`, in byte order.
///
/// Ref: <https://redis.io/docs/latest/commands/smembers/>
#[derive(Debug, PartialEq)]
pub struct Smembers {
    pub key: Bytes,
}

impl Executable for Smembers {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let members: Vec<Bytes> = key
            .set()?
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        Ok(Frame::array_of_bulks(members))
    }
}

impl TryFrom<&mut CommandParser> for Smembers {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
