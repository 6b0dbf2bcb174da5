use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Removes the specified keys. A key is ignored if it does not exist. Also answers to UNLINK,
/// which behaves the same way here since nothing is reclaimed in the background.
///
/// Ref: <https://redis.io/docs/latest/commands/del/>
#[derive(Debug, PartialEq)]
pub struct Del {
    pub keys: Vec<Bytes>,
}

impl Executable for Del {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        let count = self
            .keys
            .iter()
            .filter(|key| db.remove(key).is_some())
            .count();
        Ok(Frame::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Del {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.rest()?;
        Ok(Self { keys })
    }
}
