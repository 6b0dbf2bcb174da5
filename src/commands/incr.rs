use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::incrby::incr_by;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Increments the number stored at `key` by one.
///
/// Ref: <https://redis.io/docs/latest/commands/incr/>
#[derive(Debug, PartialEq)]
pub struct Incr {
    pub key: Bytes,
}

impl Executable for Incr {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        incr_by(ctx, self.key, 1)
    }
}

impl TryFrom<&mut CommandParser> for Incr {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
