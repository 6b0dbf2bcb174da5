use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::incrby::incr_by;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Decrements the number stored at `key` by `decrement`.
///
/// Ref: <https://redis.io/docs/latest/commands/decrby/>
#[derive(Debug, PartialEq)]
pub struct DecrBy {
    pub key: Bytes,
    pub decrement: i64,
}

impl Executable for DecrBy {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let increment = self
            .decrement
            .checked_neg()
            .ok_or(CommandError::Overflow)?;
        incr_by(ctx, self.key, increment)
    }
}

impl TryFrom<&mut CommandParser> for DecrBy {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let decrement = parser.next_integer()?;
        Ok(Self { key, decrement })
    }
}
