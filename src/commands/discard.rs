use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Flushes all previously queued commands in a transaction and forgets the watched keys.
///
/// Ref: <https://redis.io/docs/latest/commands/discard/>
#[derive(Debug, PartialEq)]
pub struct Discard;

impl Executable for Discard {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        if ctx.session.transaction.take().is_none() {
            return Err(CommandError::WithoutMulti("DISCARD"));
        }
        ctx.session.unwatch_all(&mut ctx.state.dbs);
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Discard {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
