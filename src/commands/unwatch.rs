use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Flushes all the previously watched keys for a transaction.
///
/// Ref: <https://redis.io/docs/latest/commands/unwatch/>
#[derive(Debug, PartialEq)]
pub struct Unwatch;

impl Executable for Unwatch {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        ctx.session.unwatch_all(&mut ctx.state.dbs);
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Unwatch {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
