use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::transaction::Transaction;

/// Marks the start of a transaction block. Subsequent commands are queued for atomic
/// execution using EXEC.
///
/// Ref: <https://redis.io/docs/latest/commands/multi/>
#[derive(Debug, PartialEq)]
pub struct Multi;

impl Executable for Multi {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        if ctx.session.transaction.is_some() {
            return Err(CommandError::NestedMulti);
        }
        ctx.session.transaction = Some(Transaction::default());
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Multi {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
