use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Return the number of keys in the currently-selected database.
///
/// Ref: <https://redis.io/docs/latest/commands/dbsize/>
#[derive(Debug, PartialEq)]
pub struct Dbsize;

impl Executable for Dbsize {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        Ok(Frame::Integer(ctx.db().len() as i64))
    }
}

impl TryFrom<&mut CommandParser> for Dbsize {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
