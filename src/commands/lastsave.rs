use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Return the Unix time of the last successful SAVE or BGSAVE.
///
/// Ref: <https://redis.io/docs/latest/commands/lastsave/>
#[derive(Debug, PartialEq)]
pub struct Lastsave;

impl Executable for Lastsave {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        Ok(Frame::Integer(ctx.state.last_save))
    }
}

impl TryFrom<&mut CommandParser> for Lastsave {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
