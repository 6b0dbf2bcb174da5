use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Ask the server to close the connection. There is no connection to close in process, so this
/// only acknowledges; dropping the `Client` is what disconnects.
///
/// Ref: <https://redis.io/docs/latest/commands/quit/>
#[derive(Debug, PartialEq)]
pub struct Quit;

impl Executable for Quit {
    fn exec(self, _ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Quit {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
