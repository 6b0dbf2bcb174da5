use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// SAVE and BGSAVE. Nothing is written anywhere; only the last-save time moves.
///
/// Ref: <https://redis.io/docs/latest/commands/bgsave/>
#[derive(Debug, PartialEq)]
pub struct Save {
    pub background: bool,
}

impl Executable for Save {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        ctx.state.last_save = ctx.state.now() as i64;
        if self.background {
            Ok(Frame::Simple("Background saving started".to_string()))
        } else {
            Ok(Frame::ok())
        }
    }
}

impl TryFrom<&mut CommandParser> for Save {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let background = parser.name() == "bgsave";
        if parser.has_next() && parser.next_token()? != "SCHEDULE" {
            return Err(CommandError::Syntax);
        }
        parser.finish()?;
        Ok(Self { background })
    }
}
