use rand::seq::SliceRandom;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Return a random key from the currently selected database.
///
/// Ref: <https://redis.io/docs/latest/commands/randomkey/>
#[derive(Debug, PartialEq)]
pub struct Randomkey;

impl Executable for Randomkey {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let state = &mut *ctx.state;
        let keys = state.dbs[ctx.session.db].keys();
        Ok(Frame::bulk_or_null(keys.choose(&mut state.rng).cloned()))
    }
}

impl TryFrom<&mut CommandParser> for Randomkey {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
