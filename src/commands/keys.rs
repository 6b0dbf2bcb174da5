use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::glob;

/// Returns all keys matching `pattern`, in byte order.
///
/// Ref: <https://redis.io/docs/latest/commands/keys/>
#[derive(Debug, PartialEq)]
pub struct Keys {
    pub pattern: Bytes,
}

impl Executable for Keys {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let keys = ctx
            .db()
            .keys()
            .into_iter()
            .filter(|key| glob::matches(&self.pattern, key));
        Ok(Frame::array_of_bulks(keys))
    }
}

impl TryFrom<&mut CommandParser> for Keys {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pattern = parser.next_bytes()?;
        Ok(Self { pattern })
    }
}
