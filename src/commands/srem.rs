use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Remove the specified members from the set stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/srem/>
#[derive(Debug, PartialEq)]
pub struct Srem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Srem {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.set()?.is_none() {
            return Ok(Frame::Integer(0));
        }

        let set = key.set_mut()?;
        let removed = self.members.iter().filter(|member| set.remove(*member)).count();
        if removed > 0 {
            key.updated();
        }
        Ok(Frame::Integer(removed as i64))
    }
}

impl TryFrom<&mut CommandParser> for Srem {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let members = parser.rest()?;
        Ok(Self { key, members })
    }
}
