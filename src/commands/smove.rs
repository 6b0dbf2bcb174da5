use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Move `member` from the set at `source` to the set at `destination`.
///
/// Ref: <https://redis.io/docs/latest/commands/smove/>
#[derive(Debug, PartialEq)]
pub struct Smove {
    pub source: Bytes,
    pub destination: Bytes,
    pub member: Bytes,
}

impl Executable for Smove {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        let present = db
            .key(self.source.clone())
            .set()?
            .is_some_and(|set| set.contains(&self.member));
        db.key(self.destination.clone()).set()?;
        if !present {
            return Ok(Frame::Integer(0));
        }

        {
            let mut source = db.key(self.source);
            source.set_mut()?.remove(&self.member);
            source.updated();
        }
        let mut destination = db.key(self.destination);
        destination.set_mut()?.insert(self.member);
        destination.updated();

        Ok(Frame::Integer(1))
    }
}

impl TryFrom<&mut CommandParser> for Smove {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = parser.next_bytes()?;
        let destination = parser.next_bytes()?;
        let member = parser.next_bytes()?;
        Ok(Self {
            source,
            destination,
            member,
        })
    }
}
