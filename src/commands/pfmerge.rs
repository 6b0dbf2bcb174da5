use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::setop::{combine, SetOperator};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Merges the HyperLogLogs at `sources` into `destination`, keeping what `destination` already
/// held.
///
/// Ref: <https://redis.io/docs/latest/commands/pfmerge/>
#[derive(Debug, PartialEq)]
pub struct Pfmerge {
    pub destination: Bytes,
    pub sources: Vec<Bytes>,
}

impl Executable for Pfmerge {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        let mut keys = Vec::with_capacity(self.sources.len() + 1);
        keys.push(self.destination.clone());
        keys.extend(self.sources);

        let union = combine(db, SetOperator::Union, &keys)?;
        db.key(self.destination).update(Value::Set(union));
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Pfmerge {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let destination = parser.next_bytes()?;
        let sources = parser.rest()?;
        Ok(Self {
            destination,
            sources,
        })
    }
}
