use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::sorted_set::LexBound;

/// Counts the members between `min` and `max` in a sorted set whose members all share a score.
///
/// Ref: <https://redis.io/docs/latest/commands/zlexcount/>
#[derive(Debug, PartialEq)]
pub struct Zlexcount {
    pub key: Bytes,
    pub min: LexBound,
    pub max: LexBound,
}

impl Executable for Zlexcount {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let count = key
            .zset()?
            .map_or(0, |zset| zset.lex_range(&self.min, &self.max).len());
        Ok(Frame::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zlexcount {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let min = parser.next_lex_bound()?;
        let max = parser.next_lex_bound()?;
        Ok(Self { key, min, max })
    }
}
