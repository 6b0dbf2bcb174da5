use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::sorted_set::ScoreBound;

/// Returns the number of members in the sorted set at `key` with a score between `min` and
/// `max`.
///
/// Ref: <https://redis.io/docs/latest/commands/zcount/>
#[derive(Debug, PartialEq)]
pub struct Zcount {
    pub key: Bytes,
    pub min: ScoreBound,
    pub max: ScoreBound,
}

impl Executable for Zcount {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let count = key
            .zset()?
            .map_or(0, |zset| zset.score_range(&self.min, &self.max).len());
        Ok(Frame::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zcount {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let min = parser.next_score_bound()?;
        let max = parser.next_score_bound()?;
        Ok(Self { key, min, max })
    }
}
