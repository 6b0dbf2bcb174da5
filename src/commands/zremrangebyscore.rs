use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrange::RangeBy;
use crate::commands::zremrangebyrank::remove_range;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::sorted_set::ScoreBound;

/// Removes the members of a sorted set with a score between `min` and `max`.
///
/// Ref: <https://redis.io/docs/latest/commands/zremrangebyscore/>
#[derive(Debug, PartialEq)]
pub struct Zremrangebyscore {
    pub key: Bytes,
    pub min: ScoreBound,
    pub max: ScoreBound,
}

impl Executable for Zremrangebyscore {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        remove_range(ctx, self.key, &RangeBy::Score(self.min, self.max))
    }
}

impl TryFrom<&mut CommandParser> for Zremrangebyscore {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let min = parser.next_score_bound()?;
        let max = parser.next_score_bound()?;
        Ok(Self { key, min, max })
    }
}
