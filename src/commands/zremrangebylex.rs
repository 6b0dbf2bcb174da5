use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrange::RangeBy;
use crate::commands::zremrangebyrank::remove_range;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::sorted_set::LexBound;

/// Removes the members of a sorted set between the lexicographic bounds `min` and `max`.
///
/// Ref: <https://redis.io/docs/latest/commands/zremrangebylex/>
#[derive(Debug, PartialEq)]
pub struct Zremrangebylex {
    pub key: Bytes,
    pub min: LexBound,
    pub max: LexBound,
}

impl Executable for Zremrangebylex {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        remove_range(ctx, self.key, &RangeBy::Lex(self.min, self.max))
    }
}

impl TryFrom<&mut CommandParser> for Zremrangebylex {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let min = parser.next_lex_bound()?;
        let max = parser.next_lex_bound()?;
        Ok(Self { key, min, max })
    }
}
