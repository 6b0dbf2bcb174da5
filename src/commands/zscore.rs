use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::format_score;

/// Returns the score of `member` in the sorted set at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/zscore/>
#[derive(Debug, PartialEq)]
pub struct Zscore {
    pub key: Bytes,
    pub member: Bytes,
}

impl Executable for Zscore {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let score = key.zset()?.and_then(|zset| zset.score(&self.member));
        Ok(Frame::bulk_or_null(score.map(format_score)))
    }
}

impl TryFrom<&mut CommandParser> for Zscore {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let member = parser.next_bytes()?;
        Ok(Self { key, member })
    }
}
