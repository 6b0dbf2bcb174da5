use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the rank of `member` in the sorted set stored at `key`, lowest score first, or
/// highest score first for ZREVRANK.
///
/// Ref: <https://redis.io/docs/latest/commands/zrank/>
#[derive(Debug, PartialEq)]
pub struct Zrank {
    pub key: Bytes,
    pub member: Bytes,
    pub rev: bool,
}

impl Executable for Zrank {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let Some(zset) = key.zset()? else {
            return Ok(Frame::Null);
        };
        let Some(rank) = zset.rank(&self.member) else {
            return Ok(Frame::Null);
        };
        let rank = if self.rev { zset.len() - 1 - rank } else { rank };
        Ok(Frame::Integer(rank as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zrank {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let rev = parser.name() == "zrevrank";
        let key = parser.next_bytes()?;
        let member = parser.next_bytes()?;
        Ok(Self { key, member, rev })
    }
}
