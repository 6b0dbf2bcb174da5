use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::utils::range::fix_range;

/// Returns the specified elements of the list stored at `key`. Both offsets are inclusive and
/// may be negative.
///
/// Ref: <https://redis.io/docs/latest/commands/lrange/>
#[derive(Debug, PartialEq)]
pub struct Lrange {
    pub key: Bytes,
    pub start: i64,
    pub end: i64,
}

impl Executable for Lrange {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let Some(list) = key.list()? else {
            return Ok(Frame::Array(Vec::new()));
        };
        let range = fix_range(self.start, self.end, list.len());
        Ok(Frame::array_of_bulks(list.range(range).cloned()))
    }
}

impl TryFrom<&mut CommandParser> for Lrange {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let end = parser.next_integer()?;
        Ok(Self { key, start, end })
    }
}
