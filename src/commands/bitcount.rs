use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::utils::range::fix_range_string;

/// Count the number of set bits in a string, optionally restricted to the bytes between
/// `start` and `end`.
///
/// Ref: <https://redis.io/docs/latest/commands/bitcount/>
#[derive(Debug, PartialEq)]
pub struct Bitcount {
    pub key: Bytes,
    pub range: Option<(i64, i64)>,
}

impl Executable for Bitcount {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let Some(value) = key.string()? else {
            return Ok(Frame::Integer(0));
        };
        let bytes = match self.range {
            Some((start, end)) => &value[fix_range_string(start, end, value.len())],
            None => &value[..],
        };
        let count: u32 = bytes.iter().map(|byte| byte.count_ones()).sum();
        Ok(Frame::Integer(i64::from(count)))
    }
}

impl TryFrom<&mut CommandParser> for Bitcount {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let range = match parser.remaining() {
            0 => None,
            2 => Some((parser.next_integer()?, parser.next_integer()?)),
            _ => return Err(CommandError::Syntax),
        };
        Ok(Self { key, range })
    }
}
