use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::parse_int;

const MAX_BIT_OFFSET: i64 = 1 << 32;

/// Reads a bit offset argument, which must lie in `0..2^32`.
pub(crate) fn parse_bit_offset(parser: &mut CommandParser) -> Result<u64, CommandError> {
    let bytes = parser.next_bytes()?;
    parse_int(&bytes)
        .filter(|offset| (0..MAX_BIT_OFFSET).contains(offset))
        .map(|offset| offset as u64)
        .ok_or(CommandError::BitOffset)
}

/// Returns the bit value at `offset` in the string value stored at `key`. Bits are numbered
/// from the most significant bit of the first byte.
///
/// Ref: <https://redis.io/docs/latest/commands/getbit/>
#[derive(Debug, PartialEq)]
pub struct Getbit {
    pub key: Bytes,
    pub offset: u64,
}

impl Executable for Getbit {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let byte = (self.offset / 8) as usize;
        let bit = match key.string()?.and_then(|value| value.get(byte)) {
            Some(byte) => (byte >> (7 - self.offset % 8)) & 1,
            None => 0,
        };
        Ok(Frame::Integer(i64::from(bit)))
    }
}

impl TryFrom<&mut CommandParser> for Getbit {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let offset = parse_bit_offset(parser)?;
        Ok(Self { key, offset })
    }
}
