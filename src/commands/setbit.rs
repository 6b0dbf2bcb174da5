use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::getbit::parse_bit_offset;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::parse_int;
use crate::value::Value;

/// Sets or clears the bit at `offset` in the string value stored at `key`, growing the string
/// with zero bytes as needed. Returns the bit previously stored there.
///
/// Ref: <https://redis.io/docs/latest/commands/setbit/>
#[derive(Debug, PartialEq)]
pub struct Setbit {
    pub key: Bytes,
    pub offset: u64,
    pub value: bool,
}

impl Executable for Setbit {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let mut buf = key.string()?.map(|s| s.to_vec()).unwrap_or_default();

        let byte = (self.offset / 8) as usize;
        let mask = 1u8 << (7 - self.offset % 8);
        if buf.len() <= byte {
            buf.resize(byte + 1, 0);
        }
        let old = buf[byte] & mask != 0;
        if self.value {
            buf[byte] |= mask;
        } else {
            buf[byte] &= !mask;
        }
        key.update(Value::String(Bytes::from(buf)));

        Ok(Frame::Integer(i64::from(old)))
    }
}

impl TryFrom<&mut CommandParser> for Setbit {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let offset = parse_bit_offset(parser)?;
        let value = match parse_int(&parser.next_bytes()?) {
            Some(0) => false,
            Some(1) => true,
            _ => return Err(CommandError::BitValue),
        };
        Ok(Self { key, offset, value })
    }
}
