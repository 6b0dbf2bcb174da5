use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::{check_string_len, Value};

/// Overwrites part of the string stored at `key`, starting at the specified `offset`, for the
/// entire length of `value`. If the offset is larger than the current length of the string at
/// `key`, the string is padded with zero-bytes to make `offset` fit.
///
/// Ref: <https://redis.io/docs/latest/commands/setrange/>
#[derive(Debug, PartialEq)]
pub struct Setrange {
    pub key: Bytes,
    pub offset: usize,
    pub value: Bytes,
}

impl Executable for Setrange {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let current = key.string()?;
        if self.value.is_empty() {
            return Ok(Frame::Integer(current.map_or(0, |s| s.len()) as i64));
        }

        let end = self.offset + self.value.len();
        check_string_len(end)?;

        let mut buf = current.map(|s| s.to_vec()).unwrap_or_default();
        if buf.len() < end {
            buf.resize(end, 0);
        }
        buf[self.offset..end].copy_from_slice(&self.value);
        let len = buf.len();
        key.update(Value::String(Bytes::from(buf)));

        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Setrange {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let offset = parser.next_integer()?;
        let offset = usize::try_from(offset).map_err(|_| CommandError::OffsetOutOfRange)?;
        let value = parser.next_bytes()?;
        Ok(Self { key, offset, value })
    }
}
