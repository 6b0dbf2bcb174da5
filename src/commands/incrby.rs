use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{format_int, parse_int};
use crate::value::Value;

/// Increments the number stored at `key` by `increment`. If the key does not exist, it is set
/// to 0 before performing the operation. An error is returned if the key contains a value of
/// the wrong type or contains a string that can not be represented as integer.
///
/// Ref: <https://redis.io/docs/latest/commands/incrby/>
#[derive(Debug, PartialEq)]
pub struct IncrBy {
    pub key: Bytes,
    pub increment: i64,
}

impl Executable for IncrBy {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        incr_by(ctx, self.key, self.increment)
    }
}

impl TryFrom<&mut CommandParser> for IncrBy {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let increment = parser.next_integer()?;
        Ok(Self { key, increment })
    }
}

/// Shared by INCR, INCRBY, DECR and DECRBY. The expiry of the key is kept.
pub(crate) fn incr_by(
    ctx: &mut Context<'_>,
    key: Bytes,
    increment: i64,
) -> Result<Frame, CommandError> {
    let mut key = ctx.db().key(key);
    let current = match key.string()? {
        Some(value) => parse_int(value).ok_or(CommandError::NotInteger)?,
        None => 0,
    };
    let value = current
        .checked_add(increment)
        .ok_or(CommandError::Overflow)?;
    key.update(Value::String(format_int(value)));

    Ok(Frame::Integer(value))
}
