use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Set `key` to hold the string `value` and set `key` to timeout after a given number of
/// seconds, or milliseconds for PSETEX.
///
/// Ref: <https://redis.io/docs/latest/commands/setex/>
#[derive(Debug, PartialEq)]
pub struct Setex {
    pub key: Bytes,
    /// Always in seconds.
    pub ttl: f64,
    pub value: Bytes,
}

impl Executable for Setex {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let deadline = key.now() + self.ttl;
        key.replace(Value::String(self.value));
        key.set_expire_at(Some(deadline));
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Setex {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let amount = parser.next_integer()?;
        if amount <= 0 {
            return Err(CommandError::InvalidExpire(parser.name().to_string()));
        }
        let ttl = match parser.name() {
            "psetex" => amount as f64 / 1000.0,
            _ => amount as f64,
        };
        let value = parser.next_bytes()?;
        Ok(Self { key, ttl, value })
    }
}
