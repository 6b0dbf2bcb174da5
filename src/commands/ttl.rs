use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the remaining time to live of a key that has a timeout, in seconds for TTL and
/// milliseconds for PTTL. Returns -2 if the key does not exist and -1 if it has no expiry.
///
/// Ref: <https://redis.io/docs/latest/commands/ttl/>
#[derive(Debug, PartialEq)]
pub struct Ttl {
    pub key: Bytes,
    pub millis: bool,
}

impl Executable for Ttl {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        if !key.exists() {
            return Ok(Frame::Integer(-2));
        }
        let Some(expire_at) = key.expire_at() else {
            return Ok(Frame::Integer(-1));
        };

        let scale = if self.millis { 1000.0 } else { 1.0 };
        let ttl = ((expire_at - key.now()) * scale).round();
        Ok(Frame::Integer(ttl as i64))
    }
}

impl TryFrom<&mut CommandParser> for Ttl {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let millis = parser.name() == "pttl";
        let key = parser.next_bytes()?;
        Ok(Self { key, millis })
    }
}
