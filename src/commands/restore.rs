use bytes::Bytes;
use sha1::{Digest, Sha1};

use crate::commands::dump::CHECKSUM_LEN;
use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Create a key associated with a value that is obtained by deserializing the provided
/// serialized value (obtained via DUMP). A `ttl` of 0 creates the key without any expire,
/// otherwise it is a number of milliseconds.
///
/// Ref: <https://redis.io/docs/latest/commands/restore/>
#[derive(Debug, PartialEq)]
pub struct Restore {
    pub key: Bytes,
    pub ttl: i64,
    pub payload: Bytes,
    pub replace: bool,
}

impl Executable for Restore {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.exists() && !self.replace {
            return Err(CommandError::BusyKey);
        }

        if self.payload.len() < CHECKSUM_LEN {
            return Err(CommandError::InvalidDumpPayload);
        }
        let (checksum, body) = self.payload.split_at(CHECKSUM_LEN);
        if checksum != &Sha1::digest(body)[..] {
            return Err(CommandError::InvalidDumpPayload);
        }
        if self.ttl < 0 {
            return Err(CommandError::InvalidTtl);
        }
        let value: Value =
            bincode::deserialize(body).map_err(|_| CommandError::InvalidDumpPayload)?;

        let expire_at = (self.ttl > 0).then(|| key.now() + self.ttl as f64 / 1000.0);
        key.replace(value);
        key.set_expire_at(expire_at);

        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Restore {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let ttl = parser.next_integer()?;
        let payload = parser.next_bytes()?;
        let mut replace = false;
        while parser.has_next() {
            match parser.next_token()?.as_str() {
                "REPLACE" => replace = true,
                _ => return Err(CommandError::Syntax),
            }
        }
        Ok(Self {
            key,
            ttl,
            payload,
            replace,
        })
    }
}
