use bytes::{BufMut, Bytes, BytesMut};
use sha1::{Digest, Sha1};

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Length of the checksum leading every DUMP payload.
pub(crate) const CHECKSUM_LEN: usize = 20;

/// Serialize the value stored at `key` and return it to the user. The payload is a SHA-1
/// checksum followed by the value in `bincode` form; only RESTORE on this engine reads it.
///
/// Ref: <https://redis.io/docs/latest/commands/dump/>
#[derive(Debug, PartialEq)]
pub struct Dump {
    pub key: Bytes,
}

impl Executable for Dump {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let Some(entry) = ctx.db().get(&self.key) else {
            return Ok(Frame::Null);
        };
        let body =
            bincode::serialize(&entry.value).map_err(|_| CommandError::InvalidDumpPayload)?;

        let mut payload = BytesMut::with_capacity(CHECKSUM_LEN + body.len());
        payload.put_slice(&Sha1::digest(&body));
        payload.put_slice(&body);
        Ok(Frame::Bulk(payload.freeze()))
    }
}

impl TryFrom<&mut CommandParser> for Dump {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
