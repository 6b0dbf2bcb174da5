use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::mset::parse_pairs;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Sets the specified fields to their respective values in the hash stored at `key`, creating
/// the hash if needed. Returns the number of fields that were added. Invoked as HMSET the reply
/// is a plain OK.
///
/// Ref: <https://redis.io/docs/latest/commands/hset/>
#[derive(Debug, PartialEq)]
pub struct Hset {
    pub key: Bytes,
    pub pairs: Vec<(Bytes, Bytes)>,
    pub reply_ok: bool,
}

impl Executable for Hset {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let hash = key.hash_mut()?;

        let mut added = 0;
        for (field, value) in self.pairs {
            if hash.insert(field, value) {
                added += 1;
            }
        }
        key.updated();

        if self.reply_ok {
            Ok(Frame::ok())
        } else {
            Ok(Frame::Integer(added))
        }
    }
}

impl TryFrom<&mut CommandParser> for Hset {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let pairs = parse_pairs(parser)?;
        Ok(Self {
            key,
            pairs,
            reply_ok: parser.name() == "hmset",
        })
    }
}
