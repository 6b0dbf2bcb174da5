use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{format_increment, parse_float};

/// Increments the float stored at `field` in the hash stored at `key` by `increment`, replying
/// with the new value.
///
/// Ref: <https://redis.io/docs/latest/commands/hincrbyfloat/>
#[derive(Debug, PartialEq)]
pub struct Hincrbyfloat {
    pub key: Bytes,
    pub field: Bytes,
    pub increment: f64,
}

impl Executable for Hincrbyfloat {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let current = match key.hash()?.and_then(|hash| hash.get(&self.field)) {
            Some(value) => parse_float(value).ok_or(CommandError::HashNotFloat)?,
            None => 0.0,
        };
        let result = current + self.increment;
        if !result.is_finite() {
            return Err(CommandError::NotFinite);
        }

        let encoded = format_increment(result);
        key.hash_mut()?.insert(self.field, encoded.clone());
        key.updated();
        Ok(Frame::Bulk(encoded))
    }
}

impl TryFrom<&mut CommandParser> for Hincrbyfloat {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let field = parser.next_bytes()?;
        let increment = parser.next_float()?;
        Ok(Self {
            key,
            field,
            increment,
        })
    }
}
