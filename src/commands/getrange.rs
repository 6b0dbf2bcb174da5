use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::utils::range::fix_range_string;

/// Returns the substring of the string value stored at `key`, determined by the offsets
/// `start` and `end` (both are inclusive). Negative offsets can be used in order to provide an
/// offset starting from the end of the string. Also answers to SUBSTR.
///
/// Ref: <https://redis.io/docs/latest/commands/getrange/>
#[derive(Debug, PartialEq)]
pub struct Getrange {
    pub key: Bytes,
    pub start: i64,
    pub end: i64,
}

impl Executable for Getrange {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let value = match key.string()? {
            Some(value) => value.slice(fix_range_string(self.start, self.end, value.len())),
            None => Bytes::new(),
        };
        Ok(Frame::Bulk(value))
    }
}

impl TryFrom<&mut CommandParser> for Getrange {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let end = parser.next_integer()?;
        Ok(Self { key, start, end })
    }
}
