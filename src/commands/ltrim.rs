use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::utils::range::fix_range;

/// Trims the list stored at `key` so that it only contains the specified range of elements.
///
/// Ref: <https://redis.io/docs/latest/commands/ltrim/>
#[derive(Debug, PartialEq)]
pub struct Ltrim {
    pub key: Bytes,
    pub start: i64,
    pub end: i64,
}

impl Executable for Ltrim {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let Some(list) = key.list()? else {
            return Ok(Frame::ok());
        };

        let len = list.len();
        let range = fix_range(self.start, self.end, len);
        if range.len() != len {
            let list = key.list_mut()?;
            list.truncate(range.end);
            list.drain(..range.start);
            key.updated();
        }

        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Ltrim {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let end = parser.next_integer()?;
        Ok(Self { key, start, end })
    }
}
