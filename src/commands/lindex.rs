use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the element at `index` in the list stored at `key`. Negative indices count from the
/// tail.
///
/// Ref: <https://redis.io/docs/latest/commands/lindex/>
#[derive(Debug, PartialEq)]
pub struct Lindex {
    pub key: Bytes,
    pub index: i64,
}

impl Executable for Lindex {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let Some(list) = key.list()? else {
            return Ok(Frame::Null);
        };

        let index = if self.index < 0 {
            self.index + list.len() as i64
        } else {
            self.index
        };
        let element = usize::try_from(index).ok().and_then(|i| list.get(i)).cloned();
        Ok(Frame::bulk_or_null(element))
    }
}

impl TryFrom<&mut CommandParser> for Lindex {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let index = parser.next_integer()?;
        Ok(Self { key, index })
    }
}
