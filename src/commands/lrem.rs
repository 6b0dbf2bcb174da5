use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Removes occurrences of `element` from the list stored at `key`: the first `count` for a
/// positive count, the last `-count` for a negative one, and all of them for zero.
///
/// Ref: <https://redis.io/docs/latest/commands/lrem/>
#[derive(Debug, PartialEq)]
pub struct Lrem {
    pub key: Bytes,
    pub count: i64,
    pub element: Bytes,
}

impl Executable for Lrem {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.list()?.is_none() {
            return Ok(Frame::Integer(0));
        }

        let list = key.list_mut()?;
        let found: Vec<usize> = list
            .iter()
            .enumerate()
            .filter(|(_, item)| **item == self.element)
            .map(|(i, _)| i)
            .collect();
        let limit = self.count.unsigned_abs() as usize;
        let doomed = match self.count {
            0 => &found[..],
            count if count > 0 => &found[..limit.min(found.len())],
            _ => &found[found.len().saturating_sub(limit)..],
        };

        for &index in doomed.iter().rev() {
            list.remove(index);
        }
        let removed = doomed.len();
        if removed > 0 {
            key.updated();
        }

        Ok(Frame::Integer(removed as i64))
    }
}

impl TryFrom<&mut CommandParser> for Lrem {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let count = parser.next_integer()?;
        let element = parser.next_bytes()?;
        Ok(Self {
            key,
            count,
            element,
        })
    }
}
