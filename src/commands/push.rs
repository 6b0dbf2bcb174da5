use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::list::End;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Inserts the values at the head (LPUSH) or tail (RPUSH) of the list stored at `key`, one
/// after the other. The X forms only push onto a list that already exists.
///
/// Ref: <https://redis.io/docs/latest/commands/lpush/>
#[derive(Debug, PartialEq)]
pub struct Push {
    pub key: Bytes,
    pub values: Vec<Bytes>,
    pub end: End,
    pub only_existing: bool,
}

impl Executable for Push {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if self.only_existing && key.list()?.is_none() {
            return Ok(Frame::Integer(0));
        }

        let list = key.list_mut()?;
        for value in self.values {
            self.end.push(list, value);
        }
        let len = list.len();
        key.updated();

        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Push {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let name = parser.name();
        let key = parser.next_bytes()?;
        let values = parser.rest()?;
        Ok(Self {
            key,
            values,
            end: if name.starts_with('l') {
                End::Left
            } else {
                End::Right
            },
            only_existing: name.ends_with('x'),
        })
    }
}
