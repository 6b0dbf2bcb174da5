use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Add the specified members to the set stored at `key`. Members already in the set are
/// ignored.
///
/// Ref: <https://redis.io/docs/latest/commands/sadd/>
#[derive(Debug, PartialEq)]
pub struct Sadd {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

/// Adds `members` to the set at `key`, returning how many were new.
pub(crate) fn add_members(
    ctx: &mut Context<'_>,
    key: Bytes,
    members: Vec<Bytes>,
) -> Result<usize, CommandError> {
    let mut key = ctx.db().key(key);
    let set = key.set_mut()?;
    let added = members
        .into_iter()
        .map(|member| set.insert(member))
        .filter(|&new| new)
        .count();
    key.updated();
    Ok(added)
}

impl Executable for Sadd {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let added = add_members(ctx, self.key, self.members)?;
        Ok(Frame::Integer(added as i64))
    }
}

impl TryFrom<&mut CommandParser> for Sadd {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let members = parser.rest()?;
        Ok(Self { key, members })
    }
}
