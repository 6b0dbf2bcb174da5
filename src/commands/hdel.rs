use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Removes the specified fields from the hash stored at `key`. Removing the last field deletes
/// the key.
///
/// Ref: <https://redis.io/docs/latest/commands/hdel/>
#[derive(Debug, PartialEq)]
pub struct Hdel {
    pub key: Bytes,
    pub fields: Vec<Bytes>,
}

impl Executable for Hdel {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.hash()?.is_none() {
            return Ok(Frame::Integer(0));
        }

        let hash = key.hash_mut()?;
        let removed = self.fields.iter().filter(|field| hash.remove(field)).count();
        if removed > 0 {
            key.updated();
        }
        Ok(Frame::Integer(removed as i64))
    }
}

impl TryFrom<&mut CommandParser> for Hdel {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let fields = parser.rest()?;
        Ok(Self { key, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn removes_fields_and_empty_hashes() {
        let cmd = Command::try_from(frame(&["HDEL", "h", "a", "b", "a"])).unwrap();
        assert_eq!(
            cmd,
            Command::Hdel(Hdel {
                key: Bytes::from("h"),
                fields: vec![Bytes::from("a"), Bytes::from("b"), Bytes::from("a")],
            })
        );

        let mut harness = Harness::new();
        harness.run(&["HSET", "h", "a", "1", "b", "2"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(2));
        assert_eq!(harness.run(&["EXISTS", "h"]), Frame::Integer(0));
        assert_eq!(harness.run(&["HDEL", "h", "a"]), Frame::Integer(0));
    }
}
