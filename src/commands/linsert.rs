use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Inserts `element` in the list stored at `key` either before or after the first occurrence of
/// `pivot`. Replies with the new length, 0 when the key does not exist and -1 when the pivot
/// was not found.
///
/// Ref: <https://redis.io/docs/latest/commands/linsert/>
#[derive(Debug, PartialEq)]
pub struct Linsert {
    pub key: Bytes,
    pub after: bool,
    pub pivot: Bytes,
    pub element: Bytes,
}

impl Executable for Linsert {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.list()?.is_none() {
            return Ok(Frame::Integer(0));
        }

        let list = key.list_mut()?;
        let Some(index) = list.iter().position(|item| *item == self.pivot) else {
            return Ok(Frame::Integer(-1));
        };
        let index = if self.after { index + 1 } else { index };
        list.insert(index, self.element);
        let len = list.len();
        key.updated();

        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Linsert {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let after = match parser.next_token()?.as_str() {
            "BEFORE" => false,
            "AFTER" => true,
            _ => return Err(CommandError::Syntax),
        };
        let pivot = parser.next_bytes()?;
        let element = parser.next_bytes()?;
        Ok(Self {
            key,
            after,
            pivot,
            element,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn inserts_around_the_pivot() {
        let cmd = Command::try_from(frame(&["LINSERT", "l", "before", "b", "x"])).unwrap();
        assert_eq!(
            cmd,
            Command::Linsert(Linsert {
                key: Bytes::from("l"),
                after: false,
                pivot: Bytes::from("b"),
                element: Bytes::from("x"),
            })
        );

        let mut harness = Harness::new();
        harness.run(&["RPUSH", "l", "a", "b"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(3));
        assert_eq!(harness.run(&["LINSERT", "l", "AFTER", "b", "y"]), Frame::Integer(4));
        assert_eq!(
            harness.run(&["LRANGE", "l", "0", "-1"]),
            bulks(&["a", "x", "b", "y"])
        );
        assert_eq!(harness.run(&["LINSERT", "l", "AFTER", "zz", "y"]), Frame::Integer(-1));
        assert_eq!(harness.run(&["LINSERT", "nope", "AFTER", "b", "y"]), Frame::Integer(0));
    }

    #[test]
    fn bad_position() {
        assert_eq!(
            Command::try_from(frame(&["LINSERT", "l", "AROUND", "b", "x"])),
            Err(CommandError::Syntax)
        );
    }
}
