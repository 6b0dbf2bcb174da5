use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Sets the list element at `index` to `element`.
///
/// Ref: <https://redis.io/docs/latest/commands/lset/>
#[derive(Debug, PartialEq)]
pub struct Lset {
    pub key: Bytes,
    pub index: i64,
    pub element: Bytes,
}

impl Executable for Lset {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.list()?.is_none() {
            return Err(CommandError::NoSuchKey);
        }

        let list = key.list_mut()?;
        let index = if self.index < 0 {
            self.index + list.len() as i64
        } else {
            self.index
        };
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| list.get_mut(i))
            .ok_or(CommandError::IndexOutOfRange)?;
        *slot = self.element;
        key.updated();

        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Lset {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let index = parser.next_integer()?;
        let element = parser.next_bytes()?;
        Ok(Self {
            key,
            index,
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
    fn replaces_elements() {
        let cmd = Command::try_from(frame(&["LSET", "l", "-1", "z"])).unwrap();
        assert_eq!(
            cmd,
            Command::Lset(Lset {
                key: Bytes::from("l"),
                index: -1,
                element: Bytes::from("z"),
            })
        );

        let mut harness = Harness::new();
        harness.run(&["RPUSH", "l", "a", "b"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::ok());
        assert_eq!(harness.run(&["LRANGE", "l", "0", "-1"]), bulks(&["a", "z"]));
    }

    #[test]
    fn errors() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(&["LSET", "l", "0", "x"]),
            Frame::Error("ERR no such key".to_string())
        );
        harness.run(&["RPUSH", "l", "a"]);
        assert_eq!(
            harness.run(&["LSET", "l", "1", "x"]),
            Frame::Error("ERR index out of range".to_string())
        );
    }
}
