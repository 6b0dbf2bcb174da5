use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Renames `key` to `newkey`, carrying its expiry along. Also answers to RENAMENX, which only
/// renames when `newkey` does not exist yet.
///
/// Ref: <https://redis.io/docs/latest/commands/rename/>
#[derive(Debug, PartialEq)]
pub struct Rename {
    pub key: Bytes,
    pub newkey: Bytes,
    pub nx: bool,
}

impl Executable for Rename {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        if !db.contains(&self.key) {
            return Err(CommandError::NoSuchKey);
        }
        if self.nx && db.contains(&self.newkey) {
            return Ok(Frame::Integer(0));
        }

        if self.key != self.newkey {
            if let Some(entry) = db.remove(&self.key) {
                db.insert(self.newkey, entry);
            }
        }

        Ok(if self.nx {
            Frame::Integer(1)
        } else {
            Frame::ok()
        })
    }
}

impl TryFrom<&mut CommandParser> for Rename {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let nx = parser.name() == "renamenx";
        let key = parser.next_bytes()?;
        let newkey = parser.next_bytes()?;
        Ok(Self { key, newkey, nx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn rename() {
        let cmd = Command::try_from(frame(&["RENAME", "mykey", "myotherkey"])).unwrap();
        assert_eq!(
            cmd,
            Command::Rename(Rename {
                key: Bytes::from("mykey"),
                newkey: Bytes::from("myotherkey"),
                nx: false,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", "Hello", "EX", "30"]);
        harness.run(&["SET", "myotherkey", "old"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::ok());
        assert_eq!(harness.run(&["GET", "myotherkey"]), bulk("Hello"));
        assert_eq!(harness.run(&["TTL", "myotherkey"]), Frame::Integer(30));
        assert_eq!(harness.run(&["EXISTS", "mykey"]), Frame::Integer(0));
    }

    #[test]
    fn missing_source() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(&["RENAME", "a", "b"]),
            CommandError::NoSuchKey.into()
        );
        assert_eq!(
            harness.run(&["RENAMENX", "a", "b"]),
            CommandError::NoSuchKey.into()
        );
    }

    #[test]
    fn renamenx() {
        let mut harness = Harness::new();
        harness.run(&["MSET", "a", "1", "b", "2"]);
        assert_eq!(harness.run(&["RENAMENX", "a", "b"]), Frame::Integer(0));
        assert_eq!(harness.run(&["RENAMENX", "a", "c"]), Frame::Integer(1));
        assert_eq!(harness.run(&["GET", "c"]), bulk("1"));
    }

    #[test]
    fn onto_itself() {
        let mut harness = Harness::new();
        harness.run(&["SET", "a", "1"]);
        assert_eq!(harness.run(&["RENAME", "a", "a"]), Frame::ok());
        assert_eq!(harness.run(&["GET", "a"]), bulk("1"));
    }
}
