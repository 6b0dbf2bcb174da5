use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the number of members of the set stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/scard/>
#[derive(Debug, PartialEq)]
pub struct Scard {
    pub key: Bytes,
}

impl Executable for Scard {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let len = key.set()?.map_or(0, |set| set.len());
        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Scard {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn cardinality() {
        let cmd = Command::try_from(frame(&["SCARD", "s"])).unwrap();
        assert_eq!(cmd, Command::Scard(Scard { key: Bytes::from("s") }));

        let mut harness = Harness::new();
        assert_eq!(harness.run(&["SCARD", "s"]), Frame::Integer(0));
        harness.run(&["SADD", "s", "a", "b"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(2));
    }
}
