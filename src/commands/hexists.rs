use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns whether `field` is an existing field in the hash stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/hexists/>
#[derive(Debug, PartialEq)]
pub struct Hexists {
    pub key: Bytes,
    pub field: Bytes,
}

impl Executable for Hexists {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let exists = key.hash()?.is_some_and(|hash| hash.contains(&self.field));
        Ok(Frame::Integer(i64::from(exists)))
    }
}

impl TryFrom<&mut CommandParser> for Hexists {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let field = parser.next_bytes()?;
        Ok(Self { key, field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn reports_membership() {
        let cmd = Command::try_from(frame(&["HEXISTS", "h", "f"])).unwrap();
        assert_eq!(
            cmd,
            Command::Hexists(Hexists {
                key: Bytes::from("h"),
                field: Bytes::from("f"),
            })
        );

        let mut harness = Harness::new();
        harness.run(&["HSET", "h", "f", "v"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.run(&["HEXISTS", "h", "g"]), Frame::Integer(0));
        assert_eq!(harness.run(&["HEXISTS", "nope", "f"]), Frame::Integer(0));
    }
}
