use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::sadd::add_members;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Adds elements to a HyperLogLog. Counting here is exact: the structure is a plain set, so
/// the reply is 1 whenever an element was new.
///
/// Ref: <https://redis.io/docs/latest/commands/pfadd/>
#[derive(Debug, PartialEq)]
pub struct Pfadd {
    pub key: Bytes,
    pub elements: Vec<Bytes>,
}

impl Executable for Pfadd {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let added = add_members(ctx, self.key, self.elements)?;
        Ok(Frame::Integer(i64::from(added > 0)))
    }
}

impl TryFrom<&mut CommandParser> for Pfadd {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let elements = parser.rest()?;
        Ok(Self { key, elements })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn reports_changes() {
        let cmd = Command::try_from(frame(&["PFADD", "h", "a", "b"])).unwrap();
        assert_eq!(
            cmd,
            Command::Pfadd(Pfadd {
                key: Bytes::from("h"),
                elements: vec![Bytes::from("a"), Bytes::from("b")],
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.run(&["PFADD", "h", "a"]), Frame::Integer(0));
    }
}
