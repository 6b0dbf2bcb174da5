use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::list::{move_element, End};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Atomically pops an element from one end of `source` and pushes it onto one end of
/// `destination`. RPOPLPUSH is the RIGHT/LEFT form.
///
/// Ref: <https://redis.io/docs/latest/commands/lmove/>
#[derive(Debug, PartialEq)]
pub struct Lmove {
    pub source: Bytes,
    pub destination: Bytes,
    pub from: End,
    pub to: End,
}

impl Executable for Lmove {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let moved = move_element(
            ctx.db(),
            &self.source,
            &self.destination,
            self.from,
            self.to,
            true,
        )?;
        Ok(Frame::bulk_or_null(moved))
    }
}

impl TryFrom<&mut CommandParser> for Lmove {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = parser.next_bytes()?;
        let destination = parser.next_bytes()?;
        let (from, to) = if parser.name() == "rpoplpush" {
            (End::Right, End::Left)
        } else {
            (End::parse(parser)?, End::parse(parser)?)
        };
        Ok(Self {
            source,
            destination,
            from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn moves_elements() {
        let cmd = Command::try_from(frame(&["LMOVE", "a", "b", "left", "RIGHT"])).unwrap();
        assert_eq!(
            cmd,
            Command::Lmove(Lmove {
                source: Bytes::from("a"),
                destination: Bytes::from("b"),
                from: End::Left,
                to: End::Right,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["RPUSH", "a", "1", "2", "3"]);
        assert_eq!(harness.exec(cmd).unwrap(), bulk("1"));
        assert_eq!(harness.run(&["RPOPLPUSH", "a", "b"]), bulk("3"));
        assert_eq!(harness.run(&["LRANGE", "b", "0", "-1"]), bulks(&["3", "1"]));
        assert_eq!(harness.run(&["LMOVE", "missing", "b", "LEFT", "LEFT"]), Frame::Null);
    }

    #[test]
    fn bad_direction() {
        assert_eq!(
            Command::try_from(frame(&["LMOVE", "a", "b", "UP", "LEFT"])),
            Err(CommandError::Syntax)
        );
    }
}
