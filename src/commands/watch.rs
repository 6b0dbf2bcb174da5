use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Marks the given keys to be watched for conditional execution of a transaction.
///
/// Ref: <https://redis.io/docs/latest/commands/watch/>
#[derive(Debug, PartialEq)]
pub struct Watch {
    pub keys: Vec<Bytes>,
}

impl Executable for Watch {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        if ctx.session.transaction.is_some() {
            return Err(CommandError::WatchInsideMulti);
        }
        for key in self.keys {
            ctx.session.watch(&mut ctx.state.dbs, key);
        }
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Watch {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.rest()?;
        Ok(Self { keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn any_write_violates() {
        let cmd = Command::try_from(frame(&["WATCH", "a", "b"])).unwrap();
        assert_eq!(
            cmd,
            Command::Watch(Watch {
                keys: vec![Bytes::from("a"), Bytes::from("b")],
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.exec(cmd).unwrap(), Frame::ok());
        assert!(!harness.session.watch_violated());

        harness.run(&["SET", "other", "1"]);
        assert!(!harness.session.watch_violated());

        harness.run(&["SET", "b", "1"]);
        assert!(harness.session.watch_violated());
    }

    #[test]
    fn rejected_inside_multi() {
        let mut harness = Harness::new();
        harness.run(&["MULTI"]);
        assert_eq!(
            harness.run(&["WATCH", "a"]),
            CommandError::WatchInsideMulti.into()
        );
    }
}
