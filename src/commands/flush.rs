use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Delete all the keys of the currently selected database (FLUSHDB) or of every database
/// (FLUSHALL). `ASYNC` and `SYNC` are accepted and behave the same.
///
/// Ref: <https://redis.io/docs/latest/commands/flushdb/>
#[derive(Debug, PartialEq)]
pub struct Flush {
    pub all: bool,
}

impl Executable for Flush {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        if self.all {
            ctx.state.dbs.iter_mut().for_each(|db| db.clear());
        } else {
            ctx.db().clear();
        }
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Flush {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let all = parser.name() == "flushall";
        if parser.has_next() {
            match parser.next_token()?.as_str() {
                "ASYNC" | "SYNC" => {}
                _ => return Err(CommandError::Syntax),
            }
        }
        parser.finish()?;
        Ok(Self { all })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn flushdb_only_touches_the_selected_database() {
        let cmd = Command::try_from(frame(&["FLUSHDB", "async"])).unwrap();
        assert_eq!(cmd, Command::Flush(Flush { all: false }));

        let mut harness = Harness::new();
        harness.run(&["SET", "a", "1"]);
        harness.run(&["SELECT", "1"]);
        harness.run(&["SET", "b", "1"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::ok());
        assert_eq!(harness.run(&["DBSIZE"]), Frame::Integer(0));
        harness.run(&["SELECT", "0"]);
        assert_eq!(harness.run(&["DBSIZE"]), Frame::Integer(1));
    }

    #[test]
    fn flushall() {
        let mut harness = Harness::new();
        harness.run(&["SET", "a", "1"]);
        harness.run(&["SELECT", "1"]);
        harness.run(&["SET", "b", "1"]);
        assert_eq!(harness.run(&["FLUSHALL"]), Frame::ok());
        assert_eq!(harness.run(&["DBSIZE"]), Frame::Integer(0));
        harness.run(&["SELECT", "0"]);
        assert_eq!(harness.run(&["DBSIZE"]), Frame::Integer(0));
    }

    #[test]
    fn bad_option() {
        assert_eq!(
            Command::try_from(frame(&["FLUSHALL", "LATER"])),
            Err(CommandError::Syntax)
        );
        assert_eq!(
            Command::try_from(frame(&["FLUSHDB", "SYNC", "SYNC"])),
            Err(CommandError::Syntax)
        );
    }
}
