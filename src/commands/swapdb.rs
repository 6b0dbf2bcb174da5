use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Swaps two databases, so that immediately all the clients connected to a given database will
/// see the data of the other database, and the other way around.
///
/// Ref: <https://redis.io/docs/latest/commands/swapdb/>
#[derive(Debug, PartialEq)]
pub struct Swapdb {
    pub first: i64,
    pub second: i64,
}

impl Executable for Swapdb {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let first = ctx.state.db_index(self.first)?;
        let second = ctx.state.db_index(self.second)?;
        if first != second {
            let (low, high) = (first.min(second), first.max(second));
            let (head, tail) = ctx.state.dbs.split_at_mut(high);
            head[low].swap(&mut tail[0]);
        }
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Swapdb {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let first = parser.next_integer()?;
        let second = parser.next_integer()?;
        Ok(Self { first, second })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn swaps_contents() {
        let cmd = Command::try_from(frame(&["SWAPDB", "0", "1"])).unwrap();
        assert_eq!(cmd, Command::Swapdb(Swapdb { first: 0, second: 1 }));

        let mut harness = Harness::new();
        harness.run(&["SET", "k", "zero"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::ok());
        assert_eq!(harness.run(&["GET", "k"]), Frame::Null);

        harness.run(&["SELECT", "1"]);
        assert_eq!(harness.run(&["GET", "k"]), bulk("zero"));
    }

    #[test]
    fn same_database_and_bad_index() {
        let mut harness = Harness::new();
        harness.run(&["SET", "k", "v"]);
        assert_eq!(harness.run(&["SWAPDB", "0", "0"]), Frame::ok());
        assert_eq!(harness.run(&["GET", "k"]), bulk("v"));
        assert_eq!(
            harness.run(&["SWAPDB", "0", "99"]),
            CommandError::DbIndexOutOfRange.into()
        );
    }
}
