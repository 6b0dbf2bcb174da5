use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Move `key` from the currently selected database to the specified destination database. When
/// `key` already exists in the destination database, or it does not exist in the source
/// database, it does nothing.
///
/// Ref: <https://redis.io/docs/latest/commands/move/>
#[derive(Debug, PartialEq)]
pub struct Move {
    pub key: Bytes,
    pub db: i64,
}

impl Executable for Move {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let source = ctx.session.db;
        let destination = ctx.state.db_index(self.db)?;
        if source == destination {
            return Err(CommandError::SameObject);
        }

        let dbs = &mut ctx.state.dbs;
        if !dbs[source].contains(&self.key) || dbs[destination].contains(&self.key) {
            return Ok(Frame::Integer(0));
        }
        let Some(entry) = dbs[source].remove(&self.key) else {
            return Ok(Frame::Integer(0));
        };
        dbs[destination].insert(self.key, entry);

        Ok(Frame::Integer(1))
    }
}

impl TryFrom<&mut CommandParser> for Move {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let db = parser.next_integer()?;
        Ok(Self { key, db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn moves_the_entry_with_its_expiry() {
        let cmd = Command::try_from(frame(&["MOVE", "k", "1"])).unwrap();
        assert_eq!(
            cmd,
            Command::Move(Move {
                key: Bytes::from("k"),
                db: 1,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "k", "v", "EX", "50"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.run(&["EXISTS", "k"]), Frame::Integer(0));

        harness.run(&["SELECT", "1"]);
        assert_eq!(harness.run(&["GET", "k"]), bulk("v"));
        assert_eq!(harness.run(&["TTL", "k"]), Frame::Integer(50));
    }

    #[test]
    fn nothing_to_move() {
        let mut harness = Harness::new();
        assert_eq!(harness.run(&["MOVE", "k", "1"]), Frame::Integer(0));

        harness.run(&["SET", "k", "a"]);
        harness.run(&["SELECT", "1"]);
        harness.run(&["SET", "k", "b"]);
        harness.run(&["SELECT", "0"]);
        assert_eq!(harness.run(&["MOVE", "k", "1"]), Frame::Integer(0));
        assert_eq!(harness.run(&["GET", "k"]), bulk("a"));
    }

    #[test]
    fn invalid_destination() {
        let mut harness = Harness::new();
        harness.run(&["SET", "k", "v"]);
        assert_eq!(
            harness.run(&["MOVE", "k", "0"]),
            CommandError::SameObject.into()
        );
        assert_eq!(
            harness.run(&["MOVE", "k", "16"]),
            CommandError::DbIndexOutOfRange.into()
        );
    }
}
