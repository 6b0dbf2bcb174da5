use bytes::Bytes;
use itertools::Itertools;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::db::Entry;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Sets the given keys to their respective values. MSET replaces existing values with new
/// values, just as regular SET.
///
/// Ref: <https://redis.io/docs/latest/commands/mset/>
#[derive(Debug, PartialEq)]
pub struct Mset {
    pub pairs: Vec<(Bytes, Bytes)>,
}

impl Executable for Mset {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        for (key, value) in self.pairs {
            db.insert(key, Entry::new(Value::String(value)));
        }
        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Mset {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pairs = parse_pairs(parser)?;
        Ok(Self { pairs })
    }
}

/// Reads the remaining arguments as key/value pairs. An odd count is an arity error.
pub(crate) fn parse_pairs(parser: &mut CommandParser) -> Result<Vec<(Bytes, Bytes)>, CommandError> {
    if parser.remaining() % 2 != 0 {
        return Err(CommandError::WrongArity(parser.name().to_string()));
    }
    Ok(parser.rest()?.into_iter().tuples().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn sets_every_pair() {
        let cmd = Command::try_from(frame(&["MSET", "key1", "Hello", "key2", "World"])).unwrap();
        assert_eq!(
            cmd,
            Command::Mset(Mset {
                pairs: vec![
                    (Bytes::from("key1"), Bytes::from("Hello")),
                    (Bytes::from("key2"), Bytes::from("World")),
                ]
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "key1", "old", "EX", "10"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::ok());
        assert_eq!(harness.run(&["GET", "key1"]), bulk("Hello"));
        assert_eq!(harness.run(&["TTL", "key1"]), Frame::Integer(-1));
    }

    #[test]
    fn odd_arguments() {
        assert_eq!(
            Command::try_from(frame(&["MSET", "a", "1", "b"])),
            Err(CommandError::WrongArity("mset".to_string()))
        );
    }
}
