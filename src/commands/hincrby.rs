use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{format_int, parse_int};

/// Increments the number stored at `field` in the hash stored at `key` by `increment`. A missing
/// field starts at 0.
///
/// Ref: <https://redis.io/docs/latest/commands/hincrby/>
#[derive(Debug, PartialEq)]
pub struct Hincrby {
    pub key: Bytes,
    pub field: Bytes,
    pub increment: i64,
}

impl Executable for Hincrby {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let current = match key.hash()?.and_then(|hash| hash.get(&self.field)) {
            Some(value) => parse_int(value).ok_or(CommandError::HashNotInteger)?,
            None => 0,
        };
        let result = current
            .checked_add(self.increment)
            .ok_or(CommandError::Overflow)?;

        key.hash_mut()?.insert(self.field, format_int(result));
        key.updated();
        Ok(Frame::Integer(result))
    }
}

impl TryFrom<&mut CommandParser> for Hincrby {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let field = parser.next_bytes()?;
        let increment = parser.next_integer()?;
        Ok(Self {
            key,
            field,
            increment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn increments_fields() {
        let cmd = Command::try_from(frame(&["HINCRBY", "h", "f", "5"])).unwrap();
        assert_eq!(
            cmd,
            Command::Hincrby(Hincrby {
                key: Bytes::from("h"),
                field: Bytes::from("f"),
                increment: 5,
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(5));
        assert_eq!(harness.run(&["HINCRBY", "h", "f", "-7"]), Frame::Integer(-2));
        assert_eq!(harness.run(&["HGET", "h", "f"]), bulk("-2"));
    }

    #[test]
    fn non_integer_field() {
        let mut harness = Harness::new();
        harness.run(&["HSET", "h", "f", "abc"]);
        assert_eq!(
            harness.run(&["HINCRBY", "h", "f", "1"]),
            Frame::Error("ERR hash value is not an integer".to_string())
        );
        harness.run(&["HSET", "h", "g", "9223372036854775807"]);
        assert_eq!(
            harness.run(&["HINCRBY", "h", "g", "1"]),
            CommandError::Overflow.into()
        );
    }
}
