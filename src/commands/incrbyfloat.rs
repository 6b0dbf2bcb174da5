use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{format_increment, parse_float};
use crate::value::Value;

/// Increment the string representing a floating point number stored at `key` by the specified
/// `increment`. If the key does not exist, it is set to 0 before performing the operation.
///
/// Ref: <https://redis.io/docs/latest/commands/incrbyfloat/>
#[derive(Debug, PartialEq)]
pub struct Incrbyfloat {
    pub key: Bytes,
    pub increment: f64,
}

impl Executable for Incrbyfloat {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let current = match key.string()? {
            Some(value) => parse_float(value).ok_or(CommandError::NotFloat)?,
            None => 0.0,
        };
        let value = current + self.increment;
        if !value.is_finite() {
            return Err(CommandError::NotFinite);
        }

        let encoded = format_increment(value);
        key.update(Value::String(encoded.clone()));
        Ok(Frame::Bulk(encoded))
    }
}

impl TryFrom<&mut CommandParser> for Incrbyfloat {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let increment = parser.next_float()?;
        Ok(Self { key, increment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn existing_key() {
        let cmd = Command::try_from(frame(&["INCRBYFLOAT", "mykey", "0.1"])).unwrap();
        assert_eq!(
            cmd,
            Command::Incrbyfloat(Incrbyfloat {
                key: Bytes::from("mykey"),
                increment: 0.1,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", "10.50"]);
        assert_eq!(harness.exec(cmd).unwrap(), bulk("10.6"));
    }

    #[test]
    fn exponent_notation() {
        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", "5.0e3"]);
        assert_eq!(harness.run(&["INCRBYFLOAT", "mykey", "2.0e2"]), bulk("5200"));
    }

    #[test]
    fn infinite_result() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(&["INCRBYFLOAT", "mykey", "inf"]),
            CommandError::NotFinite.into()
        );
        assert_eq!(harness.run(&["GET", "mykey"]), Frame::Null);
    }

    #[test]
    fn stored_value_is_not_a_float() {
        let mut harness = Harness::new();
        harness.run(&["SET", "mykey", "abc"]);
        assert_eq!(
            harness.run(&["INCRBYFLOAT", "mykey", "1"]),
            CommandError::NotFloat.into()
        );
    }
}
