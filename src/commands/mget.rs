use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Returns the values of all specified keys. For every key that does not hold a string value
/// or does not exist, the special value `nil` is returned. Because of this, the operation never
/// fails.
///
/// Ref: <https://redis.io/docs/latest/commands/mget/>
#[derive(Debug, PartialEq)]
pub struct Mget {
    pub keys: Vec<Bytes>,
}

impl Executable for Mget {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        let values = self
            .keys
            .iter()
            .map(|key| match db.get(key).map(|entry| &entry.value) {
                Some(Value::String(value)) => Frame::Bulk(value.clone()),
                _ => Frame::Null,
            })
            .collect();
        Ok(Frame::Array(values))
    }
}

impl TryFrom<&mut CommandParser> for Mget {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.rest()?;
        Ok(Self { keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn mixed_keys() {
        let cmd = Command::try_from(frame(&["MGET", "key1", "key2", "nonexisting", "list"]))
            .unwrap();
        assert_eq!(
            cmd,
            Command::Mget(Mget {
                keys: vec![
                    Bytes::from("key1"),
                    Bytes::from("key2"),
                    Bytes::from("nonexisting"),
                    Bytes::from("list"),
                ]
            })
        );

        let mut harness = Harness::new();
        harness.run(&["MSET", "key1", "Hello", "key2", "World"]);
        harness.run(&["LPUSH", "list", "x"]);
        assert_eq!(
            harness.exec(cmd).unwrap(),
            Frame::Array(vec![bulk("Hello"), bulk("World"), Frame::Null, Frame::Null])
        );
    }
}
