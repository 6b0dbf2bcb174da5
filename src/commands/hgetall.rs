use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns all fields and values of the hash stored at `key`, as a flat list.
///
/// Ref: <https://redis.io/docs/latest/commands/hgetall/>
#[derive(Debug, PartialEq)]
pub struct Hgetall {
    pub key: Bytes,
}

impl Executable for Hgetall {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let frames = match key.hash()? {
            Some(hash) => hash
                .entries()
                .into_iter()
                .flat_map(|(field, value)| [Frame::Bulk(field.clone()), Frame::Bulk(value.clone())])
                .collect(),
            None => Vec::new(),
        };
        Ok(Frame::Array(frames))
    }
}

impl TryFrom<&mut CommandParser> for Hgetall {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn insertion_order() {
        let cmd = Command::try_from(frame(&["HGETALL", "h"])).unwrap();
        assert_eq!(
            cmd,
            Command::Hgetall(Hgetall {
                key: Bytes::from("h")
            })
        );

        let mut harness = Harness::new();
        harness.run(&["HSET", "h", "z", "1", "a", "2"]);
        assert_eq!(harness.exec(cmd).unwrap(), bulks(&["z", "1", "a", "2"]));
        assert_eq!(harness.run(&["HGETALL", "missing"]), bulks(&[]));
    }
}
