use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns whether each member is a member of the set stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/smismember/>
#[derive(Debug, PartialEq)]
pub struct Smismember {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Smismember {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let set = key.set()?;
        let frames = self
            .members
            .iter()
            .map(|member| {
                let found = set.is_some_and(|set| set.contains(member));
                Frame::Integer(i64::from(found))
            })
            .collect();
        Ok(Frame::Array(frames))
    }
}

impl TryFrom<&mut CommandParser> for Smismember {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let members = parser.rest()?;
        Ok(Self { key, members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn membership_of_each() {
        let cmd = Command::try_from(frame(&["SMISMEMBER", "s", "a", "z"])).unwrap();
        assert_eq!(
            cmd,
            Command::Smismember(Smismember {
                key: Bytes::from("s"),
                members: vec![Bytes::from("a"), Bytes::from("z")],
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SADD", "s", "a"]);
        assert_eq!(
            harness.exec(cmd).unwrap(),
            Frame::Array(vec![Frame::Integer(1), Frame::Integer(0)])
        );
    }
}
