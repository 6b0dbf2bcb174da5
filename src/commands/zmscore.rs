use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::format_score;

/// Returns the scores of the given members, with a null for each one that is absent.
///
/// Ref: <https://redis.io/docs/latest/commands/zmscore/>
#[derive(Debug, PartialEq)]
pub struct Zmscore {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Zmscore {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let zset = key.zset()?;
        let frames = self
            .members
            .iter()
            .map(|member| {
                let score = zset.and_then(|zset| zset.score(member));
                Frame::bulk_or_null(score.map(format_score))
            })
            .collect();
        Ok(Frame::Array(frames))
    }
}

impl TryFrom<&mut CommandParser> for Zmscore {
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
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn scores_of_each() {
        let cmd = Command::try_from(frame(&["ZMSCORE", "z", "a", "x"])).unwrap();
        assert_eq!(
            cmd,
            Command::Zmscore(Zmscore {
                key: Bytes::from("z"),
                members: vec![Bytes::from("a"), Bytes::from("x")],
            })
        );

        let mut harness = Harness::new();
        harness.run(&["ZADD", "z", "2", "a"]);
        assert_eq!(
            harness.exec(cmd).unwrap(),
            Frame::Array(vec![bulk("2"), Frame::Null])
        );
    }
}
