use bytes::Bytes;
use tracing::debug;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Posts a message to the given channel, replying with the number of receivers.
///
/// Ref: <https://redis.io/docs/latest/commands/publish/>
#[derive(Debug, PartialEq)]
pub struct Publish {
    pub channel: Bytes,
    pub message: Bytes,
}

impl Executable for Publish {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let receivers = ctx.state.pubsub.publish(&self.channel, &self.message);
        debug!(channel = ?self.channel, receivers, "published");
        Ok(Frame::Integer(receivers as i64))
    }
}

impl TryFrom<&mut CommandParser> for Publish {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let channel = parser.next_bytes()?;
        let message = parser.next_bytes()?;
        Ok(Self { channel, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn reaches_own_subscription() {
        let cmd = Command::try_from(frame(&["PUBLISH", "news", "hello"])).unwrap();
        assert_eq!(
            cmd,
            Command::Publish(Publish {
                channel: Bytes::from("news"),
                message: Bytes::from("hello"),
            })
        );

        let mut harness = Harness::new();
        assert_eq!(harness.run(&["PUBLISH", "news", "nobody"]), Frame::Integer(0));

        harness.run(&["SUBSCRIBE", "news"]);
        harness.pushed();
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(1));
        assert_eq!(harness.pushed(), vec![bulks(&["message", "news", "hello"])]);
    }
}
