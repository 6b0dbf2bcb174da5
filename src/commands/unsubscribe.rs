use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// UNSUBSCRIBE and PUNSUBSCRIBE. Without arguments the client leaves every channel, or every
/// pattern. Confirmations are pushed like those of SUBSCRIBE.
///
/// Ref: <https://redis.io/docs/latest/commands/unsubscribe/>
#[derive(Debug, PartialEq)]
pub struct Unsubscribe {
    pub targets: Vec<Bytes>,
    pub pattern: bool,
}

impl Executable for Unsubscribe {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let kind = if self.pattern {
            "punsubscribe"
        } else {
            "unsubscribe"
        };
        let session = &mut *ctx.session;
        let pubsub = &mut ctx.state.pubsub;

        let targets = if !self.targets.is_empty() {
            self.targets
        } else if self.pattern {
            pubsub.patterns_of(&session.id)
        } else {
            pubsub.channels_of(&session.id)
        };

        if targets.is_empty() {
            session.push(Frame::Array(vec![
                Frame::bulk(kind),
                Frame::Null,
                Frame::Integer(session.subscriptions as i64),
            ]));
            return Ok(Frame::NoReply);
        }

        for target in targets {
            let removed = if self.pattern {
                pubsub.punsubscribe(&target, &session.id)
            } else {
                pubsub.unsubscribe(&target, &session.id)
            };
            if removed {
                session.subscriptions -= 1;
            }
            session.push(Frame::Array(vec![
                Frame::bulk(kind),
                Frame::Bulk(target),
                Frame::Integer(session.subscriptions as i64),
            ]));
        }
        Ok(Frame::NoReply)
    }
}

impl TryFrom<&mut CommandParser> for Unsubscribe {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pattern = parser.name() == "punsubscribe";
        let targets = parser.rest()?;
        Ok(Self { targets, pattern })
    }
}
