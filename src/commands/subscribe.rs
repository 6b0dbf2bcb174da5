use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// SUBSCRIBE and PSUBSCRIBE. Each new subscription is confirmed by a `[kind, name, count]`
/// frame pushed to the client's inbox; the command itself has no direct reply.
///
/// Ref: <https://redis.io/docs/latest/commands/subscribe/>
#[derive(Debug, PartialEq)]
pub struct Subscribe {
    pub targets: Vec<Bytes>,
    pub pattern: bool,
}

impl Executable for Subscribe {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let kind = if self.pattern { "psubscribe" } else { "subscribe" };
        let session = &mut *ctx.session;
        let pubsub = &mut ctx.state.pubsub;

        for target in self.targets {
            let added = if self.pattern {
                pubsub.psubscribe(target.clone(), session.id, session.inbox.clone())
            } else {
                pubsub.subscribe(target.clone(), session.id, session.inbox.clone())
            };
            if added {
                session.subscriptions += 1;
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

impl TryFrom<&mut CommandParser> for Subscribe {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pattern = parser.name() == "psubscribe";
        let targets = parser.rest()?;
        Ok(Self { targets, pattern })
    }
}
