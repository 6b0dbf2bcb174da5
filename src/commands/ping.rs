use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns PONG if no argument is provided, otherwise return a copy of the argument as a bulk.
/// A subscribed client gets `["pong", message]` instead.
///
/// Ref: <https://redis.io/docs/latest/commands/ping/>
#[derive(Debug, PartialEq)]
pub struct Ping {
    pub msg: Option<Bytes>,
}

impl Executable for Ping {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        if ctx.session.subscriptions > 0 {
            return Ok(Frame::Array(vec![
                Frame::bulk("pong"),
                Frame::Bulk(self.msg.unwrap_or_default()),
            ]));
        }

        match self.msg {
            Some(msg) => Ok(Frame::Bulk(msg)),
            None => Ok(Frame::Simple("PONG".to_string())),
        }
    }
}

impl TryFrom<&mut CommandParser> for Ping {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        if parser.remaining() > 1 {
            return Err(CommandError::WrongArity(parser.name().to_string()));
        }
        let msg = match parser.has_next() {
            true => Some(parser.next_bytes()?),
            false => None,
        };
        Ok(Self { msg })
    }
}
