use bytes::Bytes;
use std::time::Duration;

use crate::blocking::Blocking;
use crate::commands::executable::{Context, Executable};
use crate::commands::list::End;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// BLPOP and BRPOP: pop from the first non-empty list among `keys`, waiting up to `timeout`
/// for one to receive data. Replies with the key and the popped element.
///
/// Ref: <https://redis.io/docs/latest/commands/blpop/>
#[derive(Debug, PartialEq)]
pub struct Bpop {
    pub keys: Vec<Bytes>,
    pub timeout: Option<Duration>,
    pub end: End,
}

impl Blocking for Bpop {
    fn keys(&self) -> &[Bytes] {
        &self.keys
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn attempt(
        &self,
        ctx: &mut Context<'_>,
        first_pass: bool,
    ) -> Result<Option<Frame>, CommandError> {
        let db = ctx.db();
        for name in &self.keys {
            let mut key = db.key(name.clone());
            match key.list() {
                Ok(Some(_)) => {}
                Ok(None) => continue,
                Err(err) if first_pass => return Err(err),
                Err(_) => continue,
            }

            let element = self.end.pop(key.list_mut()?);
            key.updated();
            if let Some(element) = element {
                return Ok(Some(Frame::Array(vec![
                    Frame::Bulk(name.clone()),
                    Frame::Bulk(element),
                ])));
            }
        }
        Ok(None)
    }
}

impl Executable for Bpop {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        self.attempt(ctx, true).map(|frame| frame.unwrap_or(Frame::NullArray))
    }
}

impl TryFrom<&mut CommandParser> for Bpop {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let end = if parser.name() == "blpop" {
            End::Left
        } else {
            End::Right
        };
        let mut keys = Vec::with_capacity(parser.remaining());
        while parser.remaining() > 1 {
            keys.push(parser.next_bytes()?);
        }
        let timeout = parser.next_timeout()?;
        Ok(Self { keys, timeout, end })
    }
}
