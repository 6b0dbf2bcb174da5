use bytes::Bytes;
use std::time::Duration;

use crate::blocking::Blocking;
use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::format_score;

/// BZPOPMIN and BZPOPMAX: pop the lowest or highest scored member from the first non-empty
/// sorted set among `keys`, waiting up to `timeout` for one to receive data. Replies with the
/// key, the member and its score.
///
/// Ref: <https://redis.io/docs/latest/commands/bzpopmin/>
#[derive(Debug, PartialEq)]
pub struct Bzpop {
    pub keys: Vec<Bytes>,
    pub timeout: Option<Duration>,
    pub max: bool,
}

impl Blocking for Bzpop {
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
            match key.zset() {
                Ok(Some(_)) => {}
                Ok(None) => continue,
                Err(err) if first_pass => return Err(err),
                Err(_) => continue,
            }

            let popped = key.zset_mut()?.pop(1, self.max);
            key.updated();
            if let Some((member, score)) = popped.into_iter().next() {
                return Ok(Some(Frame::Array(vec![
                    Frame::Bulk(name.clone()),
                    Frame::Bulk(member),
                    Frame::Bulk(format_score(score)),
                ])));
            }
        }
        Ok(None)
    }
}

impl Executable for Bzpop {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        self.attempt(ctx, true).map(|frame| frame.unwrap_or(Frame::NullArray))
    }
}

impl TryFrom<&mut CommandParser> for Bzpop {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let max = parser.name() == "bzpopmax";
        let mut keys = Vec::with_capacity(parser.remaining());
        while parser.remaining() > 1 {
            keys.push(parser.next_bytes()?);
        }
        let timeout = parser.next_timeout()?;
        Ok(Self { keys, timeout, max })
    }
}
