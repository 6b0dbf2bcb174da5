use bytes::Bytes;
use std::time::Duration;

use crate::blocking::Blocking;
use crate::commands::executable::{Context, Executable};
use crate::commands::list::{move_element, End};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// The blocking variant of LMOVE, and BRPOPLPUSH as its RIGHT/LEFT form: waits up to `timeout`
/// for `source` to hold an element.
///
/// Ref: <https://redis.io/docs/latest/commands/blmove/>
#[derive(Debug, PartialEq)]
pub struct Blmove {
    pub source: Bytes,
    pub destination: Bytes,
    pub from: End,
    pub to: End,
    pub timeout: Option<Duration>,
}

impl Blocking for Blmove {
    fn keys(&self) -> &[Bytes] {
        std::slice::from_ref(&self.source)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn attempt(
        &self,
        ctx: &mut Context<'_>,
        first_pass: bool,
    ) -> Result<Option<Frame>, CommandError> {
        let moved = move_element(
            ctx.db(),
            &self.source,
            &self.destination,
            self.from,
            self.to,
            first_pass,
        )?;
        Ok(moved.map(Frame::Bulk))
    }
}

impl Executable for Blmove {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        self.attempt(ctx, true).map(|frame| frame.unwrap_or(Frame::NullArray))
    }
}

impl TryFrom<&mut CommandParser> for Blmove {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = parser.next_bytes()?;
        let destination = parser.next_bytes()?;
        let (from, to) = if parser.name() == "brpoplpush" {
            (End::Right, End::Left)
        } else {
            (End::parse(parser)?, End::parse(parser)?)
        };
        let timeout = parser.next_timeout()?;
        Ok(Self {
            source,
            destination,
            from,
            to,
            timeout,
        })
    }
}
