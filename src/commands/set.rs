use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

// Deadlines are kept in seconds but must stay representable as signed milliseconds.
const MAX_DEADLINE_MS: f64 = 9_223_372_036_854_775_808.0;

/// An expiry option shared by SET and GETEX.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    /// Seconds from now.
    Ex(i64),
    /// Milliseconds from now.
    Px(i64),
    /// Unix time in seconds.
    ExAt(i64),
    /// Unix time in milliseconds.
    PxAt(i64),
}

impl Expiry {
    /// Reads the amount following an `EX`/`PX`/`EXAT`/`PXAT` token. Only strictly positive
    /// amounts are valid.
    pub(crate) fn parse(
        token: &str,
        parser: &mut CommandParser,
    ) -> Result<Option<Self>, CommandError> {
        let build: fn(i64) -> Expiry = match token {
            "EX" => Expiry::Ex,
            "PX" => Expiry::Px,
            "EXAT" => Expiry::ExAt,
            "PXAT" => Expiry::PxAt,
            _ => return Ok(None),
        };
        let amount = parser.next_integer()?;
        if amount <= 0 {
            return Err(CommandError::InvalidExpire(parser.name().to_string()));
        }
        Ok(Some(build(amount)))
    }

    /// The absolute deadline in seconds.
    pub fn deadline(&self, now: f64, command: &str) -> Result<f64, CommandError> {
        let deadline = match *self {
            Expiry::Ex(secs) => now + secs as f64,
            Expiry::Px(ms) => now + ms as f64 / 1000.0,
            Expiry::ExAt(secs) => secs as f64,
            Expiry::PxAt(ms) => ms as f64 / 1000.0,
        };
        if deadline * 1000.0 >= MAX_DEADLINE_MS {
            return Err(CommandError::InvalidExpire(command.to_string()));
        }
        Ok(deadline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Only set the key if it does not already exist.
    Nx,
    /// Only set the key if it already exists.
    Xx,
}

/// Set `key` to hold the string `value`. If `key` already holds a value, it is overwritten,
/// regardless of its type. Any previous time to live associated with the key is discarded on
/// successful SET operation unless `KEEPTTL` is given.
///
/// Ref: <https://redis.io/docs/latest/commands/set/>
#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: Bytes,
    pub value: Bytes,
    pub condition: Option<Condition>,
    pub expiry: Option<Expiry>,
    pub keep_ttl: bool,
    /// Return the old string stored at key, or nil if key did not exist.
    pub get: bool,
}

impl Executable for Set {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let now = ctx.state.now();
        let deadline = self
            .expiry
            .map(|expiry| expiry.deadline(now, "set"))
            .transpose()?;

        let mut key = ctx.db().key(self.key);
        let old = if self.get {
            key.string()?.cloned()
        } else {
            None
        };
        let reply = if self.get {
            Frame::bulk_or_null(old)
        } else {
            Frame::ok()
        };

        let blocked = match self.condition {
            Some(Condition::Nx) => key.exists(),
            Some(Condition::Xx) => !key.exists(),
            None => false,
        };
        if blocked {
            return Ok(match reply {
                Frame::Simple(_) => Frame::Null,
                reply => reply,
            });
        }

        if self.keep_ttl {
            key.update(Value::String(self.value));
        } else {
            key.replace(Value::String(self.value));
        }
        if deadline.is_some() {
            key.set_expire_at(deadline);
        }

        Ok(reply)
    }
}

impl TryFrom<&mut CommandParser> for Set {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let value = parser.next_bytes()?;

        let mut nx = false;
        let mut xx = false;
        let mut get = false;
        let mut keep_ttl = false;
        let mut expiries = Vec::new();

        while parser.has_next() {
            let token = parser.next_token()?;
            match token.as_str() {
                "NX" => nx = true,
                "XX" => xx = true,
                "GET" => get = true,
                "KEEPTTL" => keep_ttl = true,
                token => match Expiry::parse(token, parser)? {
                    Some(expiry) => expiries.push(expiry),
                    None => return Err(CommandError::Syntax),
                },
            }
        }

        if (nx && xx) || expiries.len() + usize::from(keep_ttl) > 1 {
            return Err(CommandError::Syntax);
        }
        let condition = match (nx, xx) {
            (true, _) => Some(Condition::Nx),
            (_, true) => Some(Condition::Xx),
            _ => None,
        };

        Ok(Self {
            key,
            value,
            condition,
            expiry: expiries.pop(),
            keep_ttl,
            get,
        })
    }
}
