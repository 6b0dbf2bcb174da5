use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

const MAX_DEADLINE_MS: f64 = 9_223_372_036_854_775_808.0;

/// Which of the four expiry commands was called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpireKind {
    /// EXPIRE: seconds from now.
    Relative,
    /// PEXPIRE: milliseconds from now.
    RelativeMillis,
    /// EXPIREAT: Unix time in seconds.
    Absolute,
    /// PEXPIREAT: Unix time in milliseconds.
    AbsoluteMillis,
}

impl ExpireKind {
    fn deadline(self, amount: i64, now: f64) -> f64 {
        let amount = amount as f64;
        match self {
            ExpireKind::Relative => now + amount,
            ExpireKind::RelativeMillis => now + amount / 1000.0,
            ExpireKind::Absolute => amount,
            ExpireKind::AbsoluteMillis => amount / 1000.0,
        }
    }
}

/// Set a timeout on `key`. After the timeout has expired, the key will automatically be
/// deleted. Answers to EXPIRE, PEXPIRE, EXPIREAT and PEXPIREAT.
///
/// A key without an expiry counts as expiring at infinity for `GT` and `LT`.
///
/// Ref: <https://redis.io/docs/latest/commands/expire/>
#[derive(Debug, PartialEq)]
pub struct Expire {
    pub key: Bytes,
    pub amount: i64,
    pub kind: ExpireKind,
    /// Set expiry only when the key has no expiry.
    pub nx: bool,
    /// Set expiry only when the key has an existing expiry.
    pub xx: bool,
    /// Set expiry only when the new expiry is greater than the current one.
    pub gt: bool,
    /// Set expiry only when the new expiry is less than the current one.
    pub lt: bool,
    command: &'static str,
}

impl Executable for Expire {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        let deadline = self.kind.deadline(self.amount, key.now());
        if deadline * 1000.0 >= MAX_DEADLINE_MS {
            return Err(CommandError::InvalidExpire(self.command.to_string()));
        }
        if !key.exists() {
            return Ok(Frame::Integer(0));
        }

        let current = key.expire_at();
        let allowed = (!self.nx || current.is_none())
            && (!self.xx || current.is_some())
            && (!self.gt || current.is_some_and(|current| deadline > current))
            && (!self.lt || current.map_or(true, |current| deadline < current));
        if !allowed {
            return Ok(Frame::Integer(0));
        }

        if deadline <= key.now() {
            key.delete();
        } else {
            key.set_expire_at(Some(deadline));
        }
        Ok(Frame::Integer(1))
    }
}

impl TryFrom<&mut CommandParser> for Expire {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let command = parser.name();
        let kind = match command {
            "pexpire" => ExpireKind::RelativeMillis,
            "expireat" => ExpireKind::Absolute,
            "pexpireat" => ExpireKind::AbsoluteMillis,
            _ => ExpireKind::Relative,
        };
        let key = parser.next_bytes()?;
        let amount = parser.next_integer()?;

        let mut cmd = Self {
            key,
            amount,
            kind,
            nx: false,
            xx: false,
            gt: false,
            lt: false,
            command,
        };
        while parser.has_next() {
            let option = parser.next_string()?;
            match option.to_uppercase().as_str() {
                "NX" => cmd.nx = true,
                "XX" => cmd.xx = true,
                "GT" => cmd.gt = true,
                "LT" => cmd.lt = true,
                _ => return Err(CommandError::UnsupportedOption(option)),
            }
        }
        if (cmd.nx && (cmd.xx || cmd.gt || cmd.lt)) || (cmd.gt && cmd.lt) {
            return Err(CommandError::ExpireOptionConflict);
        }

        Ok(cmd)
    }
}
