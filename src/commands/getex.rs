use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::set::Expiry;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Get the value of `key` and optionally set its expiration.
///
/// Ref: <https://redis.io/docs/latest/commands/getex/>
#[derive(Debug, PartialEq)]
pub struct Getex {
    pub key: Bytes,
    pub expiry: Option<Expiry>,
    /// Remove the time to live associated with the key.
    pub persist: bool,
}

impl Executable for Getex {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let now = ctx.state.now();
        let deadline = self
            .expiry
            .map(|expiry| expiry.deadline(now, "getex"))
            .transpose()?;

        let mut key = ctx.db().key(self.key);
        let Some(value) = key.string()?.cloned() else {
            return Ok(Frame::Null);
        };

        if deadline.is_some() {
            key.set_expire_at(deadline);
        } else if self.persist && key.expire_at().is_some() {
            key.set_expire_at(None);
        }
        Ok(Frame::Bulk(value))
    }
}

impl TryFrom<&mut CommandParser> for Getex {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let mut expiry = None;
        let mut persist = false;

        if parser.has_next() {
            let token = parser.next_token()?;
            if token == "PERSIST" {
                persist = true;
            } else {
                expiry = Some(Expiry::parse(&token, parser)?.ok_or(CommandError::Syntax)?);
            }
        }
        parser.finish()?;

        Ok(Self {
            key,
            expiry,
            persist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn sets_and_clears_the_expiry() {
        let cmd = Command::try_from(frame(&["GETEX", "k", "EX", "60"])).unwrap();
        assert_eq!(
            cmd,
            Command::Getex(Getex {
                key: Bytes::from("k"),
                expiry: Some(Expiry::Ex(60)),
                persist: false,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["SET", "k", "v"]);
        assert_eq!(harness.exec(cmd).unwrap(), bulk("v"));
        assert_eq!(harness.run(&["TTL", "k"]), Frame::Integer(60));

        assert_eq!(harness.run(&["GETEX", "k", "PERSIST"]), bulk("v"));
        assert_eq!(harness.run(&["TTL", "k"]), Frame::Integer(-1));
    }

    #[test]
    fn without_options_is_a_plain_get() {
        let mut harness = Harness::new();
        harness.run(&["SET", "k", "v", "EX", "10"]);
        assert_eq!(harness.run(&["GETEX", "k"]), bulk("v"));
        assert_eq!(harness.run(&["TTL", "k"]), Frame::Integer(10));
        assert_eq!(harness.run(&["GETEX", "missing", "EX", "10"]), Frame::Null);
    }

    #[test]
    fn only_one_option() {
        assert_eq!(
            Command::try_from(frame(&["GETEX", "k", "EX", "1", "PERSIST"])),
            Err(CommandError::Syntax)
        );
        assert_eq!(
            Command::try_from(frame(&["GETEX", "k", "KEEPTTL"])),
            Err(CommandError::Syntax)
        );
    }
}
