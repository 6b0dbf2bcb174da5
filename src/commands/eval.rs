use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::scripting;

/// Where the script of an EVAL call comes from.
#[derive(Debug, PartialEq)]
pub enum Source {
    Text(Bytes),
    /// Hex SHA1 of a cached script, in any case.
    Sha(String),
}

/// EVAL and EVALSHA: run a Lua script against the selected database.
///
/// Ref: <https://redis.io/docs/latest/commands/eval/>
#[derive(Debug, PartialEq)]
pub struct Eval {
    pub source: Source,
    pub keys: Vec<Bytes>,
    pub args: Vec<Bytes>,
}

impl Executable for Eval {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let (sha, script) = match self.source {
            // EVAL caches its script too, so EVALSHA can reuse it.
            Source::Text(script) => (ctx.state.scripts.load(script.clone()), script),
            Source::Sha(sha) => {
                let sha = sha.to_lowercase();
                let script = ctx.state.scripts.get(&sha).ok_or(CommandError::NoScript)?;
                (sha, script)
            }
        };
        scripting::run(ctx, &sha, &script, &self.keys, &self.args)
    }
}

impl TryFrom<&mut CommandParser> for Eval {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = match parser.name() {
            "evalsha" => Source::Sha(parser.next_string()?),
            _ => Source::Text(parser.next_bytes()?),
        };

        let numkeys = parser.next_integer()?;
        if numkeys < 0 {
            return Err(CommandError::NegativeKeys);
        }
        let numkeys = numkeys as usize;
        if numkeys > parser.remaining() {
            return Err(CommandError::TooManyKeys);
        }

        let mut keys = Vec::with_capacity(numkeys);
        for _ in 0..numkeys {
            keys.push(parser.next_bytes()?);
        }
        let args = parser.rest()?;

        Ok(Self { source, keys, args })
    }
}
