use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

#[derive(Debug, PartialEq)]
pub enum Subcommand {
    Load(Bytes),
    Exists(Vec<String>),
    Flush,
}

/// Manages the script cache: SCRIPT LOAD, SCRIPT EXISTS and SCRIPT FLUSH.
///
/// Ref: <https://redis.io/docs/latest/commands/script-load/>
#[derive(Debug, PartialEq)]
pub struct Script {
    pub subcommand: Subcommand,
}

impl Executable for Script {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let scripts = &mut ctx.state.scripts;
        match self.subcommand {
            Subcommand::Load(script) => Ok(Frame::bulk(scripts.load(script))),
            Subcommand::Exists(shas) => Ok(Frame::Array(
                shas.iter()
                    .map(|sha| Frame::Integer(scripts.contains(&sha.to_lowercase()) as i64))
                    .collect(),
            )),
            Subcommand::Flush => {
                scripts.flush();
                Ok(Frame::ok())
            }
        }
    }
}

impl TryFrom<&mut CommandParser> for Script {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let subcommand = match parser.next_token()?.as_str() {
            "LOAD" if parser.remaining() == 1 => Subcommand::Load(parser.next_bytes()?),
            "EXISTS" => {
                if !parser.has_next() {
                    return Err(CommandError::WrongArity("script|exists".to_string()));
                }
                let mut shas = Vec::with_capacity(parser.remaining());
                while parser.has_next() {
                    shas.push(parser.next_string()?);
                }
                Subcommand::Exists(shas)
            }
            "FLUSH" if parser.remaining() <= 1 => {
                if parser.has_next() && !matches!(parser.next_token()?.as_str(), "SYNC" | "ASYNC")
                {
                    return Err(CommandError::UnknownScriptSubcommand);
                }
                Subcommand::Flush
            }
            _ => return Err(CommandError::UnknownScriptSubcommand),
        };
        Ok(Self { subcommand })
    }
}
