use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::mset::parse_pairs;
use crate::commands::CommandParser;
use crate::db::Entry;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

/// Sets the given keys to their respective values. MSETNX will not perform any operation at
/// all even if just a single key already exists.
///
/// Ref: <https://redis.io/docs/latest/commands/msetnx/>
#[derive(Debug, PartialEq)]
pub struct Msetnx {
    pub pairs: Vec<(Bytes, Bytes)>,
}

impl Executable for Msetnx {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        if self.pairs.iter().any(|(key, _)| db.contains(key)) {
            return Ok(Frame::Integer(0));
        }
        for (key, value) in self.pairs {
            db.insert(key, Entry::new(Value::String(value)));
        }
        Ok(Frame::Integer(1))
    }
}

impl TryFrom<&mut CommandParser> for Msetnx {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pairs = parse_pairs(parser)?;
        Ok(Self { pairs })
    }
}
