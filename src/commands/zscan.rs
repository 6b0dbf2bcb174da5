use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::zrange::scored_reply;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::scan::{scan, ScanArgs};

/// Incrementally iterates the members of a sorted set, with their scores.
///
/// Ref: <https://redis.io/docs/latest/commands/zscan/>
#[derive(Debug, PartialEq)]
pub struct Zscan {
    pub key: Bytes,
    pub args: ScanArgs,
}

impl Executable for Zscan {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let members: Vec<(Bytes, f64)> = key
            .zset()?
            .map(|zset| zset.iter().map(|(member, score)| (member.clone(), score)).collect())
            .unwrap_or_default();

        let (cursor, batch) = scan(members, self.args.cursor, self.args.count);
        let found = batch
            .into_iter()
            .filter(|(member, _)| self.args.matches(member));

        Ok(Frame::Array(vec![
            Frame::bulk(cursor.to_string()),
            scored_reply(found, true),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Zscan {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let args = ScanArgs::parse(parser, false)?;
        Ok(Self { key, args })
    }
}
