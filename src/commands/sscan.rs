use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::scan::{scan, ScanArgs};

/// Incrementally iterates the members of a set.
///
/// Ref: <https://redis.io/docs/latest/commands/sscan/>
#[derive(Debug, PartialEq)]
pub struct Sscan {
    pub key: Bytes,
    pub args: ScanArgs,
}

impl Executable for Sscan {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let members: Vec<(Bytes, ())> = key
            .set()?
            .map(|set| set.iter().map(|member| (member.clone(), ())).collect())
            .unwrap_or_default();

        let (cursor, batch) = scan(members, self.args.cursor, self.args.count);
        let found = batch
            .into_iter()
            .map(|(member, ())| member)
            .filter(|member| self.args.matches(member))
            .map(Frame::Bulk)
            .collect();

        Ok(Frame::Array(vec![
            Frame::bulk(cursor.to_string()),
            Frame::Array(found),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Sscan {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let args = ScanArgs::parse(parser, false)?;
        Ok(Self { key, args })
    }
}
