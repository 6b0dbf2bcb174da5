use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::scan::{scan, ScanArgs};

/// Incrementally iterates the fields of a hash, replying with flat field/value pairs.
///
/// Ref: <https://redis.io/docs/latest/commands/hscan/>
#[derive(Debug, PartialEq)]
pub struct Hscan {
    pub key: Bytes,
    pub args: ScanArgs,
}

impl Executable for Hscan {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let entries: Vec<(Bytes, Bytes)> = key
            .hash()?
            .map(|hash| {
                hash.entries()
                    .into_iter()
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let (cursor, batch) = scan(entries, self.args.cursor, self.args.count);
        let found = batch
            .into_iter()
            .filter(|(field, _)| self.args.matches(field))
            .flat_map(|(field, value)| [Frame::Bulk(field), Frame::Bulk(value)])
            .collect();

        Ok(Frame::Array(vec![
            Frame::bulk(cursor.to_string()),
            Frame::Array(found),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Hscan {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let args = ScanArgs::parse(parser, false)?;
        Ok(Self { key, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn small_hash_in_one_call() {
        let cmd = Command::try_from(frame(&["HSCAN", "h", "0", "MATCH", "a*"])).unwrap();
        assert_eq!(
            cmd,
            Command::Hscan(Hscan {
                key: Bytes::from("h"),
                args: ScanArgs {
                    cursor: 0,
                    pattern: Some(Bytes::from("a*")),
                    count: 10,
                    kind: None,
                },
            })
        );

        let mut harness = Harness::new();
        harness.run(&["HSET", "h", "ab", "1", "b", "2"]);
        assert_eq!(
            harness.exec(cmd).unwrap(),
            Frame::Array(vec![bulk("0"), bulks(&["ab", "1"])])
        );
        assert_eq!(
            harness.run(&["HSCAN", "missing", "0"]),
            Frame::Array(vec![bulk("0"), bulks(&[])])
        );
    }

    #[test]
    fn type_option_is_rejected() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(&["HSCAN", "h", "0", "TYPE", "string"]),
            CommandError::Syntax.into()
        );
    }
}
