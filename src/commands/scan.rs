use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::scan::{scan, ScanArgs};

/// Incrementally iterates the keys of the selected database.
///
/// Ref: <https://redis.io/docs/latest/commands/scan/>
#[derive(Debug, PartialEq)]
pub struct Scan {
    pub args: ScanArgs,
}

impl Executable for Scan {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        let keys = db.keys().into_iter().map(|key| (key, ()));
        let (cursor, batch) = scan(keys, self.args.cursor, self.args.count);

        let mut found = Vec::with_capacity(batch.len());
        for (key, ()) in batch {
            if !self.args.matches(&key) {
                continue;
            }
            let admitted = db
                .get(&key)
                .is_some_and(|entry| self.args.admits_type(entry.value.value_type()));
            if admitted {
                found.push(Frame::Bulk(key));
            }
        }

        Ok(Frame::Array(vec![
            Frame::bulk(cursor.to_string()),
            Frame::Array(found),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Scan {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let args = ScanArgs::parse(parser, true)?;
        Ok(Self { args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;
    use bytes::Bytes;
    use std::collections::BTreeSet;

    fn scan_all(harness: &mut Harness, extra: &[&str]) -> BTreeSet<Bytes> {
        let mut cursor = "0".to_string();
        let mut seen = BTreeSet::new();
        loop {
            let mut argv = vec!["SCAN", cursor.as_str()];
            argv.extend_from_slice(extra);
            let Frame::Array(reply) = harness.run(&argv) else {
                panic!("expected an array");
            };
            let [Frame::Bulk(next), Frame::Array(keys)] = &reply[..] else {
                panic!("unexpected reply shape");
            };
            for key in keys {
                if let Frame::Bulk(key) = key {
                    seen.insert(key.clone());
                }
            }
            cursor = String::from_utf8(next.to_vec()).unwrap();
            if cursor == "0" {
                return seen;
            }
        }
    }

    #[test]
    fn parse() {
        let cmd = Command::try_from(frame(&["SCAN", "0", "MATCH", "k*", "COUNT", "5", "TYPE", "list"]))
            .unwrap();
        assert_eq!(
            cmd,
            Command::Scan(Scan {
                args: ScanArgs {
                    cursor: 0,
                    pattern: Some(Bytes::from("k*")),
                    count: 5,
                    kind: Some("list".to_string()),
                }
            })
        );
        assert_eq!(
            Command::try_from(frame(&["SCAN", "x"])),
            Err(CommandError::InvalidCursor)
        );
        assert_eq!(
            Command::try_from(frame(&["SCAN", "0", "COUNT", "0"])),
            Err(CommandError::Syntax)
        );
    }

    #[test]
    fn visits_every_key() {
        let mut harness = Harness::new();
        for i in 0..50 {
            harness.run(&["SET", &format!("key:{}", i), "v"]);
        }
        for i in 0..5 {
            harness.run(&["RPUSH", &format!("list:{}", i), "v"]);
        }

        assert_eq!(scan_all(&mut harness, &["COUNT", "7"]).len(), 55);
        assert_eq!(scan_all(&mut harness, &["MATCH", "list:*"]).len(), 5);
        assert_eq!(scan_all(&mut harness, &["TYPE", "list"]).len(), 5);
        assert!(scan_all(&mut harness, &["TYPE", "stream"]).is_empty());
    }
}
