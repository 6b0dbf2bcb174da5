use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::list::End;
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Removes and returns the first (LPOP) or last (RPOP) elements of the list stored at `key`.
/// Without a count the reply is a single element; with one it is an array of up to `count`
/// elements.
///
/// Ref: <https://redis.io/docs/latest/commands/lpop/>
#[derive(Debug, PartialEq)]
pub struct Pop {
    pub key: Bytes,
    pub count: Option<usize>,
    pub end: End,
}

impl Executable for Pop {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let mut key = ctx.db().key(self.key);
        if key.list()?.is_none() {
            return Ok(match self.count {
                Some(_) => Frame::NullArray,
                None => Frame::Null,
            });
        }

        let list = key.list_mut()?;
        let frame = match self.count {
            None => Frame::bulk_or_null(self.end.pop(list)),
            Some(count) => {
                let popped: Vec<Bytes> = (0..count).map_while(|_| self.end.pop(list)).collect();
                Frame::array_of_bulks(popped)
            }
        };
        key.updated();

        Ok(frame)
    }
}

impl TryFrom<&mut CommandParser> for Pop {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let end = if parser.name() == "lpop" {
            End::Left
        } else {
            End::Right
        };
        let key = parser.next_bytes()?;
        let count = match parser.remaining() {
            0 => None,
            1 => {
                let count = parser.next_integer()?;
                if count < 0 {
                    return Err(CommandError::NotPositive);
                }
                Some(count as usize)
            }
            _ => return Err(CommandError::Syntax),
        };
        Ok(Self { key, count, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn pops_one_element() {
        let cmd = Command::try_from(frame(&["RPOP", "l"])).unwrap();
        assert_eq!(
            cmd,
            Command::Pop(Pop {
                key: Bytes::from("l"),
                count: None,
                end: End::Right,
            })
        );

        let mut harness = Harness::new();
        harness.run(&["RPUSH", "l", "a", "b"]);
        assert_eq!(harness.exec(cmd).unwrap(), bulk("b"));
        assert_eq!(harness.run(&["LPOP", "l"]), bulk("a"));
        assert_eq!(harness.run(&["EXISTS", "l"]), Frame::Integer(0));
        assert_eq!(harness.run(&["LPOP", "l"]), Frame::Null);
    }

    #[test]
    fn pops_with_a_count() {
        let mut harness = Harness::new();
        harness.run(&["RPUSH", "l", "a", "b", "c"]);
        assert_eq!(harness.run(&["LPOP", "l", "2"]), bulks(&["a", "b"]));
        assert_eq!(harness.run(&["RPOP", "l", "0"]), bulks(&[]));
        assert_eq!(harness.run(&["RPOP", "l", "5"]), bulks(&["c"]));
        assert_eq!(harness.run(&["RPOP", "l", "5"]), Frame::NullArray);
    }

    #[test]
    fn bad_counts() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(&["LPOP", "l", "-1"]),
            Frame::Error("ERR value is out of range, must be positive".to_string())
        );
        assert_eq!(
            harness.run(&["LPOP", "l", "1", "2"]),
            CommandError::Syntax.into()
        );
    }
}
