use bytes::Bytes;
use std::collections::BTreeSet;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::db::Database;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetOperator {
    Diff,
    Inter,
    Union,
}

/// SDIFF, SINTER and SUNION, and their STORE forms which write the result to `destination`
/// and reply with its size.
///
/// Ref: <https://redis.io/docs/latest/commands/sinter/>
#[derive(Debug, PartialEq)]
pub struct SetOp {
    pub operator: SetOperator,
    pub destination: Option<Bytes>,
    pub keys: Vec<Bytes>,
}

/// Combines the sets stored at `keys`. Missing keys read as empty sets; any key of another
/// kind fails the whole operation.
pub(crate) fn combine(
    db: &mut Database,
    operator: SetOperator,
    keys: &[Bytes],
) -> Result<BTreeSet<Bytes>, CommandError> {
    let mut sets = Vec::with_capacity(keys.len());
    for key in keys {
        sets.push(db.key(key.clone()).set()?.cloned().unwrap_or_default());
    }

    let mut sets = sets.into_iter();
    let mut result = sets.next().unwrap_or_default();
    for set in sets {
        match operator {
            SetOperator::Diff => result.retain(|member| !set.contains(member)),
            SetOperator::Inter => result.retain(|member| set.contains(member)),
            SetOperator::Union => result.extend(set),
        }
    }
    Ok(result)
}

impl Executable for SetOp {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        let result = combine(db, self.operator, &self.keys)?;

        match self.destination {
            Some(destination) => {
                let len = result.len();
                db.key(destination).replace(Value::Set(result));
                Ok(Frame::Integer(len as i64))
            }
            None => Ok(Frame::array_of_bulks(result)),
        }
    }
}

impl TryFrom<&mut CommandParser> for SetOp {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let name = parser.name();
        let operator = if name.starts_with("sdiff") {
            SetOperator::Diff
        } else if name.starts_with("sinter") {
            SetOperator::Inter
        } else {
            SetOperator::Union
        };
        let destination = if name.ends_with("store") {
            Some(parser.next_bytes()?)
        } else {
            None
        };
        let keys = parser.rest()?;
        Ok(Self {
            operator,
            destination,
            keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    fn seeded() -> Harness {
        let mut harness = Harness::new();
        harness.run(&["SADD", "a", "1", "2", "3"]);
        harness.run(&["SADD", "b", "2", "3", "4"]);
        harness
    }

    #[test]
    fn operators() {
        let cmd = Command::try_from(frame(&["SINTER", "a", "b"])).unwrap();
        assert_eq!(
            cmd,
            Command::SetOp(SetOp {
                operator: SetOperator::Inter,
                destination: None,
                keys: vec![Bytes::from("a"), Bytes::from("b")],
            })
        );

        let mut harness = seeded();
        assert_eq!(harness.exec(cmd).unwrap(), bulks(&["2", "3"]));
        assert_eq!(harness.run(&["SDIFF", "a", "b"]), bulks(&["1"]));
        assert_eq!(harness.run(&["SUNION", "a", "b"]), bulks(&["1", "2", "3", "4"]));
        assert_eq!(harness.run(&["SINTER", "a", "missing"]), bulks(&[]));
    }

    #[test]
    fn store_forms() {
        let mut harness = seeded();
        assert_eq!(harness.run(&["SUNIONSTORE", "u", "a", "b"]), Frame::Integer(4));
        assert_eq!(harness.run(&["SMEMBERS", "u"]), bulks(&["1", "2", "3", "4"]));

        // An empty result removes the destination.
        assert_eq!(harness.run(&["SINTERSTORE", "u", "a", "missing"]), Frame::Integer(0));
        assert_eq!(harness.run(&["EXISTS", "u"]), Frame::Integer(0));
    }

    #[test]
    fn wrong_type() {
        let mut harness = seeded();
        harness.run(&["SET", "s", "x"]);
        assert_eq!(harness.run(&["SUNION", "a", "s"]), CommandError::WrongType.into());
    }
}
