use bytes::Bytes;

use crate::commands::executable::{Context, Executable};
use crate::commands::setop::{combine, SetOperator};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the cardinality of the union of the HyperLogLogs at `keys`.
///
/// Ref: <https://redis.io/docs/latest/commands/pfcount/>
#[derive(Debug, PartialEq)]
pub struct Pfcount {
    pub keys: Vec<Bytes>,
}

impl Executable for Pfcount {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let union = combine(ctx.db(), SetOperator::Union, &self.keys)?;
        Ok(Frame::Integer(union.len() as i64))
    }
}

impl TryFrom<&mut CommandParser> for Pfcount {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.rest()?;
        Ok(Self { keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{frame, Harness};
    use crate::commands::Command;

    #[test]
    fn counts_the_union() {
        let cmd = Command::try_from(frame(&["PFCOUNT", "h1", "h2"])).unwrap();
        assert_eq!(
            cmd,
            Command::Pfcount(Pfcount {
                keys: vec![Bytes::from("h1"), Bytes::from("h2")],
            })
        );

        let mut harness = Harness::new();
        harness.run(&["PFADD", "h1", "a", "b"]);
        harness.run(&["PFADD", "h2", "b", "c"]);
        assert_eq!(harness.exec(cmd).unwrap(), Frame::Integer(3));
        assert_eq!(harness.run(&["PFCOUNT", "missing"]), Frame::Integer(0));
    }
}
