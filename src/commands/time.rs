use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;

/// Returns the current server time as a two items list: a Unix timestamp and the amount of
/// microseconds already elapsed in the current second.
///
/// Ref: <https://redis.io/docs/latest/commands/time/>
#[derive(Debug, PartialEq)]
pub struct Time;

impl Executable for Time {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let now = ctx.state.now();
        let secs = now.floor();
        let micros = ((now - secs) * 1_000_000.0) as i64;
        Ok(Frame::array_of_bulks([
            (secs as i64).to_string(),
            micros.to_string(),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Time {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    #[test]
    fn reads_the_clock() {
        let cmd = Command::try_from(frame(&["TIME"])).unwrap();
        assert_eq!(cmd, Command::Time(Time));

        let mut harness = Harness::new();
        harness.advance(0.25);
        assert_eq!(
            harness.exec(cmd).unwrap(),
            bulks(&["1700000000", "250000"])
        );
    }
}
