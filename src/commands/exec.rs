use tracing::debug;

use crate::commands::executable::{Context, Executable};
use crate::commands::{self, CommandParser};
use crate::error::CommandError;
use crate::frame::Frame;

/// Executes all previously queued commands in a transaction and restores the connection state
/// to normal. When WATCH was used, the commands only run if none of the watched keys were
/// modified; otherwise the reply is a null array.
///
/// Ref: <https://redis.io/docs/latest/commands/exec/>
#[derive(Debug, PartialEq)]
pub struct Exec;

impl Executable for Exec {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let transaction = ctx
            .session
            .transaction
            .take()
            .ok_or(CommandError::WithoutMulti("EXEC"))?;

        let violated = ctx.session.watch_violated();
        ctx.session.unwatch_all(&mut ctx.state.dbs);

        if transaction.is_failed() {
            return Err(CommandError::ExecAbort);
        }
        if violated {
            debug!("watched key modified, transaction discarded");
            return Ok(Frame::NullArray);
        }

        let replies = transaction
            .into_queue()
            .into_iter()
            .map(|frame| commands::execute(ctx, frame))
            .collect();
        Ok(Frame::Array(replies))
    }
}

impl TryFrom<&mut CommandParser> for Exec {
    type Error = CommandError;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, frame, Harness};
    use crate::commands::Command;
    use crate::transaction::Transaction;

    #[test]
    fn replays_the_queue() {
        let cmd = Command::try_from(frame(&["EXEC"])).unwrap();
        assert_eq!(cmd, Command::Exec(Exec));

        let mut harness = Harness::new();
        let mut transaction = Transaction::default();
        transaction.push(frame(&["SET", "k", "1"]));
        transaction.push(frame(&["INCRBY", "k", "x"]));
        transaction.push(frame(&["GET", "k"]));
        harness.session.transaction = Some(transaction);

        assert_eq!(
            harness.exec(cmd).unwrap(),
            Frame::Array(vec![
                Frame::ok(),
                CommandError::NotInteger.into(),
                bulk("1"),
            ])
        );
        assert!(harness.session.transaction.is_none());
    }

    #[test]
    fn without_multi() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(&["EXEC"]),
            CommandError::WithoutMulti("EXEC").into()
        );
    }

    #[test]
    fn failed_transaction_aborts() {
        let mut harness = Harness::new();
        let mut transaction = Transaction::default();
        transaction.push(frame(&["SET", "k", "1"]));
        transaction.fail();
        harness.session.transaction = Some(transaction);

        assert_eq!(harness.run(&["EXEC"]), CommandError::ExecAbort.into());
        assert_eq!(harness.run(&["GET", "k"]), Frame::Null);
    }

    #[test]
    fn watched_write_discards() {
        let mut harness = Harness::new();
        harness.run(&["WATCH", "k"]);
        harness.run(&["SET", "k", "changed"]);
        harness.run(&["MULTI"]);
        harness
            .session
            .transaction
            .as_mut()
            .unwrap()
            .push(frame(&["SET", "k", "mine"]));

        assert_eq!(harness.run(&["EXEC"]), Frame::NullArray);
        assert_eq!(harness.run(&["GET", "k"]), bulk("changed"));
        assert!(harness.session.watches.is_empty());
    }
}
