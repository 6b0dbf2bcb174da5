use bytes::Bytes;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, instrument};

use crate::blocking::{self, Blocking};
use crate::commands::executable::{Context, Executable};
use crate::commands::table;
use crate::commands::{self, Command};
use crate::db::ClientId;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::server::Server;
use crate::session::Session;

/// One logical connection to a `Server`.
///
/// Commands run one at a time against the shared state. Pub/sub confirmations and messages are
/// pushed to an inbox read with `next_message`. Dropping the client is a disconnect: its
/// transaction, watches and subscriptions go with it.
pub struct Client {
    server: Server,
    session: Session,
    inbox: UnboundedReceiver<Frame>,
}

enum Outcome {
    Reply(Frame),
    Block(Box<dyn Blocking>),
}

impl Client {
    pub(crate) fn new(server: Server) -> Self {
        let (tx, inbox) = mpsc::unbounded_channel();
        let session = Session::new(tx);
        info!(client = %session.id(), "client connected");

        Self {
            server,
            session,
            inbox,
        }
    }

    pub fn id(&self) -> ClientId {
        self.session.id()
    }

    /// Runs one command and returns its reply. Failures are error replies, never panics.
    ///
    /// Blocking commands suspend here until they are served or time out; other clients keep
    /// running in the meantime.
    #[instrument(name = "client", skip_all, fields(client = %self.session.id))]
    pub async fn execute<I, A>(&mut self, argv: I) -> Frame
    where
        I: IntoIterator<Item = A>,
        A: Into<Bytes>,
    {
        let frame = Frame::Array(argv.into_iter().map(|a| Frame::Bulk(a.into())).collect());

        match self.dispatch(frame) {
            Outcome::Reply(reply) => reply,
            Outcome::Block(cmd) => blocking::wait(&self.server, &mut self.session, cmd).await,
        }
    }

    /// Waits for the next pushed frame: a subscription confirmation or a published message.
    pub async fn next_message(&mut self) -> Option<Frame> {
        self.inbox.recv().await
    }

    /// The next pushed frame, if one is already waiting.
    pub fn try_next_message(&mut self) -> Option<Frame> {
        self.inbox.try_recv().ok()
    }

    // Everything up to the point where a command may need to wait happens under the lock, and
    // the lock is released before any waiting starts.
    fn dispatch(&mut self, frame: Frame) -> Outcome {
        let mut state = self.server.lock();
        let mut ctx = Context::new(&mut state, &mut self.session);
        dispatch(&mut ctx, frame)
    }
}

fn dispatch(ctx: &mut Context<'_>, frame: Frame) -> Outcome {
    if matches!(&frame, Frame::Array(parts) if parts.is_empty()) {
        return Outcome::Reply(Frame::NoReply);
    }

    let spec = match commands::resolve(&frame) {
        Ok(spec) => spec,
        Err(err) => return Outcome::Reply(reject(ctx, err)),
    };

    if ctx.session.subscriptions > 0 && !spec.has(table::PUBSUB) {
        return Outcome::Reply(reject(ctx, CommandError::PubSubContext));
    }

    if let Some(transaction) = ctx.session.transaction.as_mut() {
        if !spec.has(table::IMMEDIATE) {
            transaction.push(frame);
            return Outcome::Reply(Frame::Simple("QUEUED".to_string()));
        }
    }

    let cmd = match Command::try_from(frame) {
        Ok(cmd) => cmd,
        Err(err) => return Outcome::Reply(err.into()),
    };
    debug!(command = spec.name, "executing");

    let cmd = if spec.has(table::BLOCKING) {
        match cmd.into_blocking() {
            Ok(cmd) => return Outcome::Block(cmd),
            Err(cmd) => cmd,
        }
    } else {
        cmd
    };
    Outcome::Reply(cmd.exec(ctx).unwrap_or_else(Frame::from))
}

// A command rejected before it could be queued poisons the open transaction. EXEC itself
// failing this way aborts the transaction on the spot.
fn reject(ctx: &mut Context<'_>, err: CommandError) -> Frame {
    let Some(transaction) = ctx.session.transaction.as_mut() else {
        return err.into();
    };

    if matches!(&err, CommandError::WrongArity(name) if name == "exec") {
        ctx.session.transaction = None;
        let dbs = &mut ctx.state.dbs;
        ctx.session.unwatch_all(dbs);
        let message = err.to_string();
        let message = message.strip_prefix("ERR ").unwrap_or(&message);
        return CommandError::ExecAbortBecause(message.to_string()).into();
    }

    transaction.fail();
    err.into()
}

impl Drop for Client {
    fn drop(&mut self) {
        let mut state = self.server.lock();
        self.session.transaction = None;
        self.session.unwatch_all(&mut state.dbs);
        state.pubsub.remove_client(&self.session.id);
        info!(client = %self.session.id, "client disconnected");
    }
}
