//! Scheduler for commands that wait for data: BLPOP, BRPOP, BRPOPLPUSH, BLMOVE, BZPOPMIN and
//! BZPOPMAX.
//!
//! A blocked client registers its wake-up handle on every key it waits for and then sleeps
//! outside the server lock. Any write to one of those keys wakes it to try again. The deadline
//! is measured on tokio's clock, so tests can drive it with paused time.

use bytes::Bytes;
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::commands::executable::Context;
use crate::db::ClientId;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::server::Server;
use crate::session::Session;

pub(crate) trait Blocking: Send {
    /// Keys whose writes may let the command make progress.
    fn keys(&self) -> &[Bytes];

    /// `None` waits forever.
    fn timeout(&self) -> Option<Duration>;

    /// One non-blocking try. `Ok(None)` means nothing was available yet. A key of the wrong
    /// type fails the first pass and is skipped on later ones.
    fn attempt(&self, ctx: &mut Context<'_>, first_pass: bool)
        -> Result<Option<Frame>, CommandError>;
}

// Removes the wake-up registrations however the wait ends, including when the waiting future
// is dropped.
struct Registration<'a> {
    server: &'a Server,
    db: usize,
    client: ClientId,
    keys: Vec<Bytes>,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let mut state = self.server.lock();
        if let Some(db) = state.dbs.get_mut(self.db) {
            for key in &self.keys {
                db.unblock(key, &self.client);
            }
        }
    }
}

pub(crate) async fn wait(server: &Server, session: &mut Session, cmd: Box<dyn Blocking>) -> Frame {
    let deadline = cmd.timeout().map(|timeout| Instant::now() + timeout);
    let waker = session.waker.clone();
    let mut registration = None;

    loop {
        let outcome = {
            let mut state = server.lock();
            let mut ctx = Context::new(&mut state, session);
            let outcome = cmd.attempt(&mut ctx, registration.is_none());

            if registration.is_none() && matches!(outcome, Ok(None)) {
                let db = session.db;
                for key in cmd.keys() {
                    state.dbs[db].block(key.clone(), session.id, waker.clone());
                }
                registration = Some(Registration {
                    server,
                    db,
                    client: session.id,
                    keys: cmd.keys().to_vec(),
                });
            }
            outcome
        };

        match outcome {
            Ok(Some(frame)) => return frame,
            Err(err) => return err.into(),
            Ok(None) => {}
        }

        debug!(keys = ?cmd.keys(), "waiting for data");
        match deadline {
            Some(deadline) => {
                if time::timeout_at(deadline, waker.notified()).await.is_err() {
                    return Frame::NullArray;
                }
            }
            None => waker.notified().await,
        }
    }
}
