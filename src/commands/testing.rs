//! Fixtures for the command unit tests: a server state and one client session, driven without
//! the locking and queueing of `Client`.

use bytes::Bytes;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::commands::executable::{Context, Executable};
use crate::commands::{self, Command};
use crate::config::Config;
use crate::db::Database;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::server::State;
use crate::session::Session;

/// Fixed start time, so TTL replies are predictable.
pub(crate) const NOW: f64 = 1_700_000_000.0;

/// Builds the array frame a client would send.
pub(crate) fn frame(argv: &[&str]) -> Frame {
    Frame::Array(
        argv.iter()
            .map(|arg| Frame::Bulk(Bytes::from(arg.to_string())))
            .collect(),
    )
}

pub(crate) struct Harness {
    pub(crate) state: State,
    pub(crate) session: Session,
    pub(crate) inbox: UnboundedReceiver<Frame>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let config = Config {
            databases: 16,
            seed: Some(7),
        };
        let (tx, inbox) = mpsc::unbounded_channel();
        Self {
            state: State::new(&config, NOW),
            session: Session::new(tx),
            inbox,
        }
    }

    pub(crate) fn ctx(&mut self) -> Context<'_> {
        Context::new(&mut self.state, &mut self.session)
    }

    pub(crate) fn exec(&mut self, cmd: Command) -> Result<Frame, CommandError> {
        cmd.exec(&mut self.ctx())
    }

    /// Parses and runs a command line, returning its reply or error reply.
    pub(crate) fn run(&mut self, argv: &[&str]) -> Frame {
        commands::execute(&mut self.ctx(), frame(argv))
    }

    pub(crate) fn db(&mut self) -> &mut Database {
        &mut self.state.dbs[self.session.db]
    }

    /// Moves the clock forward.
    pub(crate) fn advance(&mut self, seconds: f64) {
        let now = self.state.now() + seconds;
        self.state.tick(now);
    }

    pub(crate) fn pushed(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.inbox.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

pub(crate) fn bulk(s: &str) -> Frame {
    Frame::Bulk(Bytes::from(s.to_string()))
}

pub(crate) fn bulks(items: &[&str]) -> Frame {
    Frame::Array(items.iter().map(|s| bulk(s)).collect())
}
