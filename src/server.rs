use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::client::Client;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::db::Database;
use crate::error::CommandError;
use crate::pubsub::PubSub;
use crate::scripting::ScriptCache;

/// Everything shared by the clients of one server. Only reachable through `Server::lock`, so
/// commands from different clients never interleave.
#[derive(Debug)]
pub struct State {
    pub(crate) dbs: Vec<Database>,
    pub(crate) scripts: ScriptCache,
    pub(crate) pubsub: PubSub,
    /// Unix time of the last SAVE or BGSAVE.
    pub(crate) last_save: i64,
    pub(crate) rng: StdRng,
    now: f64,
}

impl State {
    pub(crate) fn new(config: &Config, now: f64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut dbs: Vec<Database> = (0..config.databases.max(1))
            .map(|_| Database::default())
            .collect();
        for db in dbs.iter_mut() {
            db.set_now(now);
        }

        Self {
            dbs,
            scripts: ScriptCache::default(),
            pubsub: PubSub::default(),
            last_save: now as i64,
            rng,
            now,
        }
    }

    /// Current time, as read when the lock was taken.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub(crate) fn tick(&mut self, now: f64) {
        self.now = now;
        for db in self.dbs.iter_mut() {
            db.set_now(now);
        }
    }

    /// Validates a database index argument.
    pub(crate) fn db_index(&self, index: i64) -> Result<usize, CommandError> {
        usize::try_from(index)
            .ok()
            .filter(|index| *index < self.dbs.len())
            .ok_or(CommandError::DbIndexOutOfRange)
    }
}

struct Inner {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

/// The server aggregate: databases, script cache, pub/sub registries and the clock, shared by
/// every client created from it. Cloning is cheap and yields a handle to the same server.
#[derive(Clone)]
pub struct Server {
    inner: Arc<Inner>,
}

impl Server {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds a server whose expiry math reads time from `clock`.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        info!(databases = config.databases, seed = ?config.seed, "starting server");
        let state = State::new(&config, clock.now());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                clock,
            }),
        }
    }

    /// Opens a new logical connection.
    pub fn client(&self) -> Client {
        Client::new(self.clone())
    }

    /// Takes the server-wide lock and refreshes the time every database sees. Key handles write
    /// back on unwind, so a poisoned lock still guards consistent data.
    pub(crate) fn lock(&self) -> MutexGuard<'_, State> {
        let mut state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.tick(self.inner.clock.now());
        state
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn lock_refreshes_the_clock() {
        let clock = Arc::new(ManualClock::new(100.0));
        let server = Server::with_clock(Config::default(), clock.clone());
        assert_eq!(server.lock().now(), 100.0);

        clock.advance(2.5);
        let state = server.lock();
        assert_eq!(state.now(), 102.5);
        assert_eq!(state.dbs[3].now(), 102.5);
    }

    #[test]
    fn database_indexes_are_checked() {
        let config = Config {
            databases: 4,
            seed: Some(1),
        };
        let server = Server::with_config(config);
        let state = server.lock();
        assert_eq!(state.db_index(3), Ok(3));
        assert_eq!(state.db_index(4), Err(CommandError::DbIndexOutOfRange));
        assert_eq!(state.db_index(-1), Err(CommandError::DbIndexOutOfRange));
    }
}
