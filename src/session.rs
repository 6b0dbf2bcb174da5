use bytes::Bytes;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::db::{ClientId, Database};
use crate::frame::Frame;
use crate::transaction::Transaction;

/// Per-connection state that commands read and change: the selected database, the open
/// transaction, the watched keys and the pub/sub subscription count.
#[derive(Debug)]
pub struct Session {
    pub(crate) id: ClientId,
    pub(crate) db: usize,
    pub(crate) transaction: Option<Transaction>,
    pub(crate) watches: HashSet<(usize, Bytes)>,
    /// Set by the databases when any watched key is written.
    pub(crate) watch_dirty: Arc<AtomicBool>,
    /// Woken by the databases when a key this client is blocked on is written.
    pub(crate) waker: Arc<Notify>,
    /// Channels plus patterns this client is subscribed to.
    pub(crate) subscriptions: usize,
    pub(crate) inbox: UnboundedSender<Frame>,
}

impl Session {
    pub(crate) fn new(inbox: UnboundedSender<Frame>) -> Self {
        Self {
            id: Uuid::new_v4(),
            db: 0,
            transaction: None,
            watches: HashSet::new(),
            watch_dirty: Arc::new(AtomicBool::new(false)),
            waker: Arc::new(Notify::new()),
            subscriptions: 0,
            inbox,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub(crate) fn watch(&mut self, dbs: &mut [Database], key: Bytes) {
        dbs[self.db].watch(key.clone(), self.id, self.watch_dirty.clone());
        self.watches.insert((self.db, key));
    }

    /// Drops every watch and resets the invalidation flag.
    pub(crate) fn unwatch_all(&mut self, dbs: &mut [Database]) {
        for (db, key) in self.watches.drain() {
            if let Some(db) = dbs.get_mut(db) {
                db.unwatch(&key, &self.id);
            }
        }
        self.watch_dirty.store(false, Ordering::SeqCst);
    }

    /// Whether any watched key was written since it was watched.
    pub(crate) fn watch_violated(&self) -> bool {
        self.watch_dirty.load(Ordering::SeqCst)
    }

    /// Pushes a frame to this client's own inbox.
    pub(crate) fn push(&self, frame: Frame) {
        // The receiving half lives as long as the client does.
        let _ = self.inbox.send(frame);
    }
}
