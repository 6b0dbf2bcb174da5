use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::key::KeyHandle;
use crate::value::Value;

pub type ClientId = Uuid;

/// A stored value plus its optional absolute expiry, in seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: Value,
    pub expire_at: Option<f64>,
}

impl Entry {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            expire_at: None,
        }
    }
}

/// One logical database: the key space, the clients watching its keys and the clients blocked
/// waiting for its keys.
///
/// Expiry is lazy. An entry whose deadline has passed is removed the first time anything looks
/// at it, so it reads as absent from every access path.
#[derive(Debug, Default)]
pub struct Database {
    entries: HashMap<Bytes, Entry>,
    watchers: HashMap<Bytes, HashMap<ClientId, Arc<AtomicBool>>>,
    blocked: HashMap<Bytes, HashMap<ClientId, Arc<Notify>>>,
    now: f64,
}

impl Database {
    pub fn now(&self) -> f64 {
        self.now
    }

    pub(crate) fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    fn purge_if_expired(&mut self, key: &[u8]) {
        let now = self.now;
        let expired = self
            .entries
            .get(key)
            .and_then(|entry| entry.expire_at)
            .is_some_and(|at| at < now);
        if expired {
            self.entries.remove(key);
        }
    }

    fn purge_expired(&mut self) {
        let now = self.now;
        self.entries
            .retain(|_, entry| entry.expire_at.map_or(true, |at| at >= now));
    }

    pub fn get(&mut self, key: &[u8]) -> Option<&Entry> {
        self.purge_if_expired(key);
        self.entries.get(key)
    }

    pub fn contains(&mut self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Opens a read/write handle on one key. The handle writes back when dropped.
    pub fn key(&mut self, key: Bytes) -> KeyHandle<'_> {
        KeyHandle::new(self, key)
    }

    /// Removes the entry without notifying anyone. Used by `KeyHandle`, which notifies on commit.
    pub(crate) fn take(&mut self, key: &[u8]) -> Option<Entry> {
        self.purge_if_expired(key);
        self.entries.remove(key)
    }

    /// Inserts without notifying anyone. Empty collections are dropped.
    pub(crate) fn put(&mut self, key: Bytes, entry: Entry) {
        if !entry.value.is_empty() {
            self.entries.insert(key, entry);
        }
    }

    /// Installs an entry, replacing whatever was there, and notifies.
    pub fn insert(&mut self, key: Bytes, entry: Entry) {
        self.entries.remove(&key);
        self.touch(&key);
        self.put(key, entry);
    }

    /// Replaces the value under `key` and clears its expiry.
    pub fn set(&mut self, key: Bytes, value: Value) {
        self.insert(key, Entry::new(value));
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Entry> {
        let entry = self.take(key)?;
        self.touch(key);
        Some(entry)
    }

    /// Live keys, in byte order.
    pub fn keys(&mut self) -> Vec<Bytes> {
        self.purge_expired();
        let mut keys: Vec<Bytes> = self.entries.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&mut self) -> usize {
        self.purge_expired();
        self.entries.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Deletes every key, notifying watchers and blocked clients of each.
    pub fn clear(&mut self) {
        let keys: Vec<Bytes> = self.entries.drain().map(|(key, _)| key).collect();
        for key in keys {
            self.touch(&key);
        }
    }

    /// Exchanges the contents of two databases. Watchers and blocked clients stay where they
    /// are but are notified for every key that changed hands.
    pub fn swap(&mut self, other: &mut Database) {
        std::mem::swap(&mut self.entries, &mut other.entries);
        let keys: Vec<Bytes> = self.entries.keys().chain(other.entries.keys()).cloned().collect();
        for key in keys {
            self.touch(&key);
            other.touch(&key);
        }
    }

    /// Signals that `key` was written: invalidates every WATCH on it and wakes every client
    /// blocked on it.
    pub fn touch(&mut self, key: &[u8]) {
        if let Some(watchers) = self.watchers.get(key) {
            for dirty in watchers.values() {
                dirty.store(true, Ordering::SeqCst);
            }
        }
        if let Some(blocked) = self.blocked.get(key) {
            for waker in blocked.values() {
                waker.notify_one();
            }
        }
    }

    pub(crate) fn watch(&mut self, key: Bytes, client: ClientId, dirty: Arc<AtomicBool>) {
        self.watchers.entry(key).or_default().insert(client, dirty);
    }

    pub(crate) fn unwatch(&mut self, key: &[u8], client: &ClientId) {
        if let Some(watchers) = self.watchers.get_mut(key) {
            watchers.remove(client);
            if watchers.is_empty() {
                self.watchers.remove(key);
            }
        }
    }

    pub(crate) fn block(&mut self, key: Bytes, client: ClientId, waker: Arc<Notify>) {
        self.blocked.entry(key).or_default().insert(client, waker);
    }

    pub(crate) fn unblock(&mut self, key: &[u8], client: &ClientId) {
        if let Some(blocked) = self.blocked.get_mut(key) {
            blocked.remove(client);
            if blocked.is_empty() {
                self.blocked.remove(key);
            }
        }
    }
}
