use bytes::Bytes;
use std::collections::{BTreeSet, VecDeque};

use crate::db::{Database, Entry};
use crate::error::CommandError;
use crate::sorted_set::SortedSet;
use crate::value::{Hash, Value};

/// Read/write access to a single key for the duration of one command.
///
/// The entry is taken out of the database when the handle opens and written back when it is
/// dropped, whichever way the command exits. Typed accessors materialize an empty collection for
/// a missing key; an empty collection is never written back. If the handle was marked modified,
/// dropping it notifies the key's watchers and blocked clients.
pub struct KeyHandle<'a> {
    db: &'a mut Database,
    key: Bytes,
    value: Option<Value>,
    expire_at: Option<f64>,
    modified: bool,
}

macro_rules! typed_access {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        /// The value as this kind, `None` when the key is missing, `WRONGTYPE` for another kind.
        pub fn $get(&self) -> Result<Option<&$ty>, CommandError> {
            match &self.value {
                None => Ok(None),
                Some(Value::$variant(inner)) => Ok(Some(inner)),
                Some(_) => Err(CommandError::WrongType),
            }
        }

        /// Mutable access, starting from an empty value when the key is missing. Callers mark
        /// the handle with `updated` once they actually change something.
        pub fn $get_mut(&mut self) -> Result<&mut $ty, CommandError> {
            match self
                .value
                .get_or_insert_with(|| Value::$variant(Default::default()))
            {
                Value::$variant(inner) => Ok(inner),
                _ => Err(CommandError::WrongType),
            }
        }
    };
}

impl<'a> KeyHandle<'a> {
    pub(crate) fn new(db: &'a mut Database, key: Bytes) -> Self {
        let (value, expire_at) = match db.take(&key) {
            Some(entry) => (Some(entry.value), entry.expire_at),
            None => (None, None),
        };
        Self {
            db,
            key,
            value,
            expire_at,
            modified: false,
        }
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn now(&self) -> f64 {
        self.db.now()
    }

    /// Whether the key holds a value. Empty collections materialized by a typed accessor do not
    /// count.
    pub fn exists(&self) -> bool {
        self.value.as_ref().is_some_and(|value| !value.is_empty())
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref().filter(|value| !value.is_empty())
    }

    pub fn expire_at(&self) -> Option<f64> {
        self.expire_at
    }

    typed_access!(string, string_mut, String, Bytes);
    typed_access!(list, list_mut, List, VecDeque<Bytes>);
    typed_access!(hash, hash_mut, Hash, Hash);
    typed_access!(set, set_mut, Set, BTreeSet<Bytes>);
    typed_access!(zset, zset_mut, SortedSet, SortedSet);

    /// Replaces the value and clears any expiry.
    pub fn replace(&mut self, value: Value) {
        self.value = Some(value);
        self.expire_at = None;
        self.modified = true;
    }

    /// Replaces the value, keeping the expiry.
    pub fn update(&mut self, value: Value) {
        self.value = Some(value);
        self.modified = true;
    }

    pub fn set_expire_at(&mut self, expire_at: Option<f64>) {
        self.expire_at = expire_at;
        self.modified = true;
    }

    /// Marks the value as changed in place through one of the `_mut` accessors.
    pub fn updated(&mut self) {
        self.modified = true;
    }

    /// Deletes the key, returning what it held.
    pub fn delete(&mut self) -> Option<Value> {
        let value = self.value.take().filter(|value| !value.is_empty());
        self.expire_at = None;
        if value.is_some() {
            self.modified = true;
        }
        value
    }
}

impl Drop for KeyHandle<'_> {
    fn drop(&mut self) {
        if self.modified {
            self.db.touch(&self.key);
        }
        if let Some(value) = self.value.take() {
            self.db.put(
                self.key.clone(),
                Entry {
                    value,
                    expire_at: self.expire_at,
                },
            );
        }
    }
}
