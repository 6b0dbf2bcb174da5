use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use strum_macros::{Display, EnumString};

use crate::error::CommandError;
use crate::sorted_set::SortedSet;

/// Largest string value a command may produce.
pub const MAX_STRING_LEN: usize = 512 * 1024 * 1024;

/// Rejects a string that would grow past `MAX_STRING_LEN`.
pub fn check_string_len(len: usize) -> Result<(), CommandError> {
    if len > MAX_STRING_LEN {
        Err(CommandError::StringTooLong)
    } else {
        Ok(())
    }
}

/// A value stored under a key. Empty collections are never stored: a key whose collection
/// becomes empty is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(Bytes),
    List(VecDeque<Bytes>),
    Hash(Hash),
    Set(BTreeSet<Bytes>),
    SortedSet(SortedSet),
}

/// Name of a value kind, as reported by TYPE and accepted by SCAN's TYPE option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ValueType {
    String,
    List,
    Hash,
    Set,
    #[strum(serialize = "zset")]
    SortedSet,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Hash(_) => ValueType::Hash,
            Value::Set(_) => ValueType::Set,
            Value::SortedSet(_) => ValueType::SortedSet,
        }
    }

    /// Strings exist even when empty; collections only while they hold something.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(_) => false,
            Value::List(list) => list.is_empty(),
            Value::Hash(hash) => hash.is_empty(),
            Value::Set(set) => set.is_empty(),
            Value::SortedSet(zset) => zset.is_empty(),
        }
    }
}

/// Field/value map that reports fields in insertion order, like a small hash on a real server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(Bytes, Bytes)>", into = "Vec<(Bytes, Bytes)>")]
pub struct Hash {
    fields: HashMap<Bytes, (u64, Bytes)>,
    next_seq: u64,
}

impl Hash {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &[u8]) -> Option<&Bytes> {
        self.fields.get(field).map(|(_, value)| value)
    }

    pub fn contains(&self, field: &[u8]) -> bool {
        self.fields.contains_key(field)
    }

    /// Inserts or overwrites a field. Returns true when the field is new. An overwritten field
    /// keeps its position.
    pub fn insert(&mut self, field: Bytes, value: Bytes) -> bool {
        if let Some(slot) = self.fields.get_mut(&field) {
            slot.1 = value;
            return false;
        }
        self.fields.insert(field, (self.next_seq, value));
        self.next_seq += 1;
        true
    }

    pub fn remove(&mut self, field: &[u8]) -> bool {
        self.fields.remove(field).is_some()
    }

    /// Fields and values in insertion order.
    pub fn entries(&self) -> Vec<(&Bytes, &Bytes)> {
        let mut entries: Vec<_> = self.fields.iter().collect();
        entries.sort_unstable_by_key(|(_, (seq, _))| *seq);
        entries
            .into_iter()
            .map(|(field, (_, value))| (field, value))
            .collect()
    }
}

impl PartialEq for Hash {
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
    }
}

impl From<Vec<(Bytes, Bytes)>> for Hash {
    fn from(entries: Vec<(Bytes, Bytes)>) -> Self {
        let mut hash = Hash::default();
        for (field, value) in entries {
            hash.insert(field, value);
        }
        hash
    }
}

impl From<Hash> for Vec<(Bytes, Bytes)> {
    fn from(hash: Hash) -> Self {
        hash.entries()
            .into_iter()
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn value_type_names() {
        assert_eq!(ValueType::SortedSet.to_string(), "zset");
        assert_eq!(ValueType::String.to_string(), "string");
        assert_eq!(ValueType::from_str("ZSET"), Ok(ValueType::SortedSet));
        assert_eq!(ValueType::from_str("Hash"), Ok(ValueType::Hash));
        assert!(ValueType::from_str("stream").is_err());
    }

    #[test]
    fn empty_strings_still_exist() {
        assert!(!Value::String(Bytes::new()).is_empty());
        assert!(Value::List(VecDeque::new()).is_empty());
    }

    #[test]
    fn hash_keeps_insertion_order() {
        let mut hash = Hash::default();
        assert!(hash.insert(Bytes::from("b"), Bytes::from("1")));
        assert!(hash.insert(Bytes::from("a"), Bytes::from("2")));
        assert!(!hash.insert(Bytes::from("b"), Bytes::from("3")));

        let fields: Vec<_> = hash.entries().into_iter().map(|(f, v)| (f.clone(), v.clone())).collect();
        assert_eq!(
            fields,
            vec![
                (Bytes::from("b"), Bytes::from("3")),
                (Bytes::from("a"), Bytes::from("2")),
            ]
        );

        assert!(hash.remove(b"b"));
        assert!(!hash.remove(b"b"));
        hash.insert(Bytes::from("b"), Bytes::from("4"));
        assert_eq!(hash.entries()[1].0, &Bytes::from("b"));
    }
}
