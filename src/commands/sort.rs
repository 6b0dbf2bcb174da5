use bytes::Bytes;
use ordered_float::OrderedFloat;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::db::Database;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{parse_float_with, FloatRules};
use crate::value::Value;

/// Returns or stores the elements contained in the list, set or sorted set at `key`.
///
/// Elements are compared as numbers unless `ALPHA` is given. `BY` sorts by the values of
/// other keys (a pattern without `*` skips sorting), `GET` fetches other keys instead of the
/// elements themselves and `STORE` writes the result to a list.
///
/// Ref: <https://redis.io/docs/latest/commands/sort/>
#[derive(Debug, PartialEq)]
pub struct Sort {
    pub key: Bytes,
    pub desc: bool,
    pub alpha: bool,
    /// Offset and count. A negative count means everything after the offset.
    pub limit: Option<(i64, i64)>,
    pub by: Option<Bytes>,
    pub get: Vec<Bytes>,
    pub store: Option<Bytes>,
}

impl Executable for Sort {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();
        let (mut items, ordered): (Vec<Bytes>, bool) = match db.get(&self.key).map(|entry| &entry.value) {
            None => (Vec::new(), false),
            Some(Value::List(list)) => (list.iter().cloned().collect(), true),
            Some(Value::Set(set)) => (set.iter().cloned().collect(), false),
            Some(Value::SortedSet(zset)) => {
                (zset.iter().map(|(member, _)| member.clone()).collect(), true)
            }
            Some(_) => return Err(CommandError::WrongType),
        };

        let by = self.by.clone().unwrap_or_else(|| Bytes::from_static(b"#"));
        let sort = !self.by.as_ref().is_some_and(|by| !by.contains(&b'*'));
        if sort {
            self.sort(db, &mut items, &by)?;
        } else if ordered {
            items.reverse();
        }

        let (offset, count) = self.limit.unwrap_or((0, -1));
        let len = items.len();
        let start = offset.max(0) as usize;
        let end = if count < 0 {
            len
        } else {
            start.saturating_add(count as usize)
        };
        let range = if start >= len {
            0..0
        } else {
            start..end.min(len)
        };

        let get = if self.get.is_empty() {
            vec![Bytes::from_static(b"#")]
        } else {
            self.get
        };
        let mut out = Vec::with_capacity(range.len() * get.len());
        for item in &items[range] {
            for pattern in &get {
                out.push(lookup(db, item, pattern));
            }
        }

        match self.store {
            Some(store) => {
                let list: Vec<Bytes> = out.into_iter().map(Option::unwrap_or_default).collect();
                let len = list.len();
                let mut key = db.key(store);
                if list.is_empty() {
                    key.delete();
                } else {
                    key.replace(Value::List(list.into()));
                }
                Ok(Frame::Integer(len as i64))
            }
            None => Ok(Frame::Array(out.into_iter().map(Frame::bulk_or_null).collect())),
        }
    }
}

impl Sort {
    fn sort(&self, db: &mut Database, items: &mut Vec<Bytes>, by: &[u8]) -> Result<(), CommandError> {
        if self.alpha {
            let mut keyed: Vec<(Option<Bytes>, Bytes)> = items
                .drain(..)
                .map(|item| (lookup(db, &item, by), item))
                .collect();
            if self.desc {
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
            } else {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            }
            items.extend(keyed.into_iter().map(|(_, item)| item));
        } else {
            let mut keyed = Vec::with_capacity(items.len());
            for item in items.drain(..) {
                let score = match lookup(db, &item, by) {
                    Some(value) => parse_float_with(&value, FloatRules::SORT)
                        .ok_or(CommandError::SortScore)?,
                    None => 0.0,
                };
                keyed.push(((OrderedFloat(score), item.clone()), item));
            }
            if self.desc {
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
            } else {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            }
            items.extend(keyed.into_iter().map(|(_, item)| item));
        }
        Ok(())
    }
}

/// Resolves a `BY`/`GET` pattern for one element: `#` is the element itself, the first `*` is
/// replaced by the element, and a `->field` suffix reads a hash field instead of a string.
fn lookup(db: &mut Database, item: &Bytes, pattern: &[u8]) -> Option<Bytes> {
    if pattern == b"#" {
        return Some(item.clone());
    }
    let star = pattern.iter().position(|b| *b == b'*')?;
    let (prefix, suffix) = (&pattern[..star], &pattern[star + 1..]);

    // The field name after `->` must not be empty.
    let arrow = suffix
        .get(..suffix.len().saturating_sub(1))
        .and_then(|head| head.windows(2).position(|w| w == b"->"));
    let (suffix, field) = match arrow {
        Some(arrow) => (&suffix[..arrow], Some(&suffix[arrow + 2..])),
        None => (suffix, None),
    };

    let mut name = Vec::with_capacity(prefix.len() + item.len() + suffix.len());
    name.extend_from_slice(prefix);
    name.extend_from_slice(item);
    name.extend_from_slice(suffix);

    match (&db.get(&name)?.value, field) {
        (Value::Hash(hash), Some(field)) => hash.get(field).cloned(),
        (Value::String(value), None) => Some(value.clone()),
        _ => None,
    }
}

impl TryFrom<&mut CommandParser> for Sort {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let mut cmd = Self {
            key,
            desc: false,
            alpha: false,
            limit: None,
            by: None,
            get: Vec::new(),
            store: None,
        };

        while parser.has_next() {
            match parser.next_token()?.as_str() {
                "ASC" => cmd.desc = false,
                "DESC" => cmd.desc = true,
                "ALPHA" => cmd.alpha = true,
                "LIMIT" if parser.remaining() >= 2 => {
                    let offset = parser.next_integer().map_err(|_| CommandError::Syntax)?;
                    let count = parser.next_integer().map_err(|_| CommandError::Syntax)?;
                    cmd.limit = Some((offset, count));
                }
                "STORE" => cmd.store = Some(parser.next_bytes()?),
                "BY" => cmd.by = Some(parser.next_bytes()?),
                "GET" => cmd.get.push(parser.next_bytes()?),
                _ => return Err(CommandError::Syntax),
            }
        }

        Ok(cmd)
    }
}
