//! The cursor protocol shared by SCAN, HSCAN, SSCAN and ZSCAN.
//!
//! Elements are visited in the order of a fixed hash of their name. A cursor is one more than
//! the hash of the last element returned, so deleting elements never moves an untouched
//! element behind the cursor: everything present for the whole scan is returned at least once.
//! Elements sharing a hash are always returned in the same batch.

use bytes::Bytes;
use std::str::FromStr;

use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::glob;
use crate::value::ValueType;

const DEFAULT_COUNT: usize = 10;

/// Cursor and options of one scan call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanArgs {
    pub cursor: u64,
    pub pattern: Option<Bytes>,
    pub count: usize,
    /// Only SCAN accepts `TYPE`. An unknown type name matches nothing.
    pub kind: Option<String>,
}

impl ScanArgs {
    pub(crate) fn parse(parser: &mut CommandParser, allow_type: bool) -> Result<Self, CommandError> {
        let cursor = parser.next_bytes()?;
        let cursor = std::str::from_utf8(&cursor)
            .ok()
            .and_then(|cursor| cursor.parse::<u64>().ok())
            .ok_or(CommandError::InvalidCursor)?;

        let mut args = ScanArgs {
            cursor,
            pattern: None,
            count: DEFAULT_COUNT,
            kind: None,
        };

        while parser.has_next() {
            match parser.next_token()?.as_str() {
                "MATCH" => args.pattern = Some(parser.next_bytes()?),
                "COUNT" => {
                    let count = parser.next_integer()?;
                    if count < 1 {
                        return Err(CommandError::Syntax);
                    }
                    args.count = count as usize;
                }
                "TYPE" if allow_type => args.kind = Some(parser.next_string()?),
                _ => return Err(CommandError::Syntax),
            }
        }

        Ok(args)
    }

    pub fn matches(&self, name: &[u8]) -> bool {
        self.pattern
            .as_ref()
            .map_or(true, |pattern| glob::matches(pattern, name))
    }

    pub fn admits_type(&self, value_type: ValueType) -> bool {
        self.kind
            .as_ref()
            .map_or(true, |kind| ValueType::from_str(kind).ok() == Some(value_type))
    }
}

fn hash(name: &[u8]) -> u64 {
    u64::from(crc32fast::hash(name))
}

/// Returns the next cursor and the batch of elements after `cursor`. The next cursor is 0 once
/// the enumeration is complete. Filtering by pattern is left to the caller and happens after
/// the batch is cut, so a batch may come back empty before the scan is over.
pub fn scan<T>(
    items: impl IntoIterator<Item = (Bytes, T)>,
    cursor: u64,
    count: usize,
) -> (u64, Vec<(Bytes, T)>) {
    let mut items: Vec<(u64, Bytes, T)> = items
        .into_iter()
        .map(|(name, item)| (hash(&name), name, item))
        .filter(|(hash, _, _)| *hash >= cursor)
        .collect();
    items.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut end = count.min(items.len());
    while end > 0 && end < items.len() && items[end].0 == items[end - 1].0 {
        end += 1;
    }

    let next = if end < items.len() {
        items[end - 1].0 + 1
    } else {
        0
    };
    items.truncate(end);

    (next, items.into_iter().map(|(_, name, item)| (name, item)).collect())
}
