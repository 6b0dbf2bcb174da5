//! Helpers shared by the list commands.

use bytes::Bytes;
use std::collections::VecDeque;

use crate::commands::CommandParser;
use crate::db::Database;
use crate::error::CommandError;

/// Which end of a list an element is pushed to or popped from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum End {
    Left,
    Right,
}

impl End {
    /// Parses `LEFT` or `RIGHT`, in any case.
    pub(crate) fn parse(parser: &mut CommandParser) -> Result<Self, CommandError> {
        match parser.next_token()?.as_str() {
            "LEFT" => Ok(End::Left),
            "RIGHT" => Ok(End::Right),
            _ => Err(CommandError::Syntax),
        }
    }

    pub fn pop(self, list: &mut VecDeque<Bytes>) -> Option<Bytes> {
        match self {
            End::Left => list.pop_front(),
            End::Right => list.pop_back(),
        }
    }

    pub fn push(self, list: &mut VecDeque<Bytes>, value: Bytes) {
        match self {
            End::Left => list.push_front(value),
            End::Right => list.push_back(value),
        }
    }
}

/// Pops an element from one end of `source` and pushes it onto one end of `destination`.
/// Returns `None` when the source list is empty or missing.
///
/// With `strict_source` unset, a source of the wrong kind reads as empty instead of failing.
/// The destination is always type checked, before anything moves.
pub(crate) fn move_element(
    db: &mut Database,
    source: &Bytes,
    destination: &Bytes,
    from: End,
    to: End,
    strict_source: bool,
) -> Result<Option<Bytes>, CommandError> {
    match db.key(source.clone()).list() {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(None),
        Err(err) if strict_source => return Err(err),
        Err(_) => return Ok(None),
    }
    db.key(destination.clone()).list()?;

    let element = {
        let mut src = db.key(source.clone());
        let element = from.pop(src.list_mut()?);
        src.updated();
        element
    };
    let Some(element) = element else {
        return Ok(None);
    };

    let mut dst = db.key(destination.clone());
    to.push(dst.list_mut()?, element.clone());
    dst.updated();
    Ok(Some(element))
}
