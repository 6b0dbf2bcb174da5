//! Sorted set data structure: dual-indexed by score and member.
//!
//! Members are ordered by (score, member), ties in score broken by member byte order. A sorted
//! `Vec<(OrderedFloat<f64>, Bytes)>` answers rank and range queries by binary search, and a
//! `HashMap<Bytes, f64>` answers member→score lookups. Scores are never NaN and `-0` is stored
//! as `0`.

use std::collections::HashMap;
use std::ops::Range;

use bytes::Bytes;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::number::{parse_float_with, FloatRules};

/// Conditions under which ZADD may touch a member.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZAddFlags {
    /// Only add new members.
    pub nx: bool,
    /// Only update existing members.
    pub xx: bool,
    /// Only update when the new score is greater.
    pub gt: bool,
    /// Only update when the new score is lower.
    pub lt: bool,
}

impl ZAddFlags {
    /// Whether a member currently scored `current` (`None` when absent) may move to `score`.
    pub fn allows(&self, current: Option<f64>, score: f64) -> bool {
        match current {
            None => !self.xx,
            Some(current) => {
                !(self.nx || (self.gt && score <= current) || (self.lt && score >= current))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddResult {
    pub added: bool,
    pub updated: bool,
}

impl AddResult {
    pub const UNCHANGED: Self = Self {
        added: false,
        updated: false,
    };
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(Bytes, f64)>", into = "Vec<(Bytes, f64)>")]
pub struct SortedSet {
    sorted: Vec<(OrderedFloat<f64>, Bytes)>,
    scores: HashMap<Bytes, f64>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sets a member's score unconditionally.
    pub fn insert(&mut self, member: Bytes, score: f64) -> AddResult {
        self.add_with_flags(member, score, &ZAddFlags::default())
    }

    pub fn add_with_flags(&mut self, member: Bytes, score: f64, flags: &ZAddFlags) -> AddResult {
        let score = score + 0.0;
        let current = self.score(&member);
        if !flags.allows(current, score) {
            return AddResult::UNCHANGED;
        }

        match current {
            Some(current) if current == score => AddResult::UNCHANGED,
            Some(current) => {
                if let Ok(idx) = self.search_idx(current, &member) {
                    self.sorted.remove(idx);
                }
                self.place(member, score);
                AddResult {
                    added: false,
                    updated: true,
                }
            }
            None => {
                self.place(member, score);
                AddResult {
                    added: true,
                    updated: false,
                }
            }
        }
    }

    fn place(&mut self, member: Bytes, score: f64) {
        let idx = match self.search_idx(score, &member) {
            Ok(idx) | Err(idx) => idx,
        };
        self.sorted.insert(idx, (OrderedFloat(score), member.clone()));
        self.scores.insert(member, score);
    }

    pub fn remove(&mut self, member: &[u8]) -> bool {
        match self.scores.remove_entry(member) {
            Some((member, score)) => {
                if let Ok(idx) = self.search_idx(score, &member) {
                    self.sorted.remove(idx);
                }
                true
            }
            None => false,
        }
    }

    pub fn score(&self, member: &[u8]) -> Option<f64> {
        self.scores.get(member).copied()
    }

    /// 0-based position of a member, lowest score first.
    pub fn rank(&self, member: &[u8]) -> Option<usize> {
        let score = self.score(member)?;
        self.search_idx(score, member).ok()
    }

    /// Members and scores in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Bytes, f64)> + ExactSizeIterator {
        self.sorted.iter().map(|(score, member)| (member, score.0))
    }

    pub fn get_index(&self, idx: usize) -> Option<(&Bytes, f64)> {
        self.sorted.get(idx).map(|(score, member)| (member, score.0))
    }

    /// Members in a half-open rank range, ascending.
    pub fn slice(&self, range: Range<usize>) -> impl DoubleEndedIterator<Item = (&Bytes, f64)> {
        let end = range.end.min(self.sorted.len());
        let start = range.start.min(end);
        self.sorted[start..end]
            .iter()
            .map(|(score, member)| (member, score.0))
    }

    /// Rank range of the members whose scores fall between `min` and `max`.
    pub fn score_range(&self, min: &ScoreBound, max: &ScoreBound) -> Range<usize> {
        let start = self.sorted.partition_point(|(score, _)| !min.admits_from_below(score.0));
        let end = self.sorted.partition_point(|(score, _)| max.admits_from_above(score.0));
        start..end.max(start)
    }

    /// Rank range of the members between two lexicographic bounds. Meaningful only when every
    /// member has the same score.
    pub fn lex_range(&self, min: &LexBound, max: &LexBound) -> Range<usize> {
        let start = self.sorted.partition_point(|(_, member)| !min.admits_from_below(member));
        let end = self.sorted.partition_point(|(_, member)| max.admits_from_above(member));
        start..end.max(start)
    }

    /// Removes the members in a half-open rank range, returning how many went.
    pub fn remove_range(&mut self, range: Range<usize>) -> usize {
        let end = range.end.min(self.sorted.len());
        let start = range.start.min(end);
        for (_, member) in self.sorted.drain(start..end) {
            self.scores.remove(&member);
        }
        end - start
    }

    /// Removes and returns up to `count` members from the low end, or the high end when `max`.
    pub fn pop(&mut self, count: usize, max: bool) -> Vec<(Bytes, f64)> {
        let count = count.min(self.sorted.len());
        let drained: Vec<_> = if max {
            let start = self.sorted.len() - count;
            self.sorted.drain(start..).rev().collect()
        } else {
            self.sorted.drain(..count).collect()
        };
        drained
            .into_iter()
            .map(|(score, member)| {
                self.scores.remove(&member);
                (member, score.0)
            })
            .collect()
    }

    fn search_idx(&self, score: f64, member: &[u8]) -> Result<usize, usize> {
        let target = OrderedFloat(score);
        self.sorted.binary_search_by(|(s, m)| {
            s.cmp(&target).then_with(|| m[..].cmp(member))
        })
    }
}

impl PartialEq for SortedSet {
    fn eq(&self, other: &Self) -> bool {
        self.sorted == other.sorted
    }
}

impl From<Vec<(Bytes, f64)>> for SortedSet {
    fn from(members: Vec<(Bytes, f64)>) -> Self {
        let mut zset = SortedSet::new();
        for (member, score) in members {
            if !score.is_nan() {
                zset.insert(member, score);
            }
        }
        zset
    }
}

impl From<SortedSet> for Vec<(Bytes, f64)> {
    fn from(zset: SortedSet) -> Self {
        zset.sorted
            .into_iter()
            .map(|(score, member)| (member, score.0))
            .collect()
    }
}

/// One end of a score range: `5`, `(5` (exclusive), `-inf`, `+inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBound {
    pub value: f64,
    pub exclusive: bool,
}

impl ScoreBound {
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (exclusive, rest) = match bytes.strip_prefix(b"(") {
            Some(rest) => (true, rest),
            None => (false, bytes),
        };
        let value = parse_float_with(rest, FloatRules::BOUND)?;
        Some(Self { value, exclusive })
    }

    /// Whether `score` is on the correct side of this bound used as a minimum.
    pub fn admits_from_below(&self, score: f64) -> bool {
        if self.exclusive {
            score > self.value
        } else {
            score >= self.value
        }
    }

    /// Whether `score` is on the correct side of this bound used as a maximum.
    pub fn admits_from_above(&self, score: f64) -> bool {
        if self.exclusive {
            score < self.value
        } else {
            score <= self.value
        }
    }
}

/// One end of a lexicographic range: `-`, `+`, `[member` or `(member`.
#[derive(Debug, Clone, PartialEq)]
pub enum LexBound {
    Min,
    Max,
    Inclusive(Bytes),
    Exclusive(Bytes),
}

impl LexBound {
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        match bytes {
            b"-" => Some(LexBound::Min),
            b"+" => Some(LexBound::Max),
            [b'[', rest @ ..] => Some(LexBound::Inclusive(Bytes::copy_from_slice(rest))),
            [b'(', rest @ ..] => Some(LexBound::Exclusive(Bytes::copy_from_slice(rest))),
            _ => None,
        }
    }

    pub fn admits_from_below(&self, member: &[u8]) -> bool {
        match self {
            LexBound::Min => true,
            LexBound::Max => false,
            LexBound::Inclusive(bound) => member >= bound.as_ref(),
            LexBound::Exclusive(bound) => member > bound.as_ref(),
        }
    }

    pub fn admits_from_above(&self, member: &[u8]) -> bool {
        match self {
            LexBound::Min => false,
            LexBound::Max => true,
            LexBound::Inclusive(bound) => member <= bound.as_ref(),
            LexBound::Exclusive(bound) => member < bound.as_ref(),
        }
    }
}
