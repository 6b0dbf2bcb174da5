use bytes::Bytes;
use std::collections::HashMap;
use std::str::FromStr;
use strum_macros::EnumString;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::parse_float;
use crate::sorted_set::SortedSet;
use crate::value::Value;

/// How the scores of a member present in several inputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Default, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Aggregate {
    #[default]
    Sum,
    Min,
    Max,
}

impl Aggregate {
    fn apply(self, current: f64, score: f64) -> f64 {
        match self {
            Aggregate::Sum => nan_to_zero(current + score),
            Aggregate::Min => current.min(score),
            Aggregate::Max => current.max(score),
        }
    }
}

// inf - inf and 0 * inf have no sensible score.
fn nan_to_zero(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score
    }
}

/// ZUNIONSTORE and ZINTERSTORE: combine weighted sorted sets into `destination`, replying with
/// the size of the result. Plain sets take part with every member scored 1.
///
/// Ref: <https://redis.io/docs/latest/commands/zunionstore/>
#[derive(Debug, PartialEq)]
pub struct Zstore {
    pub destination: Bytes,
    pub keys: Vec<Bytes>,
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
    pub inter: bool,
}

fn scored_members(value: Option<Value>) -> Result<Vec<(Bytes, f64)>, CommandError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::SortedSet(zset)) => Ok(zset.into()),
        Some(Value::Set(set)) => Ok(set.into_iter().map(|member| (member, 1.0)).collect()),
        Some(_) => Err(CommandError::WrongType),
    }
}

impl Executable for Zstore {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let db = ctx.db();

        let mut inputs = Vec::with_capacity(self.keys.len());
        for (key, weight) in self.keys.iter().zip(&self.weights) {
            let members = scored_members(db.key(key.clone()).value().cloned())?;
            inputs.push((members, *weight));
        }
        // Smallest inputs first. For an intersection the first input bounds the result.
        inputs.sort_by_key(|(members, _)| members.len());

        let mut scores: HashMap<Bytes, (f64, usize)> = HashMap::new();
        for (members, weight) in &inputs {
            for (member, score) in members {
                let score = nan_to_zero(score * weight);
                scores
                    .entry(member.clone())
                    .and_modify(|(current, seen)| {
                        *current = self.aggregate.apply(*current, score);
                        *seen += 1;
                    })
                    .or_insert((score, 1));
            }
        }

        let result: SortedSet = scores
            .into_iter()
            .filter(|(_, (_, seen))| !self.inter || *seen == inputs.len())
            .map(|(member, (score, _))| (member, score))
            .collect::<Vec<_>>()
            .into();

        let len = result.len();
        let mut destination = db.key(self.destination);
        if result.is_empty() {
            destination.delete();
        } else {
            destination.replace(Value::SortedSet(result));
        }
        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Zstore {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let inter = parser.name() == "zinterstore";
        let destination = parser.next_bytes()?;

        let numkeys = parser.next_integer()?;
        if numkeys < 1 {
            return Err(CommandError::ZstoreNoKeys);
        }
        let numkeys = numkeys as usize;
        if numkeys > parser.remaining() {
            return Err(CommandError::Syntax);
        }

        let mut keys = Vec::with_capacity(numkeys);
        for _ in 0..numkeys {
            keys.push(parser.next_bytes()?);
        }

        let mut weights = vec![1.0; numkeys];
        let mut aggregate = Aggregate::default();
        while parser.has_next() {
            match parser.next_token()?.as_str() {
                "WEIGHTS" => {
                    if parser.remaining() < numkeys {
                        return Err(CommandError::Syntax);
                    }
                    for weight in weights.iter_mut() {
                        let bytes = parser.next_bytes()?;
                        *weight = parse_float(&bytes).ok_or(CommandError::WeightNotFloat)?;
                    }
                }
                "AGGREGATE" => {
                    let name = parser.next_string()?;
                    aggregate = Aggregate::from_str(&name).map_err(|_| CommandError::Syntax)?;
                }
                _ => return Err(CommandError::Syntax),
            }
        }

        Ok(Self {
            destination,
            keys,
            weights,
            aggregate,
            inter,
        })
    }
}
