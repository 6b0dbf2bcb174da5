use bytes::Bytes;
use std::ops::Range;

use crate::commands::executable::{Context, Executable};
use crate::commands::CommandParser;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{format_score, parse_int};
use crate::sorted_set::{LexBound, ScoreBound, SortedSet};
use crate::utils::range::fix_range;

/// How a range of sorted-set members is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBy {
    Rank(i64, i64),
    Score(ScoreBound, ScoreBound),
    Lex(LexBound, LexBound),
}

impl RangeBy {
    /// The selected members as a rank range in ascending order. For reversed rank queries the
    /// indices count from the highest score.
    pub(crate) fn ranks(&self, zset: &SortedSet, rev: bool) -> Range<usize> {
        match self {
            RangeBy::Rank(start, stop) => {
                let len = zset.len();
                let range = fix_range(*start, *stop, len);
                if rev && !range.is_empty() {
                    len - range.end..len - range.start
                } else {
                    range
                }
            }
            RangeBy::Score(min, max) => zset.score_range(min, max),
            RangeBy::Lex(min, max) => zset.lex_range(min, max),
        }
    }
}

/// Flattens members, with their scores when asked, into a reply.
pub(crate) fn scored_reply(
    items: impl IntoIterator<Item = (Bytes, f64)>,
    withscores: bool,
) -> Frame {
    let mut frames = Vec::new();
    for (member, score) in items {
        frames.push(Frame::Bulk(member));
        if withscores {
            frames.push(Frame::Bulk(format_score(score)));
        }
    }
    Frame::Array(frames)
}

/// ZRANGE with its full option grammar, plus the older ZREVRANGE, ZRANGEBYSCORE,
/// ZREVRANGEBYSCORE, ZRANGEBYLEX and ZREVRANGEBYLEX forms, which all parse into it.
///
/// `LIMIT offset count` applies to score and lex ranges only: a negative offset selects nothing
/// and a negative count everything after the offset.
///
/// Ref: <https://redis.io/docs/latest/commands/zrange/>
#[derive(Debug, PartialEq)]
pub struct Zrange {
    pub key: Bytes,
    pub by: RangeBy,
    pub rev: bool,
    pub limit: Option<(i64, i64)>,
    pub withscores: bool,
}

impl Executable for Zrange {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        let key = ctx.db().key(self.key);
        let empty = SortedSet::new();
        let zset = key.zset()?.unwrap_or(&empty);

        let range = self.by.ranks(zset, self.rev);
        let mut items: Vec<(Bytes, f64)> = zset
            .slice(range)
            .map(|(member, score)| (member.clone(), score))
            .collect();
        if self.rev {
            items.reverse();
        }

        if let Some((offset, count)) = self.limit {
            items = match (usize::try_from(offset), usize::try_from(count)) {
                (Err(_), _) => Vec::new(),
                (Ok(offset), Ok(count)) => items.into_iter().skip(offset).take(count).collect(),
                (Ok(offset), Err(_)) => items.into_iter().skip(offset).collect(),
            };
        }

        Ok(scored_reply(items, self.withscores))
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Rank,
    Score,
    Lex,
}

fn parse_limit(parser: &mut CommandParser) -> Result<(i64, i64), CommandError> {
    if parser.remaining() < 2 {
        return Err(CommandError::Syntax);
    }
    Ok((parser.next_integer()?, parser.next_integer()?))
}

impl TryFrom<&mut CommandParser> for Zrange {
    type Error = CommandError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let name = parser.name();
        let key = parser.next_bytes()?;
        let start = parser.next_bytes()?;
        let stop = parser.next_bytes()?;

        let (mut mode, mut rev) = match name {
            "zrevrange" => (Mode::Rank, true),
            "zrangebyscore" => (Mode::Score, false),
            "zrevrangebyscore" => (Mode::Score, true),
            "zrangebylex" => (Mode::Lex, false),
            "zrevrangebylex" => (Mode::Lex, true),
            _ => (Mode::Rank, false),
        };
        let mut limit = None;
        let mut withscores = false;

        while parser.has_next() {
            match parser.next_token()?.as_str() {
                "WITHSCORES" if name != "zrangebylex" && name != "zrevrangebylex" => {
                    withscores = true
                }
                "LIMIT" if name != "zrevrange" => limit = Some(parse_limit(parser)?),
                "BYSCORE" if name == "zrange" => mode = Mode::Score,
                "BYLEX" if name == "zrange" => mode = Mode::Lex,
                "REV" if name == "zrange" => rev = true,
                _ => return Err(CommandError::Syntax),
            }
        }

        if limit.is_some() && mode == Mode::Rank {
            return Err(CommandError::LimitWithoutBy);
        }
        if withscores && mode == Mode::Lex {
            return Err(CommandError::WithScoresByLex);
        }

        // Reversed score and lex ranges name the upper bound first.
        let (low, high) = if rev && mode != Mode::Rank {
            (stop, start)
        } else {
            (start, stop)
        };
        let by = match mode {
            Mode::Rank => {
                let start = parse_int(&low).ok_or(CommandError::NotInteger)?;
                let stop = parse_int(&high).ok_or(CommandError::NotInteger)?;
                RangeBy::Rank(start, stop)
            }
            Mode::Score => RangeBy::Score(
                ScoreBound::parse(&low).ok_or(CommandError::MinMaxNotFloat)?,
                ScoreBound::parse(&high).ok_or(CommandError::MinMaxNotFloat)?,
            ),
            Mode::Lex => RangeBy::Lex(
                LexBound::parse(&low).ok_or(CommandError::MinMaxNotString)?,
                LexBound::parse(&high).ok_or(CommandError::MinMaxNotString)?,
            ),
        };

        Ok(Self {
            key,
            by,
            rev,
            limit,
            withscores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulks, frame, Harness};
    use crate::commands::Command;

    fn seeded() -> Harness {
        let mut harness = Harness::new();
        harness.run(&["ZADD", "z", "1", "a", "2", "b", "3", "c", "4", "d"]);
        harness
    }

    #[test]
    fn by_rank() {
        let cmd = Command::try_from(frame(&["ZRANGE", "z", "0", "1", "WITHSCORES"])).unwrap();
        assert_eq!(
            cmd,
            Command::Zrange(Zrange {
                key: Bytes::from("z"),
                by: RangeBy::Rank(0, 1),
                rev: false,
                limit: None,
                withscores: true,
            })
        );

        let mut harness = seeded();
        assert_eq!(harness.exec(cmd).unwrap(), bulks(&["a", "1", "b", "2"]));
        assert_eq!(harness.run(&["ZREVRANGE", "z", "0", "1"]), bulks(&["d", "c"]));
        assert_eq!(harness.run(&["ZRANGE", "z", "-2", "-1", "REV"]), bulks(&["b", "a"]));
        assert_eq!(harness.run(&["ZRANGE", "missing", "0", "-1"]), bulks(&[]));
    }

    #[test]
    fn by_score() {
        let mut harness = seeded();
        assert_eq!(
            harness.run(&["ZRANGEBYSCORE", "z", "(1", "3"]),
            bulks(&["b", "c"])
        );
        assert_eq!(
            harness.run(&["ZREVRANGEBYSCORE", "z", "+inf", "2", "LIMIT", "1", "2"]),
            bulks(&["c", "b"])
        );
        assert_eq!(
            harness.run(&["ZRANGE", "z", "3", "1", "BYSCORE", "REV", "WITHSCORES"]),
            bulks(&["c", "3", "b", "2", "a", "1"])
        );
        assert_eq!(
            harness.run(&["ZRANGEBYSCORE", "z", "-inf", "+inf", "LIMIT", "-1", "2"]),
            bulks(&[])
        );
        assert_eq!(
            harness.run(&["ZRANGEBYSCORE", "z", "-inf", "+inf", "LIMIT", "2", "-1"]),
            bulks(&["c", "d"])
        );
    }

    #[test]
    fn by_lex() {
        let mut harness = Harness::new();
        harness.run(&["ZADD", "z", "0", "a", "0", "b", "0", "c"]);
        assert_eq!(harness.run(&["ZRANGEBYLEX", "z", "[b", "+"]), bulks(&["b", "c"]));
        assert_eq!(harness.run(&["ZREVRANGEBYLEX", "z", "(c", "-"]), bulks(&["b", "a"]));
        assert_eq!(
            harness.run(&["ZRANGE", "z", "-", "+", "BYLEX", "LIMIT", "1", "1"]),
            bulks(&["b"])
        );
    }

    #[test]
    fn grammar_errors() {
        let mut harness = seeded();
        assert_eq!(
            harness.run(&["ZRANGE", "z", "0", "1", "LIMIT", "0", "1"]),
            CommandError::LimitWithoutBy.into()
        );
        assert_eq!(
            harness.run(&["ZRANGE", "z", "-", "+", "BYLEX", "WITHSCORES"]),
            CommandError::WithScoresByLex.into()
        );
        assert_eq!(
            harness.run(&["ZRANGEBYLEX", "z", "-", "+", "WITHSCORES"]),
            CommandError::Syntax.into()
        );
        assert_eq!(
            harness.run(&["ZRANGEBYSCORE", "z", "x", "1"]),
            CommandError::MinMaxNotFloat.into()
        );
        assert_eq!(
            harness.run(&["ZRANGEBYLEX", "z", "a", "+"]),
            CommandError::MinMaxNotString.into()
        );
        assert_eq!(
            harness.run(&["ZRANGE", "z", "0", "1", "LIMIT", "0"]),
            CommandError::Syntax.into()
        );
    }
}
