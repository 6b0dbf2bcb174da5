use thiserror::Error as ThisError;

use crate::frame::Frame;

/// Every way a command can fail. The `Display` text of each variant is the exact error reply a
/// client sees, so tests compare against these strings rather than against variants.
#[derive(Clone, Debug, ThisError, PartialEq)]
pub enum CommandError {
    #[error("ERR unknown command '{0}'")]
    UnknownCommand(String),
    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArity(String),
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,
    #[error("ERR syntax error")]
    Syntax,

    #[error("ERR value is not an integer or out of range")]
    NotInteger,
    #[error("ERR value is not a valid float")]
    NotFloat,
    #[error("ERR increment or decrement would overflow")]
    Overflow,
    #[error("ERR increment would produce NaN or Infinity")]
    NotFinite,
    #[error("ERR resulting score is not a number (NaN)")]
    ScoreIsNaN,
    #[error("ERR hash value is not an integer")]
    HashNotInteger,
    #[error("ERR hash value is not a float")]
    HashNotFloat,
    #[error("ERR min or max is not a float")]
    MinMaxNotFloat,
    #[error("ERR min or max not valid string range item")]
    MinMaxNotString,
    #[error("ERR weight value is not a float")]
    WeightNotFloat,
    #[error("ERR timeout is not a float or out of range")]
    TimeoutNotFloat,
    #[error("ERR timeout is negative")]
    TimeoutNegative,
    #[error("ERR bit offset is not an integer or out of range")]
    BitOffset,
    #[error("ERR bit is not an integer or out of range")]
    BitValue,
    #[error("ERR offset is out of range")]
    OffsetOutOfRange,
    #[error("ERR string exceeds maximum allowed size (512MB)")]
    StringTooLong,
    #[error("ERR invalid cursor")]
    InvalidCursor,
    #[error("ERR DB index is out of range")]
    DbIndexOutOfRange,
    #[error("ERR value is out of range, must be positive")]
    NotPositive,

    #[error("ERR no such key")]
    NoSuchKey,
    #[error("ERR index out of range")]
    IndexOutOfRange,
    #[error("ERR source and destination objects are the same")]
    SameObject,
    #[error("ERR invalid expire time in '{0}' command")]
    InvalidExpire(String),
    #[error("ERR Unsupported option {0}")]
    UnsupportedOption(String),
    #[error("ERR NX and XX, GT or LT options at the same time are not compatible")]
    ExpireOptionConflict,

    #[error("ERR XX and NX options at the same time are not compatible")]
    ZaddNxXx,
    #[error("ERR GT, LT, and/or NX options at the same time are not compatible")]
    ZaddNxGtLt,
    #[error("ERR INCR option supports a single increment-element pair")]
    ZaddIncrPair,
    #[error("ERR at least 1 input key is needed for ZUNIONSTORE/ZINTERSTORE")]
    ZstoreNoKeys,
    #[error("ERR syntax error, LIMIT is only supported in combination with either BYSCORE or BYLEX")]
    LimitWithoutBy,
    #[error("ERR syntax error, WITHSCORES not supported in combination with BYLEX")]
    WithScoresByLex,
    #[error("ERR One or more scores can't be converted into double")]
    SortScore,

    #[error("ERR MULTI calls can not be nested")]
    NestedMulti,
    #[error("ERR {0} without MULTI")]
    WithoutMulti(&'static str),
    #[error("ERR WATCH inside MULTI is not allowed")]
    WatchInsideMulti,
    #[error("EXECABORT Transaction discarded because of previous errors.")]
    ExecAbort,
    #[error("EXECABORT Transaction discarded because of: {0}")]
    ExecAbortBecause(String),
    #[error("ERR only (P)SUBSCRIBE / (P)UNSUBSCRIBE / PING / QUIT allowed in this context")]
    PubSubContext,
    #[error("ERR unknown subcommand '{0}'. Try {1} HELP.")]
    UnknownSubcommand(String, &'static str),

    #[error("BUSYKEY Target key name already exists.")]
    BusyKey,
    #[error("ERR DUMP payload version or checksum are wrong")]
    InvalidDumpPayload,
    #[error("ERR Invalid TTL value, must be >= 0")]
    InvalidTtl,

    #[error("NOSCRIPT No matching script. Please use EVAL.")]
    NoScript,
    #[error("ERR Number of keys can't be greater than number of args")]
    TooManyKeys,
    #[error("ERR Number of keys can't be negative")]
    NegativeKeys,
    #[error("ERR Unknown SCRIPT subcommand or wrong # of args.")]
    UnknownScriptSubcommand,
    #[error("ERR This Redis command is not allowed from scripts")]
    NotAllowedFromScript,
    #[error("ERR Lua redis() command arguments must be strings or integers")]
    LuaCallArgument,
    #[error("ERR Please specify at least one argument for this redis lib call")]
    LuaCallNoArguments,
    #[error("ERR wrong number or type of arguments")]
    LuaWrongArguments,
    #[error("ERR redis.log() requires two arguments or more.")]
    LuaLogArguments,
    #[error("ERR Invalid debug level.")]
    LuaLogLevel,
    #[error("ERR Script attempted to set global variables: {0}")]
    GlobalVariable(String),
    #[error("ERR Error running script (call to f_{sha}): @user_script:?: {message}")]
    Script { sha: String, message: String },
}

impl From<CommandError> for Frame {
    fn from(err: CommandError) -> Frame {
        Frame::Error(err.to_string())
    }
}
