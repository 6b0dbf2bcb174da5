use crate::error::CommandError;

/// Runs even while a transaction is open, instead of being queued.
pub const IMMEDIATE: u8 = 1;
/// Refused when called from a script.
pub const NO_SCRIPT: u8 = 1 << 1;
/// May suspend the client until data arrives.
pub const BLOCKING: u8 = 1 << 2;
/// Allowed while the client is subscribed to channels or patterns.
pub const PUBSUB: u8 = 1 << 3;

#[derive(Debug, PartialEq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Positive: exact argument count including the name. Negative: minimum count.
    pub arity: i32,
    pub flags: u8,
}

impl CommandSpec {
    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    pub fn check_arity(&self, argc: usize) -> Result<(), CommandError> {
        let argc = argc as i64;
        let arity = self.arity as i64;
        let ok = if arity >= 0 {
            argc == arity
        } else {
            argc >= -arity
        };
        if ok {
            Ok(())
        } else {
            Err(CommandError::WrongArity(self.name.to_string()))
        }
    }
}

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .binary_search_by(|spec| spec.name.cmp(name))
        .ok()
        .map(|idx| &COMMANDS[idx])
}

macro_rules! spec {
    ($name:literal, $arity:expr) => {
        spec!($name, $arity, 0)
    };
    ($name:literal, $arity:expr, $flags:expr) => {
        CommandSpec {
            name: $name,
            arity: $arity,
            flags: $flags,
        }
    };
}

// Sorted by name.
static COMMANDS: &[CommandSpec] = &[
    spec!("append", 3),
    spec!("bgsave", -1),
    spec!("bitcount", -2),
    spec!("blmove", 6, BLOCKING | NO_SCRIPT),
    spec!("blpop", -3, BLOCKING | NO_SCRIPT),
    spec!("brpop", -3, BLOCKING | NO_SCRIPT),
    spec!("brpoplpush", 4, BLOCKING | NO_SCRIPT),
    spec!("bzpopmax", -3, BLOCKING | NO_SCRIPT),
    spec!("bzpopmin", -3, BLOCKING | NO_SCRIPT),
    spec!("dbsize", 1),
    spec!("decr", 2),
    spec!("decrby", 3),
    spec!("del", -2),
    spec!("discard", 1, IMMEDIATE | NO_SCRIPT),
    spec!("dump", 2),
    spec!("echo", 2),
    spec!("eval", -3, NO_SCRIPT),
    spec!("evalsha", -3, NO_SCRIPT),
    spec!("exec", 1, IMMEDIATE | NO_SCRIPT),
    spec!("exists", -2),
    spec!("expire", -3),
    spec!("expireat", -3),
    spec!("flushall", -1),
    spec!("flushdb", -1),
    spec!("get", 2),
    spec!("getbit", 3),
    spec!("getdel", 2),
    spec!("getex", -2),
    spec!("getrange", 4),
    spec!("getset", 3),
    spec!("hdel", -3),
    spec!("hexists", 3),
    spec!("hget", 3),
    spec!("hgetall", 2),
    spec!("hincrby", 4),
    spec!("hincrbyfloat", 4),
    spec!("hkeys", 2),
    spec!("hlen", 2),
    spec!("hmget", -3),
    spec!("hmset", -4),
    spec!("hscan", -3),
    spec!("hset", -4),
    spec!("hsetnx", 4),
    spec!("hstrlen", 3),
    spec!("hvals", 2),
    spec!("incr", 2),
    spec!("incrby", 3),
    spec!("incrbyfloat", 3),
    spec!("keys", 2),
    spec!("lastsave", 1),
    spec!("lindex", 3),
    spec!("linsert", 5),
    spec!("llen", 2),
    spec!("lmove", 5),
    spec!("lpop", -2),
    spec!("lpush", -3),
    spec!("lpushx", -3),
    spec!("lrange", 4),
    spec!("lrem", 4),
    spec!("lset", 4),
    spec!("ltrim", 4),
    spec!("mget", -2),
    spec!("move", 3),
    spec!("mset", -3),
    spec!("msetnx", -3),
    spec!("multi", 1, IMMEDIATE | NO_SCRIPT),
    spec!("persist", 2),
    spec!("pexpire", -3),
    spec!("pexpireat", -3),
    spec!("pfadd", -2),
    spec!("pfcount", -2),
    spec!("pfmerge", -2),
    spec!("ping", -1, PUBSUB),
    spec!("psetex", 4),
    spec!("psubscribe", -2, IMMEDIATE | NO_SCRIPT | PUBSUB),
    spec!("pttl", 2),
    spec!("publish", 3),
    spec!("pubsub", -2),
    spec!("punsubscribe", -1, IMMEDIATE | NO_SCRIPT | PUBSUB),
    spec!("quit", -1, NO_SCRIPT | PUBSUB),
    spec!("randomkey", 1),
    spec!("rename", 3),
    spec!("renamenx", 3),
    spec!("restore", -4),
    spec!("rpop", -2),
    spec!("rpoplpush", 3),
    spec!("rpush", -3),
    spec!("rpushx", -3),
    spec!("sadd", -3),
    spec!("save", 1, NO_SCRIPT),
    spec!("scan", -2),
    spec!("scard", 2),
    spec!("script", -2, NO_SCRIPT),
    spec!("sdiff", -2),
    spec!("sdiffstore", -3),
    spec!("select", 2),
    spec!("set", -3),
    spec!("setbit", 4),
    spec!("setex", 4),
    spec!("setnx", 3),
    spec!("setrange", 4),
    spec!("sinter", -2),
    spec!("sinterstore", -3),
    spec!("sismember", 3),
    spec!("smembers", 2),
    spec!("smismember", -3),
    spec!("smove", 4),
    spec!("sort", -2),
    spec!("spop", -2),
    spec!("srandmember", -2),
    spec!("srem", -3),
    spec!("sscan", -3),
    spec!("strlen", 2),
    spec!("subscribe", -2, IMMEDIATE | NO_SCRIPT | PUBSUB),
    spec!("substr", 4),
    spec!("sunion", -2),
    spec!("sunionstore", -3),
    spec!("swapdb", 3),
    spec!("time", 1),
    spec!("ttl", 2),
    spec!("type", 2),
    spec!("unlink", -2),
    spec!("unsubscribe", -1, IMMEDIATE | NO_SCRIPT | PUBSUB),
    spec!("unwatch", 1, NO_SCRIPT),
    spec!("watch", -2, IMMEDIATE | NO_SCRIPT),
    spec!("zadd", -4),
    spec!("zcard", 2),
    spec!("zcount", 4),
    spec!("zincrby", 4),
    spec!("zinterstore", -4),
    spec!("zlexcount", 4),
    spec!("zmscore", -3),
    spec!("zpopmax", -2),
    spec!("zpopmin", -2),
    spec!("zrange", -4),
    spec!("zrangebylex", -4),
    spec!("zrangebyscore", -4),
    spec!("zrank", 3),
    spec!("zrem", -3),
    spec!("zremrangebylex", 4),
    spec!("zremrangebyrank", 4),
    spec!("zremrangebyscore", 4),
    spec!("zrevrange", -4),
    spec!("zrevrangebylex", -4),
    spec!("zrevrangebyscore", -4),
    spec!("zrevrank", 3),
    spec!("zscan", -3),
    spec!("zscore", 3),
    spec!("zunionstore", -4),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|spec| spec.name)
}
