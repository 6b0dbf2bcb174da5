pub mod append;
pub mod bitcount;
pub mod blmove;
pub mod bpop;
pub mod bzpop;
pub mod dbsize;
pub mod decr;
pub mod decrby;
pub mod del;
pub mod discard;
pub mod dump;
pub mod echo;
pub mod eval;
pub mod exec;
pub mod executable;
pub mod exists;
pub mod expire;
pub mod flush;
pub mod get;
pub mod getbit;
pub mod getdel;
pub mod getex;
pub mod getrange;
pub mod getset;
pub mod hdel;
pub mod hexists;
pub mod hget;
pub mod hgetall;
pub mod hincrby;
pub mod hincrbyfloat;
pub mod hkeys;
pub mod hlen;
pub mod hmget;
pub mod hscan;
pub mod hset;
pub mod hsetnx;
pub mod hstrlen;
pub mod hvals;
pub mod incr;
pub mod incrby;
pub mod incrbyfloat;
pub mod keys;
pub mod lastsave;
pub mod lindex;
pub mod linsert;
pub mod list;
pub mod llen;
pub mod lmove;
pub mod lrange;
pub mod lrem;
pub mod lset;
pub mod ltrim;
pub mod mget;
pub mod move_;
pub mod mset;
pub mod msetnx;
pub mod multi;
pub mod persist;
pub mod pfadd;
pub mod pfcount;
pub mod pfmerge;
pub mod ping;
pub mod pop;
pub mod publish;
pub mod pubsub;
pub mod push;
pub mod quit;
pub mod randomkey;
pub mod rename;
pub mod restore;
pub mod sadd;
pub mod save;
pub mod scan;
pub mod scard;
pub mod script;
pub mod select;
pub mod set;
pub mod setbit;
pub mod setex;
pub mod setnx;
pub mod setop;
pub mod setrange;
pub mod sismember;
pub mod smembers;
pub mod smismember;
pub mod smove;
pub mod sort;
pub mod spop;
pub mod srandmember;
pub mod srem;
pub mod sscan;
pub mod strlen;
pub mod subscribe;
pub mod swapdb;
pub mod table;
pub mod time;
pub mod ttl;
pub mod type_;
pub mod unsubscribe;
pub mod unwatch;
pub mod watch;
pub mod zadd;
pub mod zcard;
pub mod zcount;
pub mod zincrby;
pub mod zlexcount;
pub mod zmscore;
pub mod zpop;
pub mod zrange;
pub mod zrank;
pub mod zrem;
pub mod zremrangebylex;
pub mod zremrangebyrank;
pub mod zremrangebyscore;
pub mod zscan;
pub mod zscore;
pub mod zstore;

#[cfg(test)]
pub(crate) mod testing;

use bytes::Bytes;
use std::time::Duration;
use std::vec;
use tracing::debug;

use crate::blocking::Blocking;
use crate::commands::executable::{Context, Executable};
use crate::commands::table::CommandSpec;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::{parse_float, parse_int};
use crate::sorted_set::{LexBound, ScoreBound};

use append::Append;
use bitcount::Bitcount;
use blmove::Blmove;
use bpop::Bpop;
use bzpop::Bzpop;
use dbsize::Dbsize;
use decr::Decr;
use decrby::DecrBy;
use del::Del;
use discard::Discard;
use dump::Dump;
use echo::Echo;
use eval::Eval;
use exec::Exec;
use exists::Exists;
use expire::Expire;
use flush::Flush;
use get::Get;
use getbit::Getbit;
use getdel::Getdel;
use getex::Getex;
use getrange::Getrange;
use getset::Getset;
use hdel::Hdel;
use hexists::Hexists;
use hget::Hget;
use hgetall::Hgetall;
use hincrby::Hincrby;
use hincrbyfloat::Hincrbyfloat;
use hkeys::Hkeys;
use hlen::Hlen;
use hmget::Hmget;
use hscan::Hscan;
use hset::Hset;
use hsetnx::Hsetnx;
use hstrlen::Hstrlen;
use hvals::Hvals;
use incr::Incr;
use incrby::IncrBy;
use incrbyfloat::Incrbyfloat;
use keys::Keys;
use lastsave::Lastsave;
use lindex::Lindex;
use linsert::Linsert;
use llen::Llen;
use lmove::Lmove;
use lrange::Lrange;
use lrem::Lrem;
use lset::Lset;
use ltrim::Ltrim;
use mget::Mget;
use move_::Move;
use mset::Mset;
use msetnx::Msetnx;
use multi::Multi;
use persist::Persist;
use pfadd::Pfadd;
use pfcount::Pfcount;
use pfmerge::Pfmerge;
use ping::Ping;
use pop::Pop;
use publish::Publish;
use pubsub::Pubsub;
use push::Push;
use quit::Quit;
use randomkey::Randomkey;
use rename::Rename;
use restore::Restore;
use sadd::Sadd;
use save::Save;
use scan::Scan;
use scard::Scard;
use script::Script;
use select::Select;
use set::Set;
use setbit::Setbit;
use setex::Setex;
use setnx::Setnx;
use setop::SetOp;
use setrange::Setrange;
use sismember::Sismember;
use smembers::Smembers;
use smismember::Smismember;
use smove::Smove;
use sort::Sort;
use spop::Spop;
use srandmember::Srandmember;
use srem::Srem;
use sscan::Sscan;
use strlen::Strlen;
use subscribe::Subscribe;
use swapdb::Swapdb;
use time::Time;
use ttl::Ttl;
use type_::Type;
use unsubscribe::Unsubscribe;
use unwatch::Unwatch;
use watch::Watch;
use zadd::Zadd;
use zcard::Zcard;
use zcount::Zcount;
use zincrby::Zincrby;
use zlexcount::Zlexcount;
use zmscore::Zmscore;
use zpop::Zpop;
use zrange::Zrange;
use zrank::Zrank;
use zrem::Zrem;
use zremrangebylex::Zremrangebylex;
use zremrangebyrank::Zremrangebyrank;
use zremrangebyscore::Zremrangebyscore;
use zscan::Zscan;
use zscore::Zscore;
use zstore::Zstore;

/// A parsed command, ready to run. Commands that answer to several names (`LPUSH`/`RPUSH`,
/// `EXPIRE`/`PEXPIREAT`, the `ZRANGE` family...) share one variant and record which name was
/// used in their fields.
#[derive(Debug, PartialEq)]
pub enum Command {
    Append(Append),
    Bitcount(Bitcount),
    Blmove(Blmove),
    Bpop(Bpop),
    Bzpop(Bzpop),
    Dbsize(Dbsize),
    Decr(Decr),
    DecrBy(DecrBy),
    Del(Del),
    Discard(Discard),
    Dump(Dump),
    Echo(Echo),
    Eval(Eval),
    Exec(Exec),
    Exists(Exists),
    Expire(Expire),
    Flush(Flush),
    Get(Get),
    Getbit(Getbit),
    Getdel(Getdel),
    Getex(Getex),
    Getrange(Getrange),
    Getset(Getset),
    Hdel(Hdel),
    Hexists(Hexists),
    Hget(Hget),
    Hgetall(Hgetall),
    Hincrby(Hincrby),
    Hincrbyfloat(Hincrbyfloat),
    Hkeys(Hkeys),
    Hlen(Hlen),
    Hmget(Hmget),
    Hscan(Hscan),
    Hset(Hset),
    Hsetnx(Hsetnx),
    Hstrlen(Hstrlen),
    Hvals(Hvals),
    Incr(Incr),
    IncrBy(IncrBy),
    Incrbyfloat(Incrbyfloat),
    Keys(Keys),
    Lastsave(Lastsave),
    Lindex(Lindex),
    Linsert(Linsert),
    Llen(Llen),
    Lmove(Lmove),
    Lrange(Lrange),
    Lrem(Lrem),
    Lset(Lset),
    Ltrim(Ltrim),
    Mget(Mget),
    Move(Move),
    Mset(Mset),
    Msetnx(Msetnx),
    Multi(Multi),
    Persist(Persist),
    Pfadd(Pfadd),
    Pfcount(Pfcount),
    Pfmerge(Pfmerge),
    Ping(Ping),
    Pop(Pop),
    Publish(Publish),
    Pubsub(Pubsub),
    Push(Push),
    Quit(Quit),
    Randomkey(Randomkey),
    Rename(Rename),
    Restore(Restore),
    Sadd(Sadd),
    Save(Save),
    Scan(Scan),
    Scard(Scard),
    Script(Script),
    Select(Select),
    Set(Set),
    Setbit(Setbit),
    Setex(Setex),
    Setnx(Setnx),
    SetOp(SetOp),
    Setrange(Setrange),
    Sismember(Sismember),
    Smembers(Smembers),
    Smismember(Smismember),
    Smove(Smove),
    Sort(Sort),
    Spop(Spop),
    Srandmember(Srandmember),
    Srem(Srem),
    Sscan(Sscan),
    Strlen(Strlen),
    Subscribe(Subscribe),
    Swapdb(Swapdb),
    Time(Time),
    Ttl(Ttl),
    Type(Type),
    Unsubscribe(Unsubscribe),
    Unwatch(Unwatch),
    Watch(Watch),
    Zadd(Zadd),
    Zcard(Zcard),
    Zcount(Zcount),
    Zincrby(Zincrby),
    Zlexcount(Zlexcount),
    Zmscore(Zmscore),
    Zpop(Zpop),
    Zrange(Zrange),
    Zrank(Zrank),
    Zrem(Zrem),
    Zremrangebylex(Zremrangebylex),
    Zremrangebyrank(Zremrangebyrank),
    Zremrangebyscore(Zremrangebyscore),
    Zscan(Zscan),
    Zscore(Zscore),
    Zstore(Zstore),
}

impl Executable for Command {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError> {
        match self {
            Command::Append(cmd) => cmd.exec(ctx),
            Command::Bitcount(cmd) => cmd.exec(ctx),
            Command::Blmove(cmd) => cmd.exec(ctx),
            Command::Bpop(cmd) => cmd.exec(ctx),
            Command::Bzpop(cmd) => cmd.exec(ctx),
            Command::Dbsize(cmd) => cmd.exec(ctx),
            Command::Decr(cmd) => cmd.exec(ctx),
            Command::DecrBy(cmd) => cmd.exec(ctx),
            Command::Del(cmd) => cmd.exec(ctx),
            Command::Discard(cmd) => cmd.exec(ctx),
            Command::Dump(cmd) => cmd.exec(ctx),
            Command::Echo(cmd) => cmd.exec(ctx),
            Command::Eval(cmd) => cmd.exec(ctx),
            Command::Exec(cmd) => cmd.exec(ctx),
            Command::Exists(cmd) => cmd.exec(ctx),
            Command::Expire(cmd) => cmd.exec(ctx),
            Command::Flush(cmd) => cmd.exec(ctx),
            Command::Get(cmd) => cmd.exec(ctx),
            Command::Getbit(cmd) => cmd.exec(ctx),
            Command::Getdel(cmd) => cmd.exec(ctx),
            Command::Getex(cmd) => cmd.exec(ctx),
            Command::Getrange(cmd) => cmd.exec(ctx),
            Command::Getset(cmd) => cmd.exec(ctx),
            Command::Hdel(cmd) => cmd.exec(ctx),
            Command::Hexists(cmd) => cmd.exec(ctx),
            Command::Hget(cmd) => cmd.exec(ctx),
            Command::Hgetall(cmd) => cmd.exec(ctx),
            Command::Hincrby(cmd) => cmd.exec(ctx),
            Command::Hincrbyfloat(cmd) => cmd.exec(ctx),
            Command::Hkeys(cmd) => cmd.exec(ctx),
            Command::Hlen(cmd) => cmd.exec(ctx),
            Command::Hmget(cmd) => cmd.exec(ctx),
            Command::Hscan(cmd) => cmd.exec(ctx),
            Command::Hset(cmd) => cmd.exec(ctx),
            Command::Hsetnx(cmd) => cmd.exec(ctx),
            Command::Hstrlen(cmd) => cmd.exec(ctx),
            Command::Hvals(cmd) => cmd.exec(ctx),
            Command::Incr(cmd) => cmd.exec(ctx),
            Command::IncrBy(cmd) => cmd.exec(ctx),
            Command::Incrbyfloat(cmd) => cmd.exec(ctx),
            Command::Keys(cmd) => cmd.exec(ctx),
            Command::Lastsave(cmd) => cmd.exec(ctx),
            Command::Lindex(cmd) => cmd.exec(ctx),
            Command::Linsert(cmd) => cmd.exec(ctx),
            Command::Llen(cmd) => cmd.exec(ctx),
            Command::Lmove(cmd) => cmd.exec(ctx),
            Command::Lrange(cmd) => cmd.exec(ctx),
            Command::Lrem(cmd) => cmd.exec(ctx),
            Command::Lset(cmd) => cmd.exec(ctx),
            Command::Ltrim(cmd) => cmd.exec(ctx),
            Command::Mget(cmd) => cmd.exec(ctx),
            Command::Move(cmd) => cmd.exec(ctx),
            Command::Mset(cmd) => cmd.exec(ctx),
            Command::Msetnx(cmd) => cmd.exec(ctx),
            Command::Multi(cmd) => cmd.exec(ctx),
            Command::Persist(cmd) => cmd.exec(ctx),
            Command::Pfadd(cmd) => cmd.exec(ctx),
            Command::Pfcount(cmd) => cmd.exec(ctx),
            Command::Pfmerge(cmd) => cmd.exec(ctx),
            Command::Ping(cmd) => cmd.exec(ctx),
            Command::Pop(cmd) => cmd.exec(ctx),
            Command::Publish(cmd) => cmd.exec(ctx),
            Command::Pubsub(cmd) => cmd.exec(ctx),
            Command::Push(cmd) => cmd.exec(ctx),
            Command::Quit(cmd) => cmd.exec(ctx),
            Command::Randomkey(cmd) => cmd.exec(ctx),
            Command::Rename(cmd) => cmd.exec(ctx),
            Command::Restore(cmd) => cmd.exec(ctx),
            Command::Sadd(cmd) => cmd.exec(ctx),
            Command::Save(cmd) => cmd.exec(ctx),
            Command::Scan(cmd) => cmd.exec(ctx),
            Command::Scard(cmd) => cmd.exec(ctx),
            Command::Script(cmd) => cmd.exec(ctx),
            Command::Select(cmd) => cmd.exec(ctx),
            Command::Set(cmd) => cmd.exec(ctx),
            Command::Setbit(cmd) => cmd.exec(ctx),
            Command::Setex(cmd) => cmd.exec(ctx),
            Command::Setnx(cmd) => cmd.exec(ctx),
            Command::SetOp(cmd) => cmd.exec(ctx),
            Command::Setrange(cmd) => cmd.exec(ctx),
            Command::Sismember(cmd) => cmd.exec(ctx),
            Command::Smembers(cmd) => cmd.exec(ctx),
            Command::Smismember(cmd) => cmd.exec(ctx),
            Command::Smove(cmd) => cmd.exec(ctx),
            Command::Sort(cmd) => cmd.exec(ctx),
            Command::Spop(cmd) => cmd.exec(ctx),
            Command::Srandmember(cmd) => cmd.exec(ctx),
            Command::Srem(cmd) => cmd.exec(ctx),
            Command::Sscan(cmd) => cmd.exec(ctx),
            Command::Strlen(cmd) => cmd.exec(ctx),
            Command::Subscribe(cmd) => cmd.exec(ctx),
            Command::Swapdb(cmd) => cmd.exec(ctx),
            Command::Time(cmd) => cmd.exec(ctx),
            Command::Ttl(cmd) => cmd.exec(ctx),
            Command::Type(cmd) => cmd.exec(ctx),
            Command::Unsubscribe(cmd) => cmd.exec(ctx),
            Command::Unwatch(cmd) => cmd.exec(ctx),
            Command::Watch(cmd) => cmd.exec(ctx),
            Command::Zadd(cmd) => cmd.exec(ctx),
            Command::Zcard(cmd) => cmd.exec(ctx),
            Command::Zcount(cmd) => cmd.exec(ctx),
            Command::Zincrby(cmd) => cmd.exec(ctx),
            Command::Zlexcount(cmd) => cmd.exec(ctx),
            Command::Zmscore(cmd) => cmd.exec(ctx),
            Command::Zpop(cmd) => cmd.exec(ctx),
            Command::Zrange(cmd) => cmd.exec(ctx),
            Command::Zrank(cmd) => cmd.exec(ctx),
            Command::Zrem(cmd) => cmd.exec(ctx),
            Command::Zremrangebylex(cmd) => cmd.exec(ctx),
            Command::Zremrangebyrank(cmd) => cmd.exec(ctx),
            Command::Zremrangebyscore(cmd) => cmd.exec(ctx),
            Command::Zscan(cmd) => cmd.exec(ctx),
            Command::Zscore(cmd) => cmd.exec(ctx),
            Command::Zstore(cmd) => cmd.exec(ctx),
        }
    }
}

impl Command {
    /// Hands blocking commands over to the scheduler; every other command comes back unchanged.
    pub(crate) fn into_blocking(self) -> Result<Box<dyn Blocking>, Command> {
        match self {
            Command::Blmove(cmd) => Ok(Box::new(cmd)),
            Command::Bpop(cmd) => Ok(Box::new(cmd)),
            Command::Bzpop(cmd) => Ok(Box::new(cmd)),
            cmd => Err(cmd),
        }
    }
}

impl TryFrom<Frame> for Command {
    type Error = CommandError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        let spec = resolve(&frame)?;
        // Commands arrive as arrays; `resolve` has checked that much.
        let parts = match frame {
            Frame::Array(parts) => parts,
            _ => return Err(CommandError::Syntax),
        };

        let mut parts = parts.into_iter();
        parts.next();
        let parser = &mut CommandParser { spec, parts };

        match spec.name {
            "append" => Append::try_from(parser).map(Command::Append),
            "bgsave" | "save" => Save::try_from(parser).map(Command::Save),
            "bitcount" => Bitcount::try_from(parser).map(Command::Bitcount),
            "blmove" | "brpoplpush" => Blmove::try_from(parser).map(Command::Blmove),
            "blpop" | "brpop" => Bpop::try_from(parser).map(Command::Bpop),
            "bzpopmax" | "bzpopmin" => Bzpop::try_from(parser).map(Command::Bzpop),
            "dbsize" => Dbsize::try_from(parser).map(Command::Dbsize),
            "decr" => Decr::try_from(parser).map(Command::Decr),
            "decrby" => DecrBy::try_from(parser).map(Command::DecrBy),
            "del" | "unlink" => Del::try_from(parser).map(Command::Del),
            "discard" => Discard::try_from(parser).map(Command::Discard),
            "dump" => Dump::try_from(parser).map(Command::Dump),
            "echo" => Echo::try_from(parser).map(Command::Echo),
            "eval" | "evalsha" => Eval::try_from(parser).map(Command::Eval),
            "exec" => Exec::try_from(parser).map(Command::Exec),
            "exists" => Exists::try_from(parser).map(Command::Exists),
            "expire" | "expireat" | "pexpire" | "pexpireat" => {
                Expire::try_from(parser).map(Command::Expire)
            }
            "flushall" | "flushdb" => Flush::try_from(parser).map(Command::Flush),
            "get" => Get::try_from(parser).map(Command::Get),
            "getbit" => Getbit::try_from(parser).map(Command::Getbit),
            "getdel" => Getdel::try_from(parser).map(Command::Getdel),
            "getex" => Getex::try_from(parser).map(Command::Getex),
            "getrange" | "substr" => Getrange::try_from(parser).map(Command::Getrange),
            "getset" => Getset::try_from(parser).map(Command::Getset),
            "hdel" => Hdel::try_from(parser).map(Command::Hdel),
            "hexists" => Hexists::try_from(parser).map(Command::Hexists),
            "hget" => Hget::try_from(parser).map(Command::Hget),
            "hgetall" => Hgetall::try_from(parser).map(Command::Hgetall),
            "hincrby" => Hincrby::try_from(parser).map(Command::Hincrby),
            "hincrbyfloat" => Hincrbyfloat::try_from(parser).map(Command::Hincrbyfloat),
            "hkeys" => Hkeys::try_from(parser).map(Command::Hkeys),
            "hlen" => Hlen::try_from(parser).map(Command::Hlen),
            "hmget" => Hmget::try_from(parser).map(Command::Hmget),
            "hscan" => Hscan::try_from(parser).map(Command::Hscan),
            "hset" | "hmset" => Hset::try_from(parser).map(Command::Hset),
            "hsetnx" => Hsetnx::try_from(parser).map(Command::Hsetnx),
            "hstrlen" => Hstrlen::try_from(parser).map(Command::Hstrlen),
            "hvals" => Hvals::try_from(parser).map(Command::Hvals),
            "incr" => Incr::try_from(parser).map(Command::Incr),
            "incrby" => IncrBy::try_from(parser).map(Command::IncrBy),
            "incrbyfloat" => Incrbyfloat::try_from(parser).map(Command::Incrbyfloat),
            "keys" => Keys::try_from(parser).map(Command::Keys),
            "lastsave" => Lastsave::try_from(parser).map(Command::Lastsave),
            "lindex" => Lindex::try_from(parser).map(Command::Lindex),
            "linsert" => Linsert::try_from(parser).map(Command::Linsert),
            "llen" => Llen::try_from(parser).map(Command::Llen),
            "lmove" | "rpoplpush" => Lmove::try_from(parser).map(Command::Lmove),
            "lpop" | "rpop" => Pop::try_from(parser).map(Command::Pop),
            "lpush" | "lpushx" | "rpush" | "rpushx" => Push::try_from(parser).map(Command::Push),
            "lrange" => Lrange::try_from(parser).map(Command::Lrange),
            "lrem" => Lrem::try_from(parser).map(Command::Lrem),
            "lset" => Lset::try_from(parser).map(Command::Lset),
            "ltrim" => Ltrim::try_from(parser).map(Command::Ltrim),
            "mget" => Mget::try_from(parser).map(Command::Mget),
            "move" => Move::try_from(parser).map(Command::Move),
            "mset" => Mset::try_from(parser).map(Command::Mset),
            "msetnx" => Msetnx::try_from(parser).map(Command::Msetnx),
            "multi" => Multi::try_from(parser).map(Command::Multi),
            "persist" => Persist::try_from(parser).map(Command::Persist),
            "pfadd" => Pfadd::try_from(parser).map(Command::Pfadd),
            "pfcount" => Pfcount::try_from(parser).map(Command::Pfcount),
            "pfmerge" => Pfmerge::try_from(parser).map(Command::Pfmerge),
            "ping" => Ping::try_from(parser).map(Command::Ping),
            "psetex" | "setex" => Setex::try_from(parser).map(Command::Setex),
            "psubscribe" | "subscribe" => Subscribe::try_from(parser).map(Command::Subscribe),
            "pttl" | "ttl" => Ttl::try_from(parser).map(Command::Ttl),
            "publish" => Publish::try_from(parser).map(Command::Publish),
            "pubsub" => Pubsub::try_from(parser).map(Command::Pubsub),
            "punsubscribe" | "unsubscribe" => {
                Unsubscribe::try_from(parser).map(Command::Unsubscribe)
            }
            "quit" => Quit::try_from(parser).map(Command::Quit),
            "randomkey" => Randomkey::try_from(parser).map(Command::Randomkey),
            "rename" | "renamenx" => Rename::try_from(parser).map(Command::Rename),
            "restore" => Restore::try_from(parser).map(Command::Restore),
            "sadd" => Sadd::try_from(parser).map(Command::Sadd),
            "scan" => Scan::try_from(parser).map(Command::Scan),
            "scard" => Scard::try_from(parser).map(Command::Scard),
            "script" => Script::try_from(parser).map(Command::Script),
            "sdiff" | "sdiffstore" | "sinter" | "sinterstore" | "sunion" | "sunionstore" => {
                SetOp::try_from(parser).map(Command::SetOp)
            }
            "select" => Select::try_from(parser).map(Command::Select),
            "set" => Set::try_from(parser).map(Command::Set),
            "setbit" => Setbit::try_from(parser).map(Command::Setbit),
            "setnx" => Setnx::try_from(parser).map(Command::Setnx),
            "setrange" => Setrange::try_from(parser).map(Command::Setrange),
            "sismember" => Sismember::try_from(parser).map(Command::Sismember),
            "smembers" => Smembers::try_from(parser).map(Command::Smembers),
            "smismember" => Smismember::try_from(parser).map(Command::Smismember),
            "smove" => Smove::try_from(parser).map(Command::Smove),
            "sort" => Sort::try_from(parser).map(Command::Sort),
            "spop" => Spop::try_from(parser).map(Command::Spop),
            "srandmember" => Srandmember::try_from(parser).map(Command::Srandmember),
            "srem" => Srem::try_from(parser).map(Command::Srem),
            "sscan" => Sscan::try_from(parser).map(Command::Sscan),
            "strlen" => Strlen::try_from(parser).map(Command::Strlen),
            "swapdb" => Swapdb::try_from(parser).map(Command::Swapdb),
            "time" => Time::try_from(parser).map(Command::Time),
            "type" => Type::try_from(parser).map(Command::Type),
            "unwatch" => Unwatch::try_from(parser).map(Command::Unwatch),
            "watch" => Watch::try_from(parser).map(Command::Watch),
            "zadd" => Zadd::try_from(parser).map(Command::Zadd),
            "zcard" => Zcard::try_from(parser).map(Command::Zcard),
            "zcount" => Zcount::try_from(parser).map(Command::Zcount),
            "zincrby" => Zincrby::try_from(parser).map(Command::Zincrby),
            "zinterstore" | "zunionstore" => Zstore::try_from(parser).map(Command::Zstore),
            "zlexcount" => Zlexcount::try_from(parser).map(Command::Zlexcount),
            "zmscore" => Zmscore::try_from(parser).map(Command::Zmscore),
            "zpopmax" | "zpopmin" => Zpop::try_from(parser).map(Command::Zpop),
            "zrange" | "zrangebylex" | "zrangebyscore" | "zrevrange" | "zrevrangebylex"
            | "zrevrangebyscore" => Zrange::try_from(parser).map(Command::Zrange),
            "zrank" | "zrevrank" => Zrank::try_from(parser).map(Command::Zrank),
            "zrem" => Zrem::try_from(parser).map(Command::Zrem),
            "zremrangebylex" => Zremrangebylex::try_from(parser).map(Command::Zremrangebylex),
            "zremrangebyrank" => Zremrangebyrank::try_from(parser).map(Command::Zremrangebyrank),
            "zremrangebyscore" => {
                Zremrangebyscore::try_from(parser).map(Command::Zremrangebyscore)
            }
            "zscan" => Zscan::try_from(parser).map(Command::Zscan),
            "zscore" => Zscore::try_from(parser).map(Command::Zscore),
            name => Err(CommandError::UnknownCommand(name.to_string())),
        }
    }
}

/// Looks up the command named by the first element of `frame` and checks its argument count,
/// without consuming the frame. This is all the validation a command gets when it is queued
/// inside MULTI.
pub(crate) fn resolve(frame: &Frame) -> Result<&'static CommandSpec, CommandError> {
    let parts = match frame {
        Frame::Array(parts) => parts,
        _ => return Err(CommandError::Syntax),
    };
    let name = match parts.first() {
        Some(Frame::Bulk(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
        Some(Frame::Simple(s)) => s.clone(),
        _ => return Err(CommandError::UnknownCommand(String::new())),
    };

    let spec = table::lookup(&name.to_lowercase())
        .ok_or(CommandError::UnknownCommand(name))?;
    spec.check_arity(parts.len())?;
    Ok(spec)
}

/// Parses and runs one command. Used when EXEC replays its queue: every failure becomes that
/// command's own reply.
pub(crate) fn execute(ctx: &mut Context<'_>, frame: Frame) -> Frame {
    Command::try_from(frame)
        .and_then(|cmd| {
            debug!(?cmd, "executing");
            cmd.exec(ctx)
        })
        .unwrap_or_else(Frame::from)
}

/// Parses and runs one command on behalf of a script.
pub(crate) fn execute_from_script(
    ctx: &mut Context<'_>,
    frame: Frame,
) -> Result<Frame, CommandError> {
    let spec = resolve(&frame)?;
    if spec.has(table::NO_SCRIPT) {
        return Err(CommandError::NotAllowedFromScript);
    }
    let cmd = Command::try_from(frame)?;
    debug!(?cmd, "executing from script");
    cmd.exec(ctx)
}

pub(crate) struct CommandParser {
    spec: &'static CommandSpec,
    parts: vec::IntoIter<Frame>,
}

impl CommandParser {
    /// The lowercase name the command was invoked with.
    pub(crate) fn name(&self) -> &'static str {
        self.spec.name
    }

    pub(crate) fn remaining(&self) -> usize {
        self.parts.len()
    }

    pub(crate) fn has_next(&self) -> bool {
        self.parts.len() > 0
    }

    pub(crate) fn next_bytes(&mut self) -> Result<Bytes, CommandError> {
        // Arity was checked up front, so running dry means an option is missing its value.
        let frame = self.parts.next().ok_or(CommandError::Syntax)?;

        match frame {
            Frame::Bulk(bytes) => Ok(bytes),
            Frame::Simple(s) => Ok(Bytes::from(s)),
            Frame::Integer(i) => Ok(Bytes::from(i.to_string())),
            _ => Err(CommandError::Syntax),
        }
    }

    /// The next argument as text, with invalid UTF-8 replaced.
    pub(crate) fn next_string(&mut self) -> Result<String, CommandError> {
        let bytes = self.next_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// The next argument uppercased, for matching option keywords.
    pub(crate) fn next_token(&mut self) -> Result<String, CommandError> {
        Ok(self.next_string()?.to_uppercase())
    }

    pub(crate) fn next_integer(&mut self) -> Result<i64, CommandError> {
        let bytes = self.next_bytes()?;
        parse_int(&bytes).ok_or(CommandError::NotInteger)
    }

    pub(crate) fn next_float(&mut self) -> Result<f64, CommandError> {
        let bytes = self.next_bytes()?;
        parse_float(&bytes).ok_or(CommandError::NotFloat)
    }

    /// A blocking timeout in seconds. Zero means wait forever and comes back as `None`.
    pub(crate) fn next_timeout(&mut self) -> Result<Option<Duration>, CommandError> {
        let bytes = self.next_bytes()?;
        let secs = parse_float(&bytes).ok_or(CommandError::TimeoutNotFloat)?;
        if secs < 0.0 {
            return Err(CommandError::TimeoutNegative);
        }
        if secs == 0.0 {
            return Ok(None);
        }
        Duration::try_from_secs_f64(secs)
            .map(Some)
            .map_err(|_| CommandError::TimeoutNotFloat)
    }

    pub(crate) fn next_score_bound(&mut self) -> Result<ScoreBound, CommandError> {
        let bytes = self.next_bytes()?;
        ScoreBound::parse(&bytes).ok_or(CommandError::MinMaxNotFloat)
    }

    pub(crate) fn next_lex_bound(&mut self) -> Result<LexBound, CommandError> {
        let bytes = self.next_bytes()?;
        LexBound::parse(&bytes).ok_or(CommandError::MinMaxNotString)
    }

    /// Every remaining argument.
    pub(crate) fn rest(&mut self) -> Result<Vec<Bytes>, CommandError> {
        let mut rest = Vec::with_capacity(self.remaining());
        while self.has_next() {
            rest.push(self.next_bytes()?);
        }
        Ok(rest)
    }

    /// Fails with a syntax error if any argument was left unread.
    pub(crate) fn finish(&mut self) -> Result<(), CommandError> {
        if self.has_next() {
            Err(CommandError::Syntax)
        } else {
            Ok(())
        }
    }
}
