//! The Lua bridge behind EVAL and EVALSHA.
//!
//! Every script runs in a fresh interpreter with `KEYS`, `ARGV` and a `redis` table installed.
//! `redis.call` runs a command against the caller's database and raises on error replies;
//! `redis.pcall` hands the error back as an `{err=...}` table instead. The set of global names is
//! captured once the environment is set up, and a script that adds globals is stopped at its next
//! callback or when it returns.
//!
//! Type conversions, command reply to Lua:
//!   - Bulk string -> Lua string
//!   - Integer -> Lua number
//!   - Status -> `{ok=...}`
//!   - Null -> `false`
//!   - Array -> 1-indexed table
//!
//! and Lua to reply:
//!   - `{ok=...}` / `{err=...}` -> status / error
//!   - other tables -> array, up to the first nil
//!   - numbers -> integer, truncated
//!   - strings -> bulk string
//!   - `true` -> 1, `false` and nil -> null

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use bytes::Bytes;
use itertools::Itertools;
use mlua::{Lua, MultiValue, Table, Value as LuaValue};
use sha1::{Digest, Sha1};
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

use crate::commands;
use crate::commands::executable::Context;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::number::format_g17;

const LOG_DEBUG: i64 = 0;
const LOG_VERBOSE: i64 = 1;
const LOG_NOTICE: i64 = 2;
const LOG_WARNING: i64 = 3;

pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

/// Scripts by the hex SHA1 of their source. Shared by every client of a server and only
/// emptied by SCRIPT FLUSH.
#[derive(Debug, Default)]
pub struct ScriptCache {
    scripts: HashMap<String, Bytes>,
}

impl ScriptCache {
    /// Stores a script and returns its id.
    pub fn load(&mut self, script: Bytes) -> String {
        let sha = sha1_hex(&script);
        self.scripts.insert(sha.clone(), script);
        sha
    }

    pub fn get(&self, sha: &str) -> Option<Bytes> {
        self.scripts.get(sha).cloned()
    }

    pub fn contains(&self, sha: &str) -> bool {
        self.scripts.contains_key(sha)
    }

    pub fn flush(&mut self) {
        self.scripts.clear();
    }
}

// An error reply raised inside Lua. Carries the exact reply text back out of the interpreter.
#[derive(Debug, ThisError)]
#[error("{0}")]
struct Raised(String);

fn raise(err: CommandError) -> mlua::Error {
    mlua::Error::external(Raised(err.to_string()))
}

// Digs a `Raised` out of the wrapping mlua adds around callback failures.
fn raised(err: &mlua::Error) -> Option<&Raised> {
    match err {
        mlua::Error::ExternalError(inner) => inner.downcast_ref::<Raised>(),
        mlua::Error::CallbackError { cause, .. } => raised(cause),
        mlua::Error::WithContext { cause, .. } => raised(cause),
        _ => None,
    }
}

/// Runs `script` with the given keys and arguments and converts what it returns into a reply.
pub(crate) fn run(
    ctx: &mut Context<'_>,
    sha: &str,
    script: &[u8],
    keys: &[Bytes],
    args: &[Bytes],
) -> Result<Frame, CommandError> {
    let lua = Lua::new();
    let ctx = RefCell::new(ctx);

    let outcome = install(&lua, keys, args).and_then(|redis| {
        // Everything defined so far is part of the sandbox. Anything else is a leaked global.
        let expected = global_names(&lua)?;
        let expected = &expected;
        let ctx = &ctx;

        lua.scope(|scope| {
            redis.set(
                "call",
                scope.create_function(move |lua, argv: MultiValue| {
                    check_globals(lua, expected)?;
                    call(lua, ctx, argv)
                })?,
            )?;
            redis.set(
                "pcall",
                scope.create_function(move |lua, argv: MultiValue| {
                    let result = check_globals(lua, expected).and_then(|_| call(lua, ctx, argv));
                    match result {
                        Ok(value) => Ok(value),
                        Err(err) => {
                            let message = match raised(&err) {
                                Some(Raised(message)) => message.clone(),
                                None => lua_message(&err),
                            };
                            tagged(lua, "err", LuaValue::String(lua.create_string(&message)?))
                        }
                    }
                })?,
            )?;
            redis.set(
                "log",
                scope.create_function(move |lua, argv: MultiValue| {
                    check_globals(lua, expected)?;
                    log(argv)
                })?,
            )?;

            let value = lua
                .load(script)
                .set_name("=user_script")
                .eval::<LuaValue>()?;
            check_globals(&lua, expected)?;
            to_reply(value, false)
        })
    });

    match outcome {
        Ok(frame) => Ok(frame),
        Err(err) => match raised(&err) {
            Some(Raised(message)) => Ok(Frame::Error(message.clone())),
            None => Err(CommandError::Script {
                sha: sha.to_string(),
                message: lua_message(&err),
            }),
        },
    }
}

// Sets up KEYS, ARGV and the parts of the `redis` table that never touch the database.
fn install(lua: &Lua, keys: &[Bytes], args: &[Bytes]) -> mlua::Result<Table> {
    let globals = lua.globals();
    globals.set("KEYS", sequence(lua, keys)?)?;
    globals.set("ARGV", sequence(lua, args)?)?;

    let redis = lua.create_table()?;
    redis.set("LOG_DEBUG", LOG_DEBUG)?;
    redis.set("LOG_VERBOSE", LOG_VERBOSE)?;
    redis.set("LOG_NOTICE", LOG_NOTICE)?;
    redis.set("LOG_WARNING", LOG_WARNING)?;
    redis.set(
        "status_reply",
        lua.create_function(|lua, msg: LuaValue| tagged(lua, "ok", msg))?,
    )?;
    redis.set(
        "error_reply",
        lua.create_function(|lua, msg: LuaValue| tagged(lua, "err", msg))?,
    )?;
    redis.set(
        "sha1hex",
        lua.create_function(|_, data: mlua::String| Ok(sha1_hex(&data.as_bytes())))?,
    )?;
    globals.set("redis", redis.clone())?;
    Ok(redis)
}

// The interpreter's own message, without mlua's kind prefix or the stack traceback. Error
// replies are a single line.
fn lua_message(err: &mlua::Error) -> String {
    let text = match err {
        mlua::Error::RuntimeError(message) => message.clone(),
        mlua::Error::SyntaxError { message, .. } => message.clone(),
        mlua::Error::CallbackError { cause, .. } => return lua_message(cause),
        mlua::Error::WithContext { cause, .. } => return lua_message(cause),
        other => other.to_string(),
    };
    text.lines().next().unwrap_or_default().to_string()
}

fn sequence(lua: &Lua, items: &[Bytes]) -> mlua::Result<Table> {
    let table = lua.create_table()?;
    for (i, item) in items.iter().enumerate() {
        table.raw_set(i + 1, lua.create_string(item)?)?;
    }
    Ok(table)
}

fn tagged(lua: &Lua, tag: &str, value: LuaValue) -> mlua::Result<LuaValue> {
    let table = lua.create_table()?;
    table.raw_set(tag, value)?;
    Ok(LuaValue::Table(table))
}

fn global_names(lua: &Lua) -> mlua::Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for pair in lua.globals().pairs::<LuaValue, LuaValue>() {
        let (name, _) = pair?;
        let name = match name {
            LuaValue::String(name) => name.to_string_lossy(),
            other => format!("{:?}", other),
        };
        names.insert(name);
    }
    Ok(names)
}

fn check_globals(lua: &Lua, expected: &BTreeSet<String>) -> mlua::Result<()> {
    let actual = global_names(lua)?;
    if &actual == expected {
        return Ok(());
    }
    let leaked = actual.difference(expected).join(", ");
    Err(raise(CommandError::GlobalVariable(leaked)))
}

fn call(lua: &Lua, ctx: &RefCell<&mut Context<'_>>, argv: MultiValue) -> mlua::Result<LuaValue> {
    if argv.is_empty() {
        return Err(raise(CommandError::LuaCallNoArguments));
    }

    let mut parts = Vec::with_capacity(argv.len());
    for arg in argv {
        let bytes = match arg {
            LuaValue::String(s) => Bytes::copy_from_slice(&s.as_bytes()),
            LuaValue::Integer(i) => Bytes::from(i.to_string()),
            LuaValue::Number(n) => Bytes::from(format_g17(n)),
            _ => return Err(raise(CommandError::LuaCallArgument)),
        };
        parts.push(Frame::Bulk(bytes));
    }

    let reply = {
        let mut ctx = ctx.borrow_mut();
        commands::execute_from_script(&mut ctx, Frame::Array(parts)).map_err(raise)?
    };
    match reply {
        Frame::Error(message) => Err(mlua::Error::external(Raised(message))),
        reply => to_lua(lua, reply),
    }
}

fn to_lua(lua: &Lua, frame: Frame) -> mlua::Result<LuaValue> {
    let value = match frame {
        Frame::Bulk(bytes) => LuaValue::String(lua.create_string(&bytes)?),
        Frame::Integer(i) => LuaValue::Integer(i as _),
        Frame::Simple(s) => tagged(lua, "ok", LuaValue::String(lua.create_string(&s)?))?,
        Frame::Error(s) => tagged(lua, "err", LuaValue::String(lua.create_string(&s)?))?,
        Frame::Null | Frame::NullArray | Frame::NoReply => LuaValue::Boolean(false),
        Frame::Array(frames) => {
            let table = lua.create_table()?;
            for (i, frame) in frames.into_iter().enumerate() {
                table.raw_set(i + 1, to_lua(lua, frame)?)?;
            }
            LuaValue::Table(table)
        }
    };
    Ok(value)
}

// An `{err=...}` table at the top level fails the whole script. Nested ones become error
// elements of the array reply.
fn to_reply(value: LuaValue, nested: bool) -> mlua::Result<Frame> {
    let frame = match value {
        LuaValue::Table(table) => {
            for tag in ["ok", "err"] {
                let payload: LuaValue = table.raw_get(tag)?;
                if payload.is_nil() {
                    continue;
                }
                let message = match to_reply(payload, true)? {
                    Frame::Bulk(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                    _ => return Err(raise(CommandError::LuaWrongArguments)),
                };
                return match (tag, nested) {
                    ("ok", _) => Ok(Frame::Simple(message)),
                    (_, true) => Ok(Frame::Error(message)),
                    (_, false) => Err(mlua::Error::external(Raised(message))),
                };
            }

            let mut items = Vec::new();
            for index in 1.. {
                let item: LuaValue = table.raw_get(index)?;
                if item.is_nil() {
                    break;
                }
                items.push(to_reply(item, true)?);
            }
            Frame::Array(items)
        }
        LuaValue::String(s) => Frame::Bulk(Bytes::copy_from_slice(&s.as_bytes())),
        LuaValue::Integer(i) => Frame::Integer(i as i64),
        LuaValue::Number(n) => Frame::Integer(n.trunc() as i64),
        LuaValue::Boolean(true) => Frame::Integer(1),
        _ => Frame::Null,
    };
    Ok(frame)
}

fn log(argv: MultiValue) -> mlua::Result<()> {
    let mut argv = argv.into_iter();
    let level = argv.next();
    let words: Vec<LuaValue> = argv.collect();
    if words.is_empty() {
        return Err(raise(CommandError::LuaLogArguments));
    }

    let level = match level {
        Some(LuaValue::Integer(level)) => level as i64,
        Some(LuaValue::Number(level)) if level.fract() == 0.0 => level as i64,
        _ => return Err(raise(CommandError::LuaLogLevel)),
    };

    let message = words
        .iter()
        .filter_map(|word| match word {
            LuaValue::Boolean(_) => None,
            LuaValue::String(s) => Some(s.to_string_lossy()),
            LuaValue::Integer(i) => Some(i.to_string()),
            LuaValue::Number(n) => Some(n.to_string()),
            other => Some(format!("{:?}", other)),
        })
        .join(" ");

    match level {
        LOG_DEBUG => debug!(target: "user_script", "{}", message),
        LOG_VERBOSE | LOG_NOTICE => info!(target: "user_script", "{}", message),
        LOG_WARNING => warn!(target: "user_script", "{}", message),
        _ => return Err(raise(CommandError::LuaLogLevel)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{bulk, Harness};

    fn eval(harness: &mut Harness, script: &str, keys: &[&str], args: &[&str]) -> Frame {
        let keys: Vec<Bytes> = keys.iter().map(|k| Bytes::from(k.to_string())).collect();
        let args: Vec<Bytes> = args.iter().map(|a| Bytes::from(a.to_string())).collect();
        let sha = sha1_hex(script.as_bytes());
        run(&mut harness.ctx(), &sha, script.as_bytes(), &keys, &args)
            .unwrap_or_else(Frame::from)
    }

    #[test]
    fn cache_by_sha() {
        let mut cache = ScriptCache::default();
        let sha = cache.load(Bytes::from("return 1"));
        assert_eq!(sha, "e0e1f9fabfc9d4800c877a703b823ac0578ff8db");
        assert!(cache.contains(&sha));
        assert_eq!(cache.get(&sha), Some(Bytes::from("return 1")));

        cache.flush();
        assert!(!cache.contains(&sha));
    }

    #[test]
    fn keys_and_argv() {
        let mut harness = Harness::new();
        let reply = eval(
            &mut harness,
            "return {KEYS[1], ARGV[1], ARGV[2]}",
            &["k"],
            &["a", "b"],
        );
        assert_eq!(reply, Frame::Array(vec![bulk("k"), bulk("a"), bulk("b")]));
    }

    #[test]
    fn call_reaches_the_database() {
        let mut harness = Harness::new();
        let reply = eval(
            &mut harness,
            "redis.call('SET', KEYS[1], ARGV[1]); return redis.call('GET', KEYS[1])",
            &["k"],
            &["v"],
        );
        assert_eq!(reply, bulk("v"));
        assert_eq!(harness.run(&["GET", "k"]), bulk("v"));
    }

    #[test]
    fn reply_conversions() {
        let mut harness = Harness::new();
        assert_eq!(eval(&mut harness, "return 3.99", &[], &[]), Frame::Integer(3));
        assert_eq!(eval(&mut harness, "return -3.99", &[], &[]), Frame::Integer(-3));
        assert_eq!(eval(&mut harness, "return true", &[], &[]), Frame::Integer(1));
        assert_eq!(eval(&mut harness, "return false", &[], &[]), Frame::Null);
        assert_eq!(eval(&mut harness, "return nil", &[], &[]), Frame::Null);
        assert_eq!(
            eval(&mut harness, "return {1, 2, nil, 4}", &[], &[]),
            Frame::Array(vec![Frame::Integer(1), Frame::Integer(2)])
        );
        assert_eq!(
            eval(&mut harness, "return redis.status_reply('fine')", &[], &[]),
            Frame::Simple("fine".to_string())
        );
        assert_eq!(
            eval(&mut harness, "return {err='boom'}", &[], &[]),
            Frame::Error("boom".to_string())
        );
        assert_eq!(
            eval(&mut harness, "return {1, {err='inner'}}", &[], &[]),
            Frame::Array(vec![Frame::Integer(1), Frame::Error("inner".to_string())])
        );
        assert_eq!(
            eval(&mut harness, "return {ok=1}", &[], &[]),
            Frame::Error("ERR wrong number or type of arguments".to_string())
        );
    }

    #[test]
    fn command_replies_seen_from_lua() {
        let mut harness = Harness::new();
        harness.run(&["RPUSH", "l", "a", "b"]);
        let reply = eval(
            &mut harness,
            "local r = redis.call('LRANGE', 'l', 0, -1); \
             local missing = redis.call('GET', 'nope'); \
             local ok = redis.call('SET', 'x', 1); \
             return {#r, r[2], tostring(missing), ok['ok']}",
            &[],
            &[],
        );
        assert_eq!(
            reply,
            Frame::Array(vec![Frame::Integer(2), bulk("b"), bulk("false"), bulk("OK")])
        );
    }

    #[test]
    fn call_errors_propagate_and_pcall_returns_them() {
        let mut harness = Harness::new();
        harness.run(&["SET", "s", "v"]);

        assert_eq!(
            eval(&mut harness, "return redis.call('LPUSH', 's', 'x')", &[], &[]),
            Frame::Error(
                "WRONGTYPE Operation against a key holding the wrong kind of value".to_string()
            )
        );
        assert_eq!(
            eval(
                &mut harness,
                "local r = redis.pcall('LPUSH', 's', 'x'); return r['err']",
                &[],
                &[]
            ),
            bulk("WRONGTYPE Operation against a key holding the wrong kind of value")
        );
        assert_eq!(
            eval(&mut harness, "return redis.call()", &[], &[]),
            Frame::Error(
                "ERR Please specify at least one argument for this redis lib call".to_string()
            )
        );
        assert_eq!(
            eval(&mut harness, "return redis.call('GET', {})", &[], &[]),
            Frame::Error(
                "ERR Lua redis() command arguments must be strings or integers".to_string()
            )
        );
        assert_eq!(
            eval(&mut harness, "return redis.call('MULTI')", &[], &[]),
            Frame::Error("ERR This Redis command is not allowed from scripts".to_string())
        );
    }

    #[test]
    fn numbers_are_passed_with_full_precision() {
        let mut harness = Harness::new();
        eval(&mut harness, "redis.call('SET', 'f', 0.1)", &[], &[]);
        eval(&mut harness, "redis.call('SET', 'i', 5)", &[], &[]);
        assert_eq!(harness.run(&["GET", "f"]), bulk("0.10000000000000001"));
        assert_eq!(harness.run(&["GET", "i"]), bulk("5"));
    }

    #[test]
    fn leaked_globals_are_reported() {
        let mut harness = Harness::new();
        assert_eq!(
            eval(&mut harness, "leak = 1; return 1", &[], &[]),
            Frame::Error("ERR Script attempted to set global variables: leak".to_string())
        );
        assert_eq!(
            eval(&mut harness, "leak = 1; return redis.call('PING')", &[], &[]),
            Frame::Error("ERR Script attempted to set global variables: leak".to_string())
        );
        assert_eq!(
            eval(&mut harness, "local fine = 1; return fine", &[], &[]),
            Frame::Integer(1)
        );
    }

    #[test]
    fn runtime_errors_name_the_script() {
        let mut harness = Harness::new();
        let script = "error('boom')";
        let reply = eval(&mut harness, script, &[], &[]);
        assert_eq!(
            reply,
            Frame::Error(format!(
                "ERR Error running script (call to f_{}): @user_script:?: user_script:1: boom",
                sha1_hex(script.as_bytes())
            ))
        );
        let newlines = reply.serialize().iter().filter(|b| **b == b'\n').count();
        assert_eq!(newlines, 1);
    }

    #[test]
    fn error_messages_stay_on_one_line() {
        let mut harness = Harness::new();
        let script = "return nil + 1";
        match eval(&mut harness, script, &[], &[]) {
            Frame::Error(message) => {
                assert!(message.starts_with(&format!(
                    "ERR Error running script (call to f_{}): @user_script:?: user_script:1: ",
                    sha1_hex(script.as_bytes())
                )));
                assert!(!message.contains('\n'));
                assert!(!message.contains("stack traceback"));
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn lua_message_keeps_the_first_line() {
        let err = mlua::Error::RuntimeError(
            "user_script:1: boom\nstack traceback:\n\t[C]: in ?".to_string(),
        );
        assert_eq!(lua_message(&err), "user_script:1: boom");

        let err = mlua::Error::SyntaxError {
            message: "user_script:1: unexpected symbol near '+'".to_string(),
            incomplete_input: false,
        };
        assert_eq!(lua_message(&err), "user_script:1: unexpected symbol near '+'");
    }

    #[test]
    fn log_checks_its_arguments() {
        let mut harness = Harness::new();
        assert_eq!(
            eval(&mut harness, "redis.log(redis.LOG_WARNING, 'hi', 1, true)", &[], &[]),
            Frame::Null
        );
        assert_eq!(
            eval(&mut harness, "redis.log(redis.LOG_WARNING)", &[], &[]),
            Frame::Error("ERR redis.log() requires two arguments or more.".to_string())
        );
        assert_eq!(
            eval(&mut harness, "redis.log(10, 'x')", &[], &[]),
            Frame::Error("ERR Invalid debug level.".to_string())
        );
    }

    #[test]
    fn sha1hex_helper() {
        let mut harness = Harness::new();
        assert_eq!(
            eval(&mut harness, "return redis.sha1hex('')", &[], &[]),
            bulk("da39a3ee5e6b4b0d3255bfef95601890afd80709")
        );
    }
}
