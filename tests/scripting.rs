use fakedis::scripting::sha1_hex;
use fakedis::{Frame, Server};

#[tokio::test]
async fn scripts_run_commands_atomically() {
    let server = Server::new();
    let mut client = server.client();

    let script = "local v = redis.call('INCRBY', KEYS[1], ARGV[1]) \
                  redis.call('RPUSH', KEYS[2], v) \
                  return redis.call('LRANGE', KEYS[2], 0, -1)";
    assert_eq!(
        client
            .execute(["EVAL", script, "2", "counter", "log", "5"])
            .await,
        Frame::array_of_bulks(["5"])
    );
    assert_eq!(
        client.execute(["GET", "counter"]).await,
        Frame::bulk("5")
    );
}

#[tokio::test]
async fn evalsha_uses_the_shared_cache() {
    let server = Server::new();
    let mut loader = server.client();
    let mut runner = server.client();

    let sha = match loader.execute(["SCRIPT", "LOAD", "return 'hi'"]).await {
        Frame::Bulk(sha) => String::from_utf8(sha.to_vec()).unwrap(),
        other => panic!("unexpected reply {:?}", other),
    };
    assert_eq!(
        runner.execute(["EVALSHA".to_string(), sha.clone(), "0".to_string()]).await,
        Frame::bulk("hi")
    );

    loader.execute(["SCRIPT", "FLUSH"]).await;
    assert_eq!(
        runner.execute(["EVALSHA".to_string(), sha.clone(), "0".to_string()]).await,
        Frame::Error("NOSCRIPT No matching script. Please use EVAL.".to_string())
    );
}

#[tokio::test]
async fn call_errors_propagate_and_pcall_catches_them() {
    let server = Server::new();
    let mut client = server.client();
    client.execute(["SET", "s", "x"]).await;

    assert_eq!(
        client
            .execute(["EVAL", "return redis.call('LPUSH', KEYS[1], 'a')", "1", "s"])
            .await,
        Frame::Error(
            "WRONGTYPE Operation against a key holding the wrong kind of value".to_string()
        )
    );
    assert_eq!(
        client
            .execute([
                "EVAL",
                "local r = redis.pcall('LPUSH', KEYS[1], 'a') return r['err']",
                "1",
                "s",
            ])
            .await,
        Frame::bulk("WRONGTYPE Operation against a key holding the wrong kind of value")
    );
}

#[tokio::test]
async fn status_and_error_replies() {
    let server = Server::new();
    let mut client = server.client();

    assert_eq!(
        client
            .execute(["EVAL", "return redis.status_reply('FINE')", "0"])
            .await,
        Frame::Simple("FINE".to_string())
    );
    assert_eq!(
        client
            .execute(["EVAL", "return redis.error_reply('MY failure')", "0"])
            .await,
        Frame::Error("MY failure".to_string())
    );
}

#[tokio::test]
async fn blocking_and_transaction_commands_are_refused() {
    let server = Server::new();
    let mut client = server.client();

    for script in [
        "return redis.call('BLPOP', 'l', 0)",
        "return redis.call('MULTI')",
        "return redis.call('SUBSCRIBE', 'c')",
    ] {
        assert_eq!(
            client.execute(["EVAL", script, "0"]).await,
            Frame::Error("ERR This Redis command is not allowed from scripts".to_string())
        );
    }
}

#[tokio::test]
async fn syntax_errors_name_the_script() {
    let server = Server::new();
    let mut client = server.client();

    let reply = client.execute(["EVAL", "return +", "0"]).await;
    assert_eq!(
        reply,
        Frame::Error(format!(
            "ERR Error running script (call to f_{}): @user_script:?: \
             user_script:1: unexpected symbol near '+'",
            sha1_hex(b"return +")
        ))
    );
}

#[tokio::test]
async fn runtime_errors_are_a_single_line() {
    let server = Server::new();
    let mut client = server.client();

    let reply = client.execute(["EVAL", "error('boom')", "0"]).await;
    assert_eq!(
        reply,
        Frame::Error(format!(
            "ERR Error running script (call to f_{}): @user_script:?: user_script:1: boom",
            sha1_hex(b"error('boom')")
        ))
    );
    let wire = reply.serialize();
    assert_eq!(wire.iter().filter(|b| **b == b'\n').count(), 1);
    assert!(wire.ends_with(b"\r\n"));
}
