use fakedis::{Client, Frame, Server};
use std::collections::BTreeSet;

async fn scan_all(client: &mut Client, argv: &[&str]) -> (Vec<String>, usize) {
    let mut cursor = "0".to_string();
    let mut seen = Vec::new();
    let mut calls = 0;
    loop {
        let mut command: Vec<String> = vec!["SCAN".to_string(), cursor.clone()];
        command.extend(argv.iter().map(|arg| arg.to_string()));
        calls += 1;

        let reply = client.execute(command).await;
        let Frame::Array(parts) = reply else {
            panic!("unexpected reply {:?}", reply);
        };
        let [Frame::Bulk(next), Frame::Array(keys)] = parts.as_slice() else {
            panic!("unexpected reply {:?}", parts);
        };
        for key in keys {
            let Frame::Bulk(key) = key else {
                panic!("unexpected key {:?}", key);
            };
            seen.push(String::from_utf8(key.to_vec()).unwrap());
        }

        cursor = String::from_utf8(next.to_vec()).unwrap();
        if cursor == "0" {
            return (seen, calls);
        }
    }
}

#[tokio::test]
async fn full_iteration_sees_every_key() {
    let server = Server::new();
    let mut client = server.client();
    for i in 0..50 {
        client.execute(["SET".to_string(), format!("key:{}", i), "v".to_string()]).await;
    }

    let (seen, calls) = scan_all(&mut client, &[]).await;
    assert_eq!(seen.len(), 50);
    let distinct: BTreeSet<&String> = seen.iter().collect();
    assert_eq!(distinct.len(), 50);
    assert!(calls > 1);
}

#[tokio::test]
async fn small_pages_never_repeat_a_key() {
    let server = Server::new();
    let mut client = server.client();
    for i in 0..50 {
        client.execute(["SET".to_string(), format!("key:{}", i), "v".to_string()]).await;
    }

    let (mut seen, _) = scan_all(&mut client, &["COUNT", "7"]).await;
    seen.sort();
    let expected: Vec<String> = {
        let mut keys: Vec<String> = (0..50).map(|i| format!("key:{}", i)).collect();
        keys.sort();
        keys
    };
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn match_and_type_filters() {
    let server = Server::new();
    let mut client = server.client();
    client.execute(["SET", "user:1", "a"]).await;
    client.execute(["SET", "user:2", "b"]).await;
    client.execute(["RPUSH", "user:list", "x"]).await;
    client.execute(["SET", "other", "c"]).await;

    let (mut seen, _) = scan_all(&mut client, &["MATCH", "user:*", "TYPE", "string"]).await;
    seen.sort();
    assert_eq!(seen, vec!["user:1".to_string(), "user:2".to_string()]);
}

#[tokio::test]
async fn invalid_cursor() {
    let server = Server::new();
    let mut client = server.client();
    assert_eq!(
        client.execute(["SCAN", "abc"]).await,
        Frame::Error("ERR invalid cursor".to_string())
    );
}
