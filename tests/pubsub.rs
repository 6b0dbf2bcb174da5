use fakedis::{Frame, Server};

fn confirmation(kind: &str, name: &str, count: i64) -> Frame {
    Frame::Array(vec![
        Frame::bulk(kind.to_string()),
        Frame::bulk(name.to_string()),
        Frame::Integer(count),
    ])
}

#[tokio::test]
async fn messages_reach_channel_and_pattern_subscribers() {
    let server = Server::new();
    let mut exact = server.client();
    let mut pattern = server.client();
    let mut publisher = server.client();

    assert_eq!(exact.execute(["SUBSCRIBE", "news.tech"]).await, Frame::NoReply);
    assert_eq!(
        exact.next_message().await,
        Some(confirmation("subscribe", "news.tech", 1))
    );
    pattern.execute(["PSUBSCRIBE", "news.*"]).await;
    assert_eq!(
        pattern.next_message().await,
        Some(confirmation("psubscribe", "news.*", 1))
    );

    assert_eq!(
        publisher.execute(["PUBLISH", "news.tech", "rust"]).await,
        Frame::Integer(2)
    );
    assert_eq!(
        exact.next_message().await,
        Some(Frame::array_of_bulks(["message", "news.tech", "rust"]))
    );
    assert_eq!(
        pattern.next_message().await,
        Some(Frame::array_of_bulks([
            "pmessage",
            "news.*",
            "news.tech",
            "rust"
        ]))
    );

    assert_eq!(
        publisher.execute(["PUBLISH", "sports", "x"]).await,
        Frame::Integer(0)
    );
}

#[tokio::test]
async fn subscribed_clients_are_restricted() {
    let server = Server::new();
    let mut client = server.client();

    client.execute(["SUBSCRIBE", "c"]).await;
    assert_eq!(
        client.execute(["GET", "k"]).await,
        Frame::Error(
            "ERR only (P)SUBSCRIBE / (P)UNSUBSCRIBE / PING / QUIT allowed in this context"
                .to_string()
        )
    );
    assert!(!client.execute(["PING"]).await.is_error());

    client.execute(["UNSUBSCRIBE"]).await;
    client.try_next_message();
    assert_eq!(
        client.try_next_message(),
        Some(confirmation("unsubscribe", "c", 0))
    );
    assert_eq!(client.execute(["GET", "k"]).await, Frame::Null);
}

#[tokio::test]
async fn pubsub_introspection() {
    let server = Server::new();
    let mut a = server.client();
    let mut b = server.client();
    let mut observer = server.client();

    a.execute(["SUBSCRIBE", "one", "two"]).await;
    b.execute(["SUBSCRIBE", "two"]).await;
    b.execute(["PSUBSCRIBE", "t*"]).await;

    assert_eq!(
        observer.execute(["PUBSUB", "CHANNELS"]).await,
        Frame::array_of_bulks(["one", "two"])
    );
    assert_eq!(
        observer.execute(["PUBSUB", "NUMSUB", "two"]).await,
        Frame::Array(vec![Frame::bulk("two"), Frame::Integer(2)])
    );
    assert_eq!(
        observer.execute(["PUBSUB", "NUMPAT"]).await,
        Frame::Integer(1)
    );

    drop(a);
    assert_eq!(
        observer.execute(["PUBSUB", "CHANNELS"]).await,
        Frame::array_of_bulks(["two"])
    );
}
