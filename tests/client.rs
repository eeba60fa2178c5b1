use resp_client::{client, Client, CommandError, ConnectInfo, Connection, Error, Value};

use bytes::Bytes;
use std::io::ErrorKind;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::net::TcpListener;

/// A client wired to an in-memory stream. The other half plays the server.
fn pair(info: ConnectInfo) -> (Client<DuplexStream>, DuplexStream) {
    let (client_io, server_io) = io::duplex(64 * 1024);
    (Client::new(client_io, info), server_io)
}

/// Reads exactly `expected.len()` bytes from the server half and compares them.
async fn assert_request(server: &mut DuplexStream, expected: &[u8]) {
    let mut buf = vec![0; expected.len()];
    server.read_exact(&mut buf).await.unwrap();
    assert_eq!(buf, expected, "{:?}", String::from_utf8_lossy(&buf));
}

#[tokio::test]
async fn ping_pong() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"+PONG\r\n").await.unwrap();

    assert!(client.ping().await.unwrap());
    assert_request(&mut server, b"*1\r\n$4\r\nPING\r\n").await;
}

#[tokio::test]
async fn ping_other_string_is_unexpected() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"$4\r\nPONG\r\n").await.unwrap();

    match client.ping().await {
        Err(Error::Command(CommandError::UnexpectedReply(reply))) => {
            assert_eq!(reply, Value::Bulk(Bytes::from_static(b"PONG")))
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn hget_present_and_missing() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"$3\r\nbar\r\n$-1\r\n").await.unwrap();

    assert_eq!(client.hget("h", "f").await.unwrap(), Some("bar".to_string()));
    assert_eq!(client.hget("h", "f").await.unwrap(), None);

    let one = b"*3\r\n$4\r\nHGET\r\n$1\r\nh\r\n$1\r\nf\r\n";
    assert_request(&mut server, one).await;
    assert_request(&mut server, one).await;
}

#[tokio::test]
async fn hgetall_flattened_pairs() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server
        .write_all(b"*2\r\n$1\r\na\r\n$1\r\n1\r\n")
        .await
        .unwrap();

    assert_eq!(client.hgetall("h").await.unwrap(), vec!["a", "1"]);
    assert_request(&mut server, b"*2\r\n$7\r\nHGETALL\r\n$1\r\nh\r\n").await;
}

#[tokio::test]
async fn hgetall_non_bulk_element_is_unexpected() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server
        .write_all(b"*2\r\n$1\r\na\r\n-ERR nope\r\n")
        .await
        .unwrap();

    assert!(matches!(
        client.hgetall("h").await,
        Err(Error::Command(CommandError::UnexpectedReply(Value::Array(_))))
    ));
}

#[tokio::test]
async fn echo_error_reply() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"-ERR bad\r\n").await.unwrap();

    let err = client.echo("hi").await.unwrap_err();
    match err.as_command() {
        Some(CommandError::RedisError(msg)) => assert_eq!(msg, "ERR bad"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn echo_round_trip() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"$2\r\nhi\r\n$2\r\nho\r\n").await.unwrap();

    assert_eq!(client.echo("hi").await.unwrap(), "hi");
    // a valid bulk that differs from the message is still a mismatch
    assert!(matches!(
        client.echo("hi").await,
        Err(Error::Command(CommandError::UnexpectedReply(_)))
    ));
}

#[tokio::test]
async fn auth_without_password_sends_nothing() {
    let (mut client, mut server) = pair(ConnectInfo::default());

    assert!(matches!(
        client.auth().await,
        Err(Error::Command(CommandError::MissingPassword))
    ));

    drop(client);

    let mut sent = Vec::new();
    server.read_to_end(&mut sent).await.unwrap();
    assert!(sent.is_empty());
}

#[tokio::test]
async fn auth_with_password() {
    let info = ConnectInfo::default().with_password("secret");
    let (mut client, mut server) = pair(info);
    server.write_all(b"+OK\r\n-ERR invalid password\r\n").await.unwrap();

    client.auth().await.unwrap();
    assert_request(&mut server, b"*2\r\n$4\r\nAUTH\r\n$6\r\nsecret\r\n").await;

    match client.auth().await {
        Err(Error::Command(CommandError::RedisError(msg))) => {
            assert_eq!(msg, "ERR invalid password")
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn select_passes_status_through() {
    let info = ConnectInfo::default().with_database(3);
    let (mut client, mut server) = pair(info);
    server.write_all(b"+OK\r\n").await.unwrap();

    assert_eq!(client.database(), 3);
    assert_eq!(client.select(client.database()).await.unwrap(), "OK");
    assert_request(&mut server, b"*2\r\n$6\r\nSELECT\r\n$1\r\n3\r\n").await;
}

#[tokio::test]
async fn integer_replies() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server
        .write_all(b":2\r\n:1\r\n:0\r\n:-5\r\n:4\r\n:11\r\n")
        .await
        .unwrap();

    assert_eq!(client.hdel("h", &["a", "b"]).await.unwrap(), 2);
    assert!(client.hexists("h", "a").await.unwrap());
    assert!(!client.hexists("h", "b").await.unwrap());
    assert_eq!(client.hincrby("h", "n", -6).await.unwrap(), -5);
    assert_eq!(client.hlen("h").await.unwrap(), 4);
    assert_eq!(client.hstrlen("h", "a").await.unwrap(), 11);

    assert_request(&mut server, b"*4\r\n$4\r\nHDEL\r\n$1\r\nh\r\n$1\r\na\r\n$1\r\nb\r\n").await;
}

#[tokio::test]
async fn hincrbyfloat_reply() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"$4\r\n10.5\r\n$3\r\nabc\r\n").await.unwrap();

    assert_eq!(client.hincrbyfloat("h", "f", 0.1).await.unwrap(), 10.5);
    assert!(matches!(
        client.hincrbyfloat("h", "f", 0.1).await,
        Err(Error::Command(CommandError::UnexpectedReply(_)))
    ));
}

#[tokio::test]
async fn hash_writes_and_lists() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server
        .write_all(
            b":1\r\n:0\r\n+OK\r\n*3\r\n$1\r\n1\r\n$-1\r\n$1\r\n2\r\n*2\r\n$1\r\na\r\n$1\r\nb\r\n*0\r\n",
        )
        .await
        .unwrap();

    assert!(client.hset("h", "a", Bytes::from("1")).await.unwrap());
    assert!(!client.hsetnx("h", "a", Bytes::from("9")).await.unwrap());
    client
        .hmset("h", &[("b", Bytes::from("2")), ("c", Bytes::from("3"))])
        .await
        .unwrap();
    assert_eq!(
        client.hmget("h", &["a", "x", "b"]).await.unwrap(),
        vec![Some("1".to_string()), None, Some("2".to_string())]
    );
    assert_eq!(client.hkeys("h").await.unwrap(), vec!["a", "b"]);
    assert!(client.hvals("missing").await.unwrap().is_empty());

    assert_request(
        &mut server,
        b"*4\r\n$4\r\nHSET\r\n$1\r\nh\r\n$1\r\na\r\n$1\r\n1\r\n",
    )
    .await;
}

#[tokio::test]
async fn binary_safe_arguments() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b":1\r\n").await.unwrap();

    let value = Bytes::from_static(&[0x0d, 0x0a, 0x00, 0xff]);
    assert!(client.hset("h", "f", value).await.unwrap());

    assert_request(
        &mut server,
        b"*4\r\n$4\r\nHSET\r\n$1\r\nh\r\n$1\r\nf\r\n$4\r\n\r\n\x00\xff\r\n",
    )
    .await;
}

#[tokio::test]
async fn reply_split_across_reads() {
    let (mut client, mut server) = pair(ConnectInfo::default());

    let server_task = tokio::spawn(async move {
        let reply: &[u8] = b"*2\r\n$1\r\na\r\n$1\r\n1\r\n";

        for chunk in reply.chunks(3) {
            server.write_all(chunk).await.unwrap();
            server.flush().await.unwrap();
            tokio::task::yield_now().await;
        }

        server
    });

    assert_eq!(client.hgetall("h").await.unwrap(), vec!["a", "1"]);
    server_task.await.unwrap();
}

#[tokio::test]
async fn dispatch_returns_raw_values() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server
        .write_all(b"*2\r\n*1\r\n:1\r\n*-1\r\n-WRONGTYPE nope\r\n")
        .await
        .unwrap();

    let reply = client
        .dispatch("LRANGE", vec![Bytes::from("l"), Bytes::from("0"), Bytes::from("-1")])
        .await
        .unwrap();
    assert_eq!(
        reply,
        Value::Array(vec![Value::Array(vec![Value::Integer(1)]), Value::NullArray])
    );

    let reply = client.dispatch("GET", vec![Bytes::from("h")]).await.unwrap();
    assert_eq!(reply, Value::Error("WRONGTYPE nope".to_string()));
}

#[tokio::test]
async fn signed_length_line_is_malformed() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"$+3\r\nbar\r\n").await.unwrap();

    assert!(matches!(
        client.hget("h", "f").await.unwrap_err().as_command(),
        Some(CommandError::MalformedReply(_))
    ));
}

#[tokio::test]
async fn malformed_reply() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"%5\r\n").await.unwrap();

    assert!(matches!(
        client.ping().await,
        Err(Error::Command(CommandError::MalformedReply(_)))
    ));

    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"$abc\r\n").await.unwrap();

    assert!(matches!(
        client.hget("h", "f").await,
        Err(Error::Command(CommandError::MalformedReply(_)))
    ));
}

#[tokio::test]
async fn server_closes_mid_reply() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"$10\r\nabc").await.unwrap();
    server.shutdown().await.unwrap();

    let err = client.hget("h", "f").await.unwrap_err();
    // transport failures are not protocol errors
    assert!(err.as_command().is_none());

    match err {
        Error::Io(err) => assert_eq!(err.kind(), ErrorKind::ConnectionReset),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn server_closes_without_reply() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.shutdown().await.unwrap();

    match client.ping().await {
        Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::ConnectionReset),
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn quit_then_close() {
    let (mut client, mut server) = pair(ConnectInfo::default());
    server.write_all(b"+OK\r\n").await.unwrap();

    client.quit().await.unwrap();
    client.close().await.unwrap();

    let mut sent = Vec::new();
    server.read_to_end(&mut sent).await.unwrap();
    assert_eq!(sent, b"*1\r\n$4\r\nQUIT\r\n");
}

/// Exercises `connect` against a listener on an ephemeral port. The server side uses a
/// `Connection` to read the request and write the reply.
#[tokio::test]
async fn connect_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut connection = Connection::new(socket);

        let request = connection.read_value().await.unwrap().unwrap();
        assert_eq!(
            request,
            Value::Array(vec![
                Value::Bulk(Bytes::from_static(b"ECHO")),
                Value::Bulk(Bytes::from_static(b"over tcp")),
            ])
        );

        connection
            .write_value(&Value::Bulk(Bytes::from_static(b"over tcp")))
            .await
            .unwrap();

        // the client shuts down its write half after the reply
        assert_eq!(connection.read_value().await.unwrap(), None);
    });

    let mut client = client::connect(ConnectInfo::new("127.0.0.1", port))
        .await
        .unwrap();

    assert_eq!(client.echo("over tcp").await.unwrap(), "over tcp");
    client.close().await.unwrap();

    server.await.unwrap();
}
