//! Socket session tests against a local WebSocket peer.
//!
//! Each test spawns a one-shot `tokio-tungstenite` accept loop playing
//! the panel's role, then drives a real `SocketSession` against it.

#![allow(clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use ptero_client::{
    ClientError, EventFilter, Frame, SocketCredentials, SocketCredentialsSource, SocketEvent,
    SocketSession,
};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{WebSocketStream, accept_async};

const ORIGIN: &str = "https://panel.test";

/// Installs the test subscriber once; `RUST_LOG` controls verbosity.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Token source that mints `token-0`, `token-1`, ... and counts calls.
#[derive(Debug)]
struct StubSource {
    endpoint: String,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(endpoint: String) -> Arc<Self> {
        Arc::new(Self {
            endpoint,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SocketCredentialsSource for StubSource {
    async fn socket_credentials(&self) -> Result<SocketCredentials, ClientError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SocketCredentials {
            token: format!("token-{n}"),
            endpoint: self.endpoint.clone(),
        })
    }
}

async fn bind() -> (TcpListener, String) {
    init_tracing();
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(l) => l,
        Err(e) => panic!("bind failed: {e}"),
    };
    let addr = match listener.local_addr() {
        Ok(a) => a,
        Err(e) => panic!("local_addr failed: {e}"),
    };
    (listener, format!("ws://{addr}"))
}

async fn accept(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let Ok(Ok((stream, _))) =
        tokio::time::timeout(Duration::from_secs(5), listener.accept()).await
    else {
        panic!("no connection within timeout");
    };
    match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => panic!("handshake failed: {e}"),
    }
}

async fn read_frame(ws: &mut WebSocketStream<TcpStream>) -> Frame {
    let Ok(Some(Ok(msg))) = tokio::time::timeout(Duration::from_secs(5), ws.next()).await else {
        panic!("no frame within timeout");
    };
    let Ok(text) = msg.to_text() else {
        panic!("expected a text frame");
    };
    match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => panic!("malformed frame {text}: {e}"),
    }
}

async fn send_frame(ws: &mut WebSocketStream<TcpStream>, frame: &Frame) {
    let Ok(text) = serde_json::to_string(frame) else {
        panic!("frame should serialize");
    };
    if let Err(e) = ws.send(Message::text(text)).await {
        panic!("send failed: {e}");
    }
}

async fn recv_event(rx: &mut broadcast::Receiver<SocketEvent>) -> SocketEvent {
    let Ok(Ok(event)) = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await else {
        panic!("no event within timeout");
    };
    event
}

#[tokio::test]
async fn connect_authenticates_before_resolving() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let first = read_frame(&mut ws).await;
        assert_eq!(first, Frame::auth("token-0"));
        ws
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }
    assert!(session.is_connected());
    assert_eq!(source.calls(), 1);

    let Ok(_ws) = server.await else {
        panic!("server task failed");
    };
}

#[tokio::test]
async fn stats_frame_is_parsed_and_delivered() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let _auth = read_frame(&mut ws).await;
        send_frame(
            &mut ws,
            &Frame::new("stats", vec![r#"{"memory_bytes":123,"cpu_absolute":1.5}"#.into()]),
        )
        .await;
        ws
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }

    let event = recv_event(&mut events).await;
    let SocketEvent::Stats(stats) = event else {
        panic!("expected stats, got {event:?}");
    };
    assert_eq!(stats.get("memory_bytes"), Some(&serde_json::json!(123)));

    let Ok(_ws) = server.await else {
        panic!("server task failed");
    };
}

#[tokio::test]
async fn invalid_stats_is_dropped_and_named_events_flow() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let _auth = read_frame(&mut ws).await;
        send_frame(&mut ws, &Frame::new("stats", vec!["not-json".into()])).await;
        send_frame(&mut ws, &Frame::new("custom thing", vec!["x".into()])).await;
        send_frame(&mut ws, &Frame::new("custom thing", vec![])).await;
        ws
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }

    // The bad stats frame emits nothing; the first delivered event is
    // the normalized custom event with the first argument as payload.
    let event = recv_event(&mut events).await;
    assert_eq!(
        event,
        SocketEvent::Named {
            name: "custom_thing".to_string(),
            payload: Some("x".into()),
        }
    );
    let event = recv_event(&mut events).await;
    assert_eq!(
        event,
        SocketEvent::Named {
            name: "custom_thing".to_string(),
            payload: None,
        }
    );

    let Ok(_ws) = server.await else {
        panic!("server task failed");
    };
}

#[tokio::test]
async fn token_expiring_refreshes_once_and_reauthenticates() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let first = read_frame(&mut ws).await;
        assert_eq!(first, Frame::auth("token-0"));

        send_frame(&mut ws, &Frame::new("token expiring", vec![])).await;

        let reauth = read_frame(&mut ws).await;
        assert_eq!(reauth, Frame::auth("token-1"));
        ws
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }

    let event = recv_event(&mut events).await;
    assert_eq!(event, SocketEvent::TokenExpiring);
    // Exactly one fetch for connect plus one for the refresh.
    assert_eq!(source.calls(), 2);

    let Ok(_ws) = server.await else {
        panic!("server task failed");
    };
}

#[tokio::test]
async fn close_emits_one_event_and_is_idempotent() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let _auth = read_frame(&mut ws).await;
        // Hold the connection open until the client closes it.
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }

    session.close().await;
    assert!(!session.is_connected());
    let event = recv_event(&mut events).await;
    assert_eq!(
        event,
        SocketEvent::Closed {
            reason: "closed by caller".to_string(),
        }
    );

    session.close().await;
    assert!(matches!(
        events.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));

    if server.await.is_err() {
        panic!("server task failed");
    }
}

#[tokio::test]
async fn peer_close_clears_handle_and_reports_reason() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let _auth = read_frame(&mut ws).await;
        let close = CloseFrame {
            code: CloseCode::Away,
            reason: "daemon restarting".into(),
        };
        if let Err(e) = ws.send(Message::Close(Some(close))).await {
            panic!("close send failed: {e}");
        }
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }

    let event = recv_event(&mut events).await;
    assert_eq!(
        event,
        SocketEvent::Closed {
            reason: "daemon restarting".to_string(),
        }
    );
    assert!(!session.is_connected());

    // Sends after a peer-initiated close fail cleanly.
    let err = session.send_command("say hi").await;
    assert!(matches!(err, Err(ClientError::NotConnected)));

    if server.await.is_err() {
        panic!("server task failed");
    }
}

#[tokio::test]
async fn garbled_stream_reports_transport_error_then_close() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let _auth = read_frame(&mut ws).await;
        // A header with every reserved bit set is a protocol violation;
        // the client's next read fails instead of yielding a frame.
        if let Err(e) = ws.get_mut().write_all(&[0xFF, 0x80, 0x00, 0x00]).await {
            panic!("raw write failed: {e}");
        }
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }

    let event = recv_event(&mut events).await;
    let SocketEvent::TransportError(detail) = event else {
        panic!("expected a transport error, got {event:?}");
    };
    assert!(!detail.is_empty());

    let event = recv_event(&mut events).await;
    assert_eq!(
        event,
        SocketEvent::Closed {
            reason: "transport error".to_string(),
        }
    );
    assert!(!session.is_connected());

    if server.await.is_err() {
        panic!("server task failed");
    }
}

#[tokio::test]
async fn reconnect_while_open_leaves_exactly_one_live_connection() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut first = accept(&listener).await;
        let auth = read_frame(&mut first).await;
        assert_eq!(auth, Frame::auth("token-0"));

        let mut second = accept(&listener).await;
        let auth = read_frame(&mut second).await;
        assert_eq!(auth, Frame::auth("token-1"));

        // The first connection was closed by the client before the
        // second handshake happened.
        let Ok(closed) = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match first.next().await {
                    Some(Ok(msg)) if msg.is_close() => break true,
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break true,
                }
            }
        })
        .await
        else {
            panic!("first connection never closed");
        };
        assert!(closed);
        second
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("first connect failed: {e}"),
    }
    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("second connect failed: {e}"),
    }

    assert!(session.is_connected());
    assert_eq!(source.calls(), 2);

    // Closing the old connection produced exactly one event.
    let event = recv_event(&mut events).await;
    assert_eq!(
        event,
        SocketEvent::Closed {
            reason: "closed by caller".to_string(),
        }
    );

    let Ok(_second) = server.await else {
        panic!("server task failed");
    };
}

#[tokio::test]
async fn send_command_and_power_action_reach_the_peer() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let _auth = read_frame(&mut ws).await;
        let command = read_frame(&mut ws).await;
        assert_eq!(command, Frame::new("send command", vec!["say hi".into()]));
        let power = read_frame(&mut ws).await;
        assert_eq!(power, Frame::new("set state", vec!["start".into()]));
        ws
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }
    match session.send_command("say hi").await {
        Ok(()) => {}
        Err(e) => panic!("send_command failed: {e}"),
    }
    match session
        .send_power_action(ptero_client::PowerAction::Start)
        .await
    {
        Ok(()) => {}
        Err(e) => panic!("send_power_action failed: {e}"),
    }

    let Ok(_ws) = server.await else {
        panic!("server task failed");
    };
}

#[tokio::test]
async fn event_filter_selects_by_normalized_name() {
    let (listener, endpoint) = bind().await;
    let source = StubSource::new(endpoint);
    let mut session = SocketSession::new(
        Arc::clone(&source) as Arc<dyn SocketCredentialsSource>,
        ORIGIN.to_string(),
        64,
    );
    let mut events = session.events();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let _auth = read_frame(&mut ws).await;
        send_frame(&mut ws, &Frame::new("console output", vec!["[INFO] up".into()])).await;
        send_frame(&mut ws, &Frame::new("status", vec!["running".into()])).await;
        ws
    });

    match session.connect().await {
        Ok(()) => {}
        Err(e) => panic!("connect failed: {e}"),
    }

    let mut filter = EventFilter::new();
    filter.subscribe(&["status"]);

    let matched = loop {
        let event = recv_event(&mut events).await;
        if filter.matches(&event) {
            break event;
        }
    };
    assert_eq!(
        matched,
        SocketEvent::Named {
            name: "status".to_string(),
            payload: Some("running".into()),
        }
    );

    let Ok(_ws) = server.await else {
        panic!("server task failed");
    };
}
