//! Console WebSocket session state machine.
//!
//! [`SocketSession`] owns at most one live connection to the panel's
//! streaming endpoint. `connect` fetches fresh credentials, performs the
//! handshake with the panel's required `Origin` header, authenticates,
//! and spawns a read loop that translates inbound frames into
//! [`SocketEvent`]s on the session's [`EventBus`].
//!
//! The session is not designed for concurrent `connect`/`close` calls;
//! callers serialize those per session. It never reconnects on its own —
//! after an unexpected close, call `connect` again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, ORIGIN};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::event::{EventBus, SocketEvent};
use super::frame::Frame;
use crate::api::SocketCredentialsSource;
use crate::error::ClientError;
use crate::types::PowerAction;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Console WebSocket session for one server.
///
/// Lifecycle: created idle, populated by [`connect`](Self::connect),
/// cleared again on transport close or [`close`](Self::close), and
/// reusable for a subsequent `connect`.
pub struct SocketSession {
    source: Arc<dyn SocketCredentialsSource>,
    origin: String,
    token: Arc<RwLock<String>>,
    bus: EventBus,
    active: Option<Arc<ActiveConnection>>,
    reader: Option<JoinHandle<()>>,
    endpoint: Option<String>,
}

/// Write half plus the open flag shared with the read loop.
///
/// The flag flips exactly once per connection, by whichever side closes
/// first; the side that flips it emits the single `Closed` event.
#[derive(Debug)]
struct ActiveConnection {
    writer: Mutex<SplitSink<WsStream, Message>>,
    open: AtomicBool,
}

impl ActiveConnection {
    async fn send_frame(&self, frame: &Frame) -> Result<(), ClientError> {
        let text = serde_json::to_string(frame)?;
        self.writer.lock().await.send(Message::text(text)).await?;
        Ok(())
    }
}

impl SocketSession {
    /// Creates an idle session.
    ///
    /// `origin` is sent as the `Origin` header on the handshake;
    /// `capacity` sizes the event broadcast channel.
    #[must_use]
    pub fn new(
        source: Arc<dyn SocketCredentialsSource>,
        origin: String,
        capacity: usize,
    ) -> Self {
        Self {
            source,
            origin,
            token: Arc::new(RwLock::new(String::new())),
            bus: EventBus::new(capacity),
            active: None,
            reader: None,
            endpoint: None,
        }
    }

    /// The event bus this session publishes to.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribes to this session's events.
    #[must_use]
    pub fn events(&self) -> tokio::sync::broadcast::Receiver<SocketEvent> {
        self.bus.subscribe()
    }

    /// Returns `true` while a live connection exists.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|c| c.open.load(Ordering::SeqCst))
    }

    /// The endpoint of the most recent connection attempt, if any.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Connects to the panel's streaming endpoint.
    ///
    /// Fetches fresh credentials, closes any previous connection first,
    /// performs the handshake, and sends the `auth` frame. Resolves only
    /// after the auth frame has been written.
    ///
    /// # Errors
    ///
    /// [`ClientError::TokenUnavailable`] when the credentials fetch
    /// fails; [`ClientError::Transport`] on handshake or write failure.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        let creds = self
            .source
            .socket_credentials()
            .await
            .map_err(ClientError::token_unavailable)?;

        // Invariant: at most one live connection per session.
        self.close().await;

        *self.token.write().await = creds.token;

        let mut request = creds.endpoint.as_str().into_client_request()?;
        let origin_value = HeaderValue::from_str(&self.origin)
            .map_err(|e| tungstenite::Error::HttpFormat(e.into()))?;
        request.headers_mut().insert(ORIGIN, origin_value);

        tracing::debug!(endpoint = %creds.endpoint, "connecting console websocket");
        let (stream, _response) = connect_async(request).await?;
        let (sink, stream) = stream.split();

        let conn = Arc::new(ActiveConnection {
            writer: Mutex::new(sink),
            open: AtomicBool::new(true),
        });

        let auth = Frame::auth(self.token.read().await.as_str());
        conn.send_frame(&auth).await?;

        let handle = tokio::spawn(read_loop(
            stream,
            Arc::clone(&conn),
            Arc::clone(&self.source),
            Arc::clone(&self.token),
            self.bus.clone(),
        ));

        self.endpoint = Some(creds.endpoint);
        self.active = Some(conn);
        self.reader = Some(handle);
        Ok(())
    }

    /// Re-fetches credentials and replaces the stored token without
    /// reopening the connection.
    ///
    /// The read loop refreshes on its own when the panel announces
    /// expiry; a caller invoking this concurrently with that path is
    /// not guarded against.
    ///
    /// # Errors
    ///
    /// [`ClientError::TokenUnavailable`] when the credentials fetch fails.
    pub async fn regen_token(&self) -> Result<(), ClientError> {
        refresh_token(self.source.as_ref(), &self.token).await
    }

    /// Serializes and writes a frame to the active connection.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotConnected`] when no live connection exists;
    /// [`ClientError::Transport`] on write failure.
    pub async fn send(&self, frame: &Frame) -> Result<(), ClientError> {
        let conn = self
            .active
            .as_ref()
            .filter(|c| c.open.load(Ordering::SeqCst))
            .ok_or(ClientError::NotConnected)?;
        conn.send_frame(frame).await
    }

    /// Sends the `auth` frame carrying the current token.
    ///
    /// Called automatically on connect and token refresh; exposed for
    /// callers that need to re-authenticate manually.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_auth(&self) -> Result<(), ClientError> {
        let frame = Frame::auth(self.token.read().await.as_str());
        self.send(&frame).await
    }

    /// Sends a console command over the socket.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_command(&self, command: &str) -> Result<(), ClientError> {
        self.send(&Frame::command(command)).await
    }

    /// Requests a power action over the socket.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_power_action(&self, action: PowerAction) -> Result<(), ClientError> {
        self.send(&Frame::power(action)).await
    }

    /// Closes the active connection, if any, and emits one `Closed`
    /// event with reason `"closed by caller"`.
    ///
    /// Idempotent: a second call finds no live handle and emits nothing.
    pub async fn close(&mut self) {
        let conn = self.active.take();
        let reader = self.reader.take();
        if let Some(conn) = conn {
            if conn.open.swap(false, Ordering::SeqCst) {
                if let Err(err) = conn.writer.lock().await.close().await {
                    tracing::debug!(error = %err, "error closing websocket sink");
                }
                self.bus.publish(SocketEvent::Closed {
                    reason: "closed by caller".to_string(),
                });
            }
        }
        if let Some(reader) = reader {
            reader.abort();
        }
    }
}

impl std::fmt::Debug for SocketSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketSession")
            .field("origin", &self.origin)
            .field("endpoint", &self.endpoint)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

/// Fetches fresh credentials and replaces the stored token.
async fn refresh_token(
    source: &dyn SocketCredentialsSource,
    token: &RwLock<String>,
) -> Result<(), ClientError> {
    let creds = source
        .socket_credentials()
        .await
        .map_err(ClientError::token_unavailable)?;
    *token.write().await = creds.token;
    Ok(())
}

/// What the read loop should do with an inbound frame.
#[derive(Debug, PartialEq)]
enum Dispatch {
    /// Publish this event.
    Emit(SocketEvent),
    /// Refresh the token, re-send auth, then emit `TokenExpiring`.
    RefreshAuth,
    /// Drop the frame.
    Ignore,
}

/// Translates one inbound frame per the dispatch rules.
///
/// - `stats` with a JSON-object-shaped first argument parses and emits;
///   anything else is dropped.
/// - `token expiring` triggers the refresh path.
/// - Everything else emits under its underscore-normalized name with the
///   first argument as payload, if present.
fn dispatch(frame: &Frame) -> Dispatch {
    match frame.event.as_str() {
        "stats" => match frame.args.first().and_then(|v| v.as_str()) {
            Some(raw) if raw.starts_with('{') => match serde_json::from_str(raw) {
                Ok(value @ serde_json::Value::Object(_)) => Dispatch::Emit(SocketEvent::Stats(value)),
                _ => Dispatch::Ignore,
            },
            _ => Dispatch::Ignore,
        },
        "token expiring" => Dispatch::RefreshAuth,
        other => Dispatch::Emit(SocketEvent::Named {
            name: normalize(other),
            payload: frame.args.first().cloned(),
        }),
    }
}

/// Event names use spaces on the wire; notifications use underscores.
fn normalize(event: &str) -> String {
    event.replace(' ', "_")
}

/// Read loop for one connection.
///
/// Runs until the peer closes, the transport errors, or the task is
/// aborted by an explicit `close`. Whoever flips the shared open flag
/// emits the single `Closed` event for this connection.
async fn read_loop(
    mut stream: SplitStream<WsStream>,
    conn: Arc<ActiveConnection>,
    source: Arc<dyn SocketCredentialsSource>,
    token: Arc<RwLock<String>>,
    bus: EventBus,
) {
    let reason = loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => {
                let Ok(frame) = serde_json::from_str::<Frame>(text.as_str()) else {
                    tracing::warn!("discarding malformed frame");
                    continue;
                };
                match dispatch(&frame) {
                    Dispatch::Emit(event) => {
                        bus.publish(event);
                    }
                    Dispatch::RefreshAuth => {
                        refresh_and_reauth(&conn, source.as_ref(), &token, &bus).await;
                    }
                    Dispatch::Ignore => {}
                }
            }
            Some(Ok(Message::Close(close))) => {
                break close.map(|f| f.reason.to_string()).unwrap_or_default();
            }
            Some(Ok(_)) => {}
            Some(Err(err)) => {
                bus.publish(SocketEvent::TransportError(err.to_string()));
                break "transport error".to_string();
            }
            None => break "connection lost".to_string(),
        }
    };

    if conn.open.swap(false, Ordering::SeqCst) {
        tracing::debug!(reason = %reason, "console websocket closed");
        bus.publish(SocketEvent::Closed { reason });
    }
}

/// Handles a `token expiring` frame: refresh, re-auth on the same
/// connection, then announce. Runs inline on the read loop, so
/// frame-triggered refreshes never overlap each other.
async fn refresh_and_reauth(
    conn: &ActiveConnection,
    source: &dyn SocketCredentialsSource,
    token: &RwLock<String>,
    bus: &EventBus,
) {
    if let Err(err) = refresh_token(source, token).await {
        tracing::warn!(error = %err, "token refresh failed");
        bus.publish(SocketEvent::TransportError(err.to_string()));
        return;
    }
    let auth = Frame::auth(token.read().await.as_str());
    match conn.send_frame(&auth).await {
        Ok(()) => {
            bus.publish(SocketEvent::TokenExpiring);
        }
        Err(err) => {
            bus.publish(SocketEvent::TransportError(err.to_string()));
        }
    }
}
