//! Wire frame envelope for the console WebSocket.

use serde::{Deserialize, Serialize};

use crate::types::PowerAction;

/// One JSON message unit exchanged over the WebSocket.
///
/// Every frame in both directions is `{"event": ..., "args": [...]}`;
/// inbound frames may omit `args` entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Event name, with spaces on the wire (e.g. `send command`).
    pub event: String,
    /// Opaque event arguments.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl Frame {
    /// Builds a frame with the given event name and arguments.
    #[must_use]
    pub fn new(event: impl Into<String>, args: Vec<serde_json::Value>) -> Self {
        Self {
            event: event.into(),
            args,
        }
    }

    /// The `auth` frame carrying the session token.
    #[must_use]
    pub fn auth(token: &str) -> Self {
        Self::new("auth", vec![token.into()])
    }

    /// The `send command` frame dispatching a console command.
    #[must_use]
    pub fn command(command: &str) -> Self {
        Self::new("send command", vec![command.into()])
    }

    /// The `set state` frame requesting a power action.
    #[must_use]
    pub fn power(action: PowerAction) -> Self {
        Self::new("set state", vec![action.as_str().into()])
    }
}
