//! Power actions shared by the REST power endpoint and the WebSocket session.

use serde::{Deserialize, Serialize};

/// Power signal accepted by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    /// Boot the server.
    Start,
    /// Graceful shutdown.
    Stop,
    /// Stop then start.
    Restart,
    /// Terminate the container immediately.
    Kill,
}

impl PowerAction {
    /// Wire representation used in both the REST `signal` field and the
    /// WebSocket `set state` frame.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Kill => "kill",
        }
    }
}

impl std::fmt::Display for PowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
