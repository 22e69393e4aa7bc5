//! WebSocket session credentials, from `GET /api/client/servers/{id}/websocket`.

use serde::Deserialize;

/// One-time credential pair for a console WebSocket connection.
///
/// The token is short-lived; the panel announces expiry over the socket
/// with a `token expiring` frame, after which a fresh pair must be fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketCredentials {
    /// JWT presented in the `auth` frame.
    pub token: String,
    /// WebSocket endpoint URL (`wss://...`).
    #[serde(rename = "socket")]
    pub endpoint: String,
}
