//! Server endpoints: metadata, resources, players, activity, command and
//! power dispatch, and WebSocket credential issuance.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::PanelConfig;
use crate::error::ClientError;
use crate::http::PanelHttp;
use crate::types::activity::ActivityWire;
use crate::types::{
    ActivityPage, ApiData, ApiObject, GameStatus, Permissions, PowerAction, Resources, Server,
    SocketCredentials,
};
use crate::ws::SocketSession;

/// Supplies a fresh [`SocketCredentials`] pair on demand.
///
/// The socket session calls this once on `connect` and again whenever the
/// panel announces token expiry.
#[async_trait]
pub trait SocketCredentialsSource: Send + Sync {
    /// Fetches a fresh token and endpoint from the panel.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    async fn socket_credentials(&self) -> Result<SocketCredentials, ClientError>;
}

/// Wrapper for the server-scoped endpoints.
#[derive(Debug, Clone)]
pub struct ServerClient {
    http: Arc<PanelHttp>,
    server_id: String,
    config: PanelConfig,
}

/// Wire shape of the server detail endpoint: attributes plus the
/// per-account permission metadata.
#[derive(Debug, Deserialize)]
struct ServerWire {
    attributes: Server,
    meta: Permissions,
}

/// Wire shape of the players endpoint.
#[derive(Debug, Deserialize)]
struct PlayersWire {
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
}

impl ServerClient {
    pub(crate) fn new(http: Arc<PanelHttp>, server_id: String, config: PanelConfig) -> Self {
        Self {
            http,
            server_id,
            config,
        }
    }

    /// The server identifier this wrapper is bound to.
    #[must_use]
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    fn path(&self, suffix: &str) -> String {
        format!("/api/client/servers/{}{suffix}", self.server_id)
    }

    /// Fetches the server metadata.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn details(&self) -> Result<Server, ClientError> {
        let wire: ServerWire = self.http.get_json(&self.path("")).await?;
        Ok(wire.attributes)
    }

    /// Fetches the requesting account's permissions on this server.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn permissions(&self) -> Result<Permissions, ClientError> {
        let wire: ServerWire = self.http.get_json(&self.path("")).await?;
        Ok(wire.meta)
    }

    /// Fetches the current power state and resource usage.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn resources(&self) -> Result<Resources, ClientError> {
        let wire: ApiObject<Resources> = self.http.get_json(&self.path("/resources")).await?;
        Ok(wire.attributes)
    }

    /// Fetches game-specific status and player data.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`]. A 2xx
    /// response with `success: false` maps to [`ClientError::Remote`]
    /// carrying the query error.
    pub async fn players(&self) -> Result<GameStatus, ClientError> {
        let wire: PlayersWire = self.http.get_json(&self.path("/players")).await?;
        if !wire.success {
            let detail = wire
                .data
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("an unknown error occurred")
                .to_string();
            return Err(ClientError::Remote { detail });
        }
        Ok(serde_json::from_value(wire.data)?)
    }

    /// Fetches one-time WebSocket credentials for the console feed.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn websocket_details(&self) -> Result<SocketCredentials, ClientError> {
        let wire: ApiData<SocketCredentials> =
            self.http.get_json(&self.path("/websocket")).await?;
        Ok(wire.data)
    }

    /// Fetches a page of the server activity log.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn activity(&self) -> Result<ActivityPage, ClientError> {
        let wire: ActivityWire = self.http.get_json(&self.path("/activity")).await?;
        Ok(wire.into())
    }

    /// Sends a console command to the server over REST.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn send_command(&self, command: &str) -> Result<(), ClientError> {
        self.http
            .post_unit(&self.path("/command"), &json!({ "command": command }))
            .await
    }

    /// Sends a power signal to the server over REST.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn set_power_state(&self, action: PowerAction) -> Result<(), ClientError> {
        self.http
            .post_unit(&self.path("/power"), &json!({ "signal": action.as_str() }))
            .await
    }

    /// File management wrapper for this server.
    #[must_use]
    pub fn files(&self) -> super::FileClient {
        super::FileClient::new(Arc::clone(&self.http), self.server_id.clone())
    }

    /// Settings wrapper for this server.
    #[must_use]
    pub fn settings(&self) -> super::SettingsClient {
        super::SettingsClient::new(Arc::clone(&self.http), self.server_id.clone())
    }

    /// Creates a console WebSocket session using this wrapper as the
    /// credentials source.
    #[must_use]
    pub fn socket(&self) -> SocketSession {
        SocketSession::new(
            Arc::new(self.clone()),
            self.config.origin.clone(),
            self.config.event_capacity,
        )
    }
}

#[async_trait]
impl SocketCredentialsSource for ServerClient {
    async fn socket_credentials(&self) -> Result<SocketCredentials, ClientError> {
        self.websocket_details().await
    }
}
