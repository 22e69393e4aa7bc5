//! # ptero-client
//!
//! Async client SDK for a Pterodactyl-style game-server hosting panel.
//!
//! This crate wraps the panel's bearer-authenticated `/api/client` REST
//! endpoints in typed methods and normalizes the companion console/stat
//! WebSocket into a typed event stream. All protocol decisions belong to
//! the panel — this crate is a binding layer.
//!
//! ## Architecture
//!
//! ```text
//! PanelClient (config + shared credentials)
//!     │
//!     ├── AccountClient ──┐
//!     ├── ServerClient ───┼── PanelHttp (http/): one shared status mapping
//!     │     ├── FileClient ┤
//!     │     └── SettingsClient
//!     │
//!     └── SocketSession (ws/)
//!           ├── connect / auth / token refresh
//!           └── EventBus → SocketEvent receivers
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ptero_client::{PanelClient, PanelConfig, PowerAction};
//!
//! # async fn run() -> Result<(), ptero_client::ClientError> {
//! let client = PanelClient::new(
//!     PanelConfig::new("https://ptero.mathost.eu").with_api_key("ptlc_..."),
//! );
//! let server = client.server("1a2b3c4d");
//!
//! let resources = server.resources().await?;
//! println!("state: {}", resources.current_state);
//!
//! let mut socket = server.socket();
//! let mut events = socket.events();
//! socket.connect().await?;
//! socket.send_power_action(PowerAction::Start).await?;
//! while let Ok(event) = events.recv().await {
//!     println!("{}", event.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub(crate) mod http;
pub mod types;
pub mod ws;

pub use api::{AccountClient, FileClient, ServerClient, SettingsClient, SocketCredentialsSource};
pub use client::PanelClient;
pub use config::PanelConfig;
pub use error::{ApiErrorDetail, ApiErrors, ClientError};
pub use types::{
    Account, ActivityEntry, ActivityPage, FileEntry, GameStatus, Permissions, PowerAction,
    RecoveryTokens, Resources, Server, SocketCredentials, TwoFactorSetup,
};
pub use ws::{EventBus, EventFilter, Frame, SocketEvent, SocketSession};
