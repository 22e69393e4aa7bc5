//! Typed shapes for the panel's REST responses.
//!
//! The panel wraps most payloads in envelope objects (`attributes`, `data`);
//! the generic envelopes live here and stay crate-private, while the
//! domain DTOs are re-exported for callers.

pub mod account;
pub mod activity;
pub mod files;
pub mod players;
pub mod power;
pub mod resources;
pub mod server;
pub mod socket;

pub use account::{Account, RecoveryTokens, TwoFactorSetup};
pub use activity::{ActivityEntry, ActivityPage, Pagination};
pub use files::FileEntry;
pub use players::{GameStatus, MinecraftStatus, ScpslStatus};
pub use power::PowerAction;
pub use resources::{ResourceUsage, Resources};
pub use server::{FeatureLimits, Limits, Permissions, Server, SftpDetails};
pub use socket::SocketCredentials;

use serde::Deserialize;

/// Envelope for responses shaped `{"object": ..., "attributes": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiObject<T> {
    /// Inner payload.
    pub attributes: T,
}

/// Envelope for responses shaped `{"data": {...}}` or `{"data": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiData<T> {
    /// Inner payload.
    pub data: T,
}
