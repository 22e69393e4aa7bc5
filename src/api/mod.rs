//! REST wrappers over the panel's `/api/client` endpoints.
//!
//! Each wrapper performs one HTTP call and relies on the shared helper in
//! `http` for the uniform status mapping. No retries, no caching.

pub mod account;
pub mod files;
pub mod server;
pub mod settings;

pub use account::AccountClient;
pub use files::FileClient;
pub use server::{ServerClient, SocketCredentialsSource};
pub use settings::SettingsClient;
