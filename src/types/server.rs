//! Server metadata DTOs, from `GET /api/client/servers/{id}`.

use serde::Deserialize;

/// Server detail attributes.
///
/// Unknown fields from newer panel versions are ignored on deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Whether the requesting account owns this server.
    pub server_owner: bool,
    /// Short identifier used in API paths.
    pub identifier: String,
    /// Internal numeric ID.
    pub internal_id: i64,
    /// Full UUID of the server.
    pub uuid: String,
    /// Display name.
    pub name: String,
    /// Node the server runs on.
    pub node: String,
    /// SFTP endpoint for file access.
    pub sftp_details: SftpDetails,
    /// Resource limits.
    pub limits: Limits,
    /// Startup invocation, hidden for unprivileged users.
    #[serde(default)]
    pub invocation: Option<String>,
    /// Docker image the server runs in.
    pub docker_image: String,
    /// Egg feature flags.
    #[serde(default)]
    pub egg_features: Vec<String>,
    /// Feature count limits.
    pub feature_limits: FeatureLimits,
    /// Installation status string, if any.
    #[serde(default)]
    pub status: Option<String>,
    /// Whether the server is suspended.
    pub is_suspended: bool,
    /// Whether an install is in progress.
    pub is_installing: bool,
    /// Whether a transfer between nodes is in progress.
    #[serde(default)]
    pub is_transferring: Option<bool>,
}

/// SFTP connection details.
#[derive(Debug, Clone, Deserialize)]
pub struct SftpDetails {
    /// SFTP host.
    pub ip: String,
    /// SFTP port.
    pub port: u16,
}

/// Resource limits applied to the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    /// Memory limit in MiB.
    pub memory: i64,
    /// Swap limit in MiB (`-1` = unlimited).
    pub swap: i64,
    /// Disk limit in MiB.
    pub disk: i64,
    /// Block IO weight.
    pub io: i64,
    /// CPU limit in percent (100 = one core).
    pub cpu: i64,
    /// Pinned CPU threads, if restricted.
    #[serde(default)]
    pub threads: Option<String>,
    /// Whether the OOM killer is disabled.
    #[serde(default)]
    pub oom_disabled: bool,
}

/// Feature count limits (databases, allocations, backups).
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureLimits {
    /// Maximum databases.
    pub databases: i64,
    /// Maximum network allocations.
    pub allocations: i64,
    /// Maximum backups.
    pub backups: i64,
}

/// Per-account permission data for a server, from the `meta` section of
/// the server detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct Permissions {
    /// Whether the requesting account owns the server.
    pub is_server_owner: bool,
    /// Granted permission strings (e.g. `control.console`).
    pub user_permissions: Vec<String>,
}
