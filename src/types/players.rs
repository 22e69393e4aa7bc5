//! Game-specific player/status DTOs, from `GET /api/client/servers/{id}/players`.
//!
//! The players endpoint returns a different payload per game. The two shapes
//! the panel serves are distinguished by the type of their player counters:
//! Minecraft reports numbers, SCP: Secret Laboratory reports strings.

use serde::Deserialize;

/// Game status payload; variant depends on the game the server runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GameStatus {
    /// Minecraft query data.
    Minecraft(MinecraftStatus),
    /// SCP: Secret Laboratory query data.
    Scpsl(ScpslStatus),
}

/// Minecraft server status and player list.
#[derive(Debug, Clone, Deserialize)]
pub struct MinecraftStatus {
    /// Query info block.
    pub info: MinecraftInfo,
    /// Online players.
    #[serde(default)]
    pub players: Vec<MinecraftPlayer>,
    /// Current player count.
    pub online_players: u32,
    /// Player slot limit.
    pub max_players: u32,
}

/// Minecraft query info block.
#[derive(Debug, Clone, Deserialize)]
pub struct MinecraftInfo {
    /// Current player count as reported by the query protocol.
    pub players: u32,
    /// Player slot limit.
    pub maxplayers: u32,
    /// Server version string.
    pub version: String,
}

/// A connected Minecraft player.
#[derive(Debug, Clone, Deserialize)]
pub struct MinecraftPlayer {
    /// Player UUID.
    pub id: String,
    /// Player name.
    pub name: String,
}

/// SCP: Secret Laboratory server status and player list.
#[derive(Debug, Clone, Deserialize)]
pub struct ScpslStatus {
    /// Query info block.
    pub info: ScpslInfo,
    /// Online players.
    #[serde(default)]
    pub players: Vec<ScpslPlayer>,
    /// Current player count (string-typed on the wire).
    pub online_players: String,
    /// Player slot limit (string-typed on the wire).
    pub max_players: String,
}

/// SCP:SL query info block.
#[derive(Debug, Clone, Deserialize)]
pub struct ScpslInfo {
    /// Server hostname.
    pub hostname: String,
    /// Current player count as a string.
    pub players: String,
    /// Player slot limit as a string.
    pub maxplayers: String,
    /// Server version string.
    pub version: String,
    /// Whether the server is password-protected.
    pub password: bool,
    /// Whether the server runs plugins.
    pub modded: bool,
}

/// A connected SCP:SL player.
#[derive(Debug, Clone, Deserialize)]
pub struct ScpslPlayer {
    /// Numeric player ID.
    pub id: i64,
    /// Player name.
    pub name: String,
    /// Steam ID of the player.
    pub steamid: String,
}
