//! Live resource usage DTOs, from `GET /api/client/servers/{id}/resources`.

use serde::Deserialize;

/// Current power state and resource usage of a server.
#[derive(Debug, Clone, Deserialize)]
pub struct Resources {
    /// Power state string (`running`, `starting`, `stopping`, `offline`).
    pub current_state: String,
    /// Whether the server is suspended.
    pub is_suspended: bool,
    /// Usage counters.
    pub resources: ResourceUsage,
}

/// Raw usage counters reported by the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceUsage {
    /// Resident memory in bytes.
    pub memory_bytes: u64,
    /// Absolute CPU usage in percent (100 = one core).
    pub cpu_absolute: f64,
    /// Disk usage in bytes.
    pub disk_bytes: u64,
    /// Network bytes received.
    pub network_rx_bytes: u64,
    /// Network bytes transmitted.
    pub network_tx_bytes: u64,
    /// Uptime in milliseconds.
    pub uptime: u64,
}
