//! Activity log DTOs, from `GET /api/client/servers/{id}/activity`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ApiObject;

/// One page of the server activity log.
#[derive(Debug, Clone)]
pub struct ActivityPage {
    /// Activity entries, newest first.
    pub entries: Vec<ActivityEntry>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

/// A single activity log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntry {
    /// Entry identifier.
    pub id: String,
    /// Batch UUID grouping related entries, if any.
    #[serde(default)]
    pub batch: Option<String>,
    /// Event name (e.g. `server:power.start`).
    pub event: String,
    /// Whether the action was performed through the API.
    pub is_api: bool,
    /// Source IP, hidden for unprivileged viewers.
    #[serde(default)]
    pub ip: Option<String>,
    /// Human-readable description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Event-specific properties.
    #[serde(default)]
    pub properties: serde_json::Value,
    /// Whether additional metadata exists beyond `properties`.
    pub has_additional_meta: bool,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    /// Total entries across all pages.
    pub total: u64,
    /// Entries on this page.
    pub count: u64,
    /// Page size.
    pub per_page: u64,
    /// Current page number (1-based).
    pub current_page: u64,
    /// Total page count.
    pub total_pages: u64,
}

/// Wire shape of the activity endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ActivityWire {
    pub data: Vec<ApiObject<ActivityEntry>>,
    pub meta: ActivityMetaWire,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityMetaWire {
    pub pagination: Pagination,
}

impl From<ActivityWire> for ActivityPage {
    fn from(wire: ActivityWire) -> Self {
        Self {
            entries: wire.data.into_iter().map(|o| o.attributes).collect(),
            pagination: wire.meta.pagination,
        }
    }
}
