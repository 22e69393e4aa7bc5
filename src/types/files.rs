//! File listing DTOs, from `GET /api/client/servers/{id}/files/list`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single entry in a directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    /// File or directory name.
    pub name: String,
    /// Unix mode string (e.g. `-rw-r--r--`).
    pub mode: String,
    /// Size in bytes.
    pub size: u64,
    /// Whether the entry is a regular file.
    pub is_file: bool,
    /// Whether the entry is a symlink.
    pub is_symlink: bool,
    /// Whether the panel editor can open the entry.
    pub is_editable: bool,
    /// MIME type guess.
    pub mimetype: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
}
