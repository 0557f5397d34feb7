//! Records persisted in the local SQLite database.

use chrono::{DateTime, Utc};

/// A raw snapshot row: the serialized state stored under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSnapshot {
    pub key: String,
    /// JSON text exactly as written.
    pub json: String,
    /// When the row was last overwritten.
    pub saved_at: DateTime<Utc>,
}
