//! The persistence port the vault writes through.
//!
//! A store holds exactly one serialized [`AppState`]. Reads that find data
//! which no longer deserializes are reported as "no snapshot" rather than
//! an error, so a corrupt or outdated blob never blocks start-up.

use std::sync::{Arc, Mutex};

use docvault_shared::constants::STORAGE_KEY;
use docvault_shared::AppState;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Whole-state snapshot persistence under one fixed key.
pub trait SnapshotStore: Send {
    /// The last saved state, or `None` when nothing usable is stored.
    fn load(&self) -> Result<Option<AppState>>;

    /// Serialize `state` and overwrite the stored snapshot.
    fn save(&self, state: &AppState) -> Result<()>;
}

/// Parse a stored blob, treating malformed data as absent.
fn decode(json: &str) -> Option<AppState> {
    match serde_json::from_str(json) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed snapshot");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// SQLite
// ---------------------------------------------------------------------------

/// Snapshot store backed by a row in the `snapshots` table.
pub struct SqliteSnapshotStore {
    db: Database,
    key: String,
}

impl SqliteSnapshotStore {
    pub fn new(db: Database) -> Self {
        Self::with_key(db, STORAGE_KEY)
    }

    pub fn with_key(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> Result<Option<AppState>> {
        let Some(row) = self.db.get_snapshot(&self.key)? else {
            tracing::debug!(key = %self.key, "no stored snapshot");
            return Ok(None);
        };
        Ok(decode(&row.json))
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.db.put_snapshot(&self.key, &json)?;
        tracing::debug!(
            key = %self.key,
            bytes = json.len(),
            documents = state.documents.len(),
            "snapshot saved"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Snapshot store keeping the serialized JSON in memory.
///
/// Clones share the same slot, so a test can hand one clone to the vault
/// and inspect (or tamper with) the stored text through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON currently stored.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Replace the raw stored text.
    pub fn set_raw(&self, json: impl Into<String>) -> Result<()> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::LockPoisoned)?;
        *slot = Some(json.into());
        Ok(())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<AppState>> {
        let slot = self.slot.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(slot.as_deref().and_then(decode))
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.set_raw(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_shared::{Category, Document, User};

    fn populated_state() -> AppState {
        let mut state = AppState::default();
        state
            .categories
            .push(Category::new("cat-x", "Receipts", "📁", "bg-indigo-500"));
        state.documents.push(Document {
            id: "doc-2".into(),
            title: "Lease".into(),
            category_id: "cat-6".into(),
            upload_date: "Oct 18, 2026".into(),
            file_type: "application/pdf".into(),
            file_size: "88.0 KB".into(),
            summary: "Apartment lease. Signed by both parties.".into(),
            drive_file_id: "drive-file-0a1b2c3d4".into(),
            thumbnail: Some("data:image/png;base64,AAAA".into()),
        });
        state.documents.push(Document {
            id: "doc-1".into(),
            title: "Payslip".into(),
            category_id: "cat-gone".into(),
            upload_date: "Oct 17, 2026".into(),
            file_type: "image/jpeg".into(),
            file_size: "0.5 KB".into(),
            summary: "October payslip.".into(),
            drive_file_id: "drive-file-zzzzzzzzz".into(),
            thumbnail: None,
        });
        state.user = Some(User::demo());
        state
    }

    #[test]
    fn sqlite_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");
        let state = populated_state();

        let store = SqliteSnapshotStore::new(Database::open_at(&path).unwrap());
        assert_eq!(store.key(), STORAGE_KEY);
        assert!(store.load().unwrap().is_none());
        store.save(&state).unwrap();
        drop(store);

        let reopened = SqliteSnapshotStore::new(Database::open_at(&path).unwrap());
        assert_eq!(reopened.load().unwrap(), Some(state));
    }

    #[test]
    fn sqlite_malformed_is_no_snapshot() {
        let store = SqliteSnapshotStore::with_key(Database::open_in_memory().unwrap(), "k");
        store.database().put_snapshot("k", "{not json").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn sqlite_shape_mismatch_is_no_snapshot() {
        let store = SqliteSnapshotStore::new(Database::open_in_memory().unwrap());
        store
            .database()
            .put_snapshot(STORAGE_KEY, r#"{"categories": 3}"#)
            .unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_round_trip() {
        let store = MemorySnapshotStore::new();
        let state = populated_state();
        assert!(store.load().unwrap().is_none());

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
    }

    #[test]
    fn memory_clones_share_slot() {
        let store = MemorySnapshotStore::new();
        let observer = store.clone();
        store.save(&AppState::default()).unwrap();

        let raw = observer.raw().unwrap();
        assert!(raw.contains("\"categories\""));
    }

    #[test]
    fn memory_malformed_is_no_snapshot() {
        let store = MemorySnapshotStore::new();
        store.set_raw("[]").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_overwrites_previous() {
        let store = MemorySnapshotStore::new();
        store.save(&populated_state()).unwrap();
        store.save(&AppState::default()).unwrap();
        assert_eq!(store.load().unwrap(), Some(AppState::default()));
    }
}
