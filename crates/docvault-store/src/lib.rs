//! # docvault-store
//!
//! Local persistence for the DocVault application.
//!
//! The whole vault is stored as one JSON snapshot under a fixed key. The
//! [`SnapshotStore`] trait is the port the vault writes through; the default
//! implementation keeps snapshots in a SQLite table owned by a [`Database`]
//! handle, and [`MemorySnapshotStore`] keeps a single snapshot in memory.

pub mod database;
pub mod migrations;
pub mod models;
pub mod snapshot_store;
pub mod snapshots;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
pub use snapshot_store::{MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore};
