//! # docvault-client
//!
//! The DocVault core: the [`Vault`] state container, the ingestion pipeline
//! that turns an uploaded file into a categorized document, the adapters that
//! stand in for the content-analysis and Drive services, and view-model
//! projections for whatever renders the vault.

pub mod config;
pub mod error;
pub mod events;
pub mod ingest;
pub mod remote;
pub mod vault;
pub mod view;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::VaultConfig;
pub use error::{IngestError, IngestFailure, RemoteError};
pub use events::VaultEvent;
pub use ingest::{IngestStage, RawFile};
pub use remote::{AnalysisResult, RemoteAdapter};
pub use vault::Vault;

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`; falls back to debug output for this crate. Calling it
/// twice is harmless, the second call is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("docvault_client=debug,docvault_store=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
