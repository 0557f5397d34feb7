use serde::Serialize;
use tokio::sync::broadcast;

use crate::ingest::IngestStage;

pub const EVENT_LOGIN_STARTED: &str = "login-started";
pub const EVENT_LOGIN_COMPLETED: &str = "login-completed";
pub const EVENT_INGESTION_STAGE: &str = "ingestion-stage";
pub const EVENT_DOCUMENT_ADDED: &str = "document-added";
pub const EVENT_DOCUMENT_DELETED: &str = "document-deleted";
pub const EVENT_CATEGORY_ADDED: &str = "category-added";

/// Buffered events per subscriber before the slowest one starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications emitted by the vault after it changes or makes progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VaultEvent {
    LoginStarted,
    #[serde(rename_all = "camelCase")]
    LoginCompleted { user_id: String },
    #[serde(rename_all = "camelCase")]
    IngestionStage { file_name: String, stage: IngestStage },
    DocumentAdded { id: String },
    DocumentDeleted { id: String },
    CategoryAdded { id: String },
}

impl VaultEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginStarted => EVENT_LOGIN_STARTED,
            Self::LoginCompleted { .. } => EVENT_LOGIN_COMPLETED,
            Self::IngestionStage { .. } => EVENT_INGESTION_STAGE,
            Self::DocumentAdded { .. } => EVENT_DOCUMENT_ADDED,
            Self::DocumentDeleted { .. } => EVENT_DOCUMENT_DELETED,
            Self::CategoryAdded { .. } => EVENT_CATEGORY_ADDED,
        }
    }
}

pub(crate) fn emit_event(tx: &broadcast::Sender<VaultEvent>, event: VaultEvent) {
    let name = event.name();
    // no receivers is fine
    if tx.send(event).is_err() {
        tracing::trace!(event = name, "no event subscribers");
    }
}
