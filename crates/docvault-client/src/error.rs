use thiserror::Error;

use crate::ingest::IngestStage;

/// Failures of the external services behind [`crate::remote`].
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("No API key configured for content analysis")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Why an ingestion was aborted. Only reachable through [`IngestError::cause`].
#[derive(Error, Debug)]
pub enum IngestFailure {
    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error(transparent)]
    Upload(#[from] RemoteError),

    #[error("Vault has no category to file the document under")]
    NoCategories,
}

/// The single failure signal of [`crate::Vault::ingest_document`].
///
/// Callers only need to know that nothing was added; the stage and cause
/// are kept for logging.
#[derive(Error, Debug)]
#[error("ingestion failed")]
pub struct IngestError {
    stage: IngestStage,
    #[source]
    cause: IngestFailure,
}

impl IngestError {
    pub(crate) fn new(stage: IngestStage, cause: IngestFailure) -> Self {
        Self { stage, cause }
    }

    /// Stage the pipeline was in when it gave up.
    pub fn stage(&self) -> IngestStage {
        self.stage
    }

    pub fn cause(&self) -> &IngestFailure {
        &self.cause
    }
}
