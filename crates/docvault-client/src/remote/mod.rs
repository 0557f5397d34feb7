//! Stand-ins for the external services a vault depends on.
//!
//! [`RemoteAdapter`] composes two ports:
//!
//! - a [`ContentAnalyzer`] that proposes a title, category and summary for a
//!   file, and
//! - a [`DriveUploader`] that stores the file and returns an opaque id.
//!
//! Analysis never fails from the vault's point of view: any analyzer error
//! is replaced by a placeholder result. Upload errors are passed through.

mod drive;
mod gemini;
mod stub;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use docvault_shared::constants::{FALLBACK_CATEGORY, FALLBACK_SUMMARY};

use crate::config::VaultConfig;
use crate::error::RemoteError;
use crate::ingest::{EncodedContent, FileMetadata};

pub use drive::{new_drive_file_id, SimulatedDrive};
pub use gemini::{GeminiAnalyzer, ANALYSIS_PROMPT};
pub use stub::StaticAnalyzer;

/// What content analysis proposes for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    /// Free-form label, matched against category names by the vault.
    pub category: String,
    pub summary: String,
}

impl AnalysisResult {
    /// Placeholder used when analysis is unavailable.
    pub fn fallback(file: &FileMetadata) -> Self {
        Self {
            title: file.name.clone(),
            category: FALLBACK_CATEGORY.to_string(),
            summary: FALLBACK_SUMMARY.to_string(),
        }
    }
}

/// Content-understanding service.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        file: &FileMetadata,
        content: &EncodedContent,
    ) -> Result<AnalysisResult, RemoteError>;
}

/// File storage service.
#[async_trait]
pub trait DriveUploader: Send + Sync {
    /// Store `bytes` and return the service's id for them.
    async fn upload(&self, file: &FileMetadata, bytes: &[u8]) -> Result<String, RemoteError>;
}

/// The vault's single handle on the external services.
#[derive(Clone)]
pub struct RemoteAdapter {
    analyzer: Arc<dyn ContentAnalyzer>,
    uploader: Arc<dyn DriveUploader>,
}

impl RemoteAdapter {
    pub fn new(
        analyzer: impl ContentAnalyzer + 'static,
        uploader: impl DriveUploader + 'static,
    ) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            uploader: Arc::new(uploader),
        }
    }

    /// HTTP content analysis and a simulated Drive, as configured.
    pub fn from_config(config: &VaultConfig) -> Result<Self, RemoteError> {
        if config.api_key.is_none() {
            info!("No API key configured; documents will get placeholder analysis");
        }
        Ok(Self::new(
            GeminiAnalyzer::new(config)?,
            SimulatedDrive::new(config.upload_delay),
        ))
    }

    /// Analyze `content`, degrading to [`AnalysisResult::fallback`] on any
    /// failure.
    pub async fn analyze_content(
        &self,
        file: &FileMetadata,
        content: &EncodedContent,
    ) -> AnalysisResult {
        match self.analyzer.analyze(file, content).await {
            Ok(result) => result,
            Err(e) => {
                error!(file_name = %file.name, error = %e, "Content analysis failed, using placeholder");
                AnalysisResult::fallback(file)
            }
        }
    }

    pub async fn simulate_upload(
        &self,
        file: &FileMetadata,
        bytes: &[u8],
    ) -> Result<String, RemoteError> {
        self.uploader.upload(file, bytes).await
    }
}

impl std::fmt::Debug for RemoteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAdapter").finish_non_exhaustive()
    }
}
