use async_trait::async_trait;

use crate::error::RemoteError;
use crate::ingest::{EncodedContent, FileMetadata};

use super::{AnalysisResult, ContentAnalyzer};

/// Analyzer that answers every file with the same result. For offline use
/// and tests.
#[derive(Debug, Clone)]
pub struct StaticAnalyzer {
    result: AnalysisResult,
}

impl StaticAnalyzer {
    pub fn new(result: AnalysisResult) -> Self {
        Self { result }
    }
}

#[async_trait]
impl ContentAnalyzer for StaticAnalyzer {
    async fn analyze(
        &self,
        _file: &FileMetadata,
        _content: &EncodedContent,
    ) -> Result<AnalysisResult, RemoteError> {
        Ok(self.result.clone())
    }
}
