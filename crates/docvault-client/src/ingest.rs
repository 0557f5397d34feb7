//! Turning a raw file into a [`Document`].
//!
//! The pipeline itself is driven by [`crate::Vault::ingest_document`]; this
//! module holds the pieces it is made of: the uploaded file, its encoded
//! transport form, the stage machine, and document assembly.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use docvault_shared::constants::{DEFAULT_FILE_TYPE, MAX_FILE_SIZE};
use docvault_shared::{Category, Document};

use crate::error::IngestFailure;
use crate::remote::AnalysisResult;

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Where an ingestion is in its lifecycle.
///
/// `Idle → Encoding → AnalyzingAndUploading → Assembling → Committed`, or
/// `Failed` from `Encoding` or `AnalyzingAndUploading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IngestStage {
    Idle,
    Encoding,
    AnalyzingAndUploading,
    Assembling,
    Committed,
    Failed,
}

impl IngestStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Failed)
    }
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Encoding => "encoding",
            Self::AnalyzingAndUploading => "analyzing_and_uploading",
            Self::Assembling => "assembling",
            Self::Committed => "committed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    /// MIME type as reported by the picker, if any.
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.filter(|m| !m.is_empty()).map(str::to_string),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(name, guess_mime_type(path), bytes))
    }

    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            mime_type: self
                .mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string()),
            size: self.bytes.len() as u64,
        }
    }
}

/// What the remote services are told about a file besides its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime)
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// File content as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedContent {
    data_url: String,
}

impl EncodedContent {
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// The base64 payload without the `data:...;base64,` prefix.
    pub fn payload(&self) -> &str {
        self.data_url
            .split_once(',')
            .map_or("", |(_, payload)| payload)
    }
}

/// First pipeline stage: size check and base64 encoding.
pub fn encode(file: &RawFile) -> Result<EncodedContent, IngestFailure> {
    if file.bytes.len() > MAX_FILE_SIZE {
        return Err(IngestFailure::TooLarge {
            size: file.bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }
    let mime = file.mime_type.as_deref().unwrap_or(DEFAULT_FILE_TYPE);
    Ok(EncodedContent {
        data_url: format!("data:{mime};base64,{}", STANDARD.encode(&file.bytes)),
    })
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub fn new_document_id() -> String {
    format!("doc-{}", Uuid::new_v4().simple())
}

pub fn new_category_id() -> String {
    format!("cat-{}", Uuid::new_v4().simple())
}

/// `1536` → `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// `2026-10-18` → `Oct 18, 2026`.
pub fn format_upload_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Build the record committed at the end of a successful ingestion.
pub fn assemble_document(
    file: &FileMetadata,
    analysis: AnalysisResult,
    category: &Category,
    drive_file_id: String,
    uploaded_on: NaiveDate,
) -> Document {
    Document {
        id: new_document_id(),
        title: analysis.title,
        category_id: category.id.clone(),
        upload_date: format_upload_date(uploaded_on),
        file_type: file.mime_type.clone(),
        file_size: format_file_size(file.size),
        summary: analysis.summary,
        drive_file_id,
        thumbnail: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_builds_data_url() {
        let file = RawFile::new("a.txt", Some("text/plain"), b"hello".to_vec());
        let encoded = encode(&file).unwrap();
        assert_eq!(encoded.data_url(), "data:text/plain;base64,aGVsbG8=");
        assert_eq!(encoded.payload(), "aGVsbG8=");
    }

    #[test]
    fn encode_without_mime_uses_octet_stream() {
        let file = RawFile::new("blob", None, vec![0xff]);
        let encoded = encode(&file).unwrap();
        assert!(encoded
            .data_url()
            .starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn encode_rejects_oversized_files() {
        let file = RawFile::new("big.bin", None, vec![0u8; MAX_FILE_SIZE + 1]);
        match encode(&file) {
            Err(IngestFailure::TooLarge { size, max }) => {
                assert_eq!(size, MAX_FILE_SIZE + 1);
                assert_eq!(max, MAX_FILE_SIZE);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn empty_mime_is_treated_as_missing() {
        let file = RawFile::new("x", Some(""), vec![]);
        assert_eq!(file.mime_type, None);
        assert_eq!(file.metadata().mime_type, DEFAULT_FILE_TYPE);
    }

    #[test]
    fn file_size_formatting() {
        assert_eq!(format_file_size(0), "0.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1024.0 KB");
    }

    #[test]
    fn upload_date_formatting() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_upload_date(date), "Mar 7, 2026");
    }

    #[test]
    fn ids_are_unique_and_prefixed() {
        let a = new_document_id();
        let b = new_document_id();
        assert_ne!(a, b);
        assert!(a.starts_with("doc-"));
        assert!(new_category_id().starts_with("cat-"));
    }

    #[test]
    fn assemble_fills_every_field() {
        let meta = FileMetadata {
            name: "scan.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 2048,
        };
        let analysis = AnalysisResult {
            title: "Tax Return 2025".into(),
            category: "Finance".into(),
            summary: "Annual return. Refund expected.".into(),
        };
        let category = Category::new("cat-4", "Finance", "💰", "bg-emerald-500");
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        let doc = assemble_document(&meta, analysis, &category, "drive-file-x".into(), date);
        assert_eq!(doc.title, "Tax Return 2025");
        assert_eq!(doc.category_id, "cat-4");
        assert_eq!(doc.upload_date, "Oct 18, 2026");
        assert_eq!(doc.file_type, "application/pdf");
        assert_eq!(doc.file_size, "2.0 KB");
        assert_eq!(doc.summary, "Annual return. Refund expected.");
        assert_eq!(doc.drive_file_id, "drive-file-x");
        assert!(doc.thumbnail.is_none());
    }

    #[tokio::test]
    async fn read_guesses_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Report.PDF");
        tokio::fs::write(&path, b"%PDF-1.7").await.unwrap();

        let file = RawFile::read(&path).await.unwrap();
        assert_eq!(file.name, "Report.PDF");
        assert_eq!(file.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(file.bytes, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RawFile::read(dir.path().join("absent.png")).await.is_err());
    }

    #[test]
    fn stage_terminality() {
        assert!(IngestStage::Committed.is_terminal());
        assert!(IngestStage::Failed.is_terminal());
        assert!(!IngestStage::Assembling.is_terminal());
        assert_eq!(IngestStage::AnalyzingAndUploading.to_string(), "analyzing_and_uploading");
    }
}
