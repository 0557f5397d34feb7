//! Simulated Drive upload.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use docvault_shared::constants::{DRIVE_FILE_ID_LEN, DRIVE_FILE_ID_PREFIX};

use crate::error::RemoteError;
use crate::ingest::FileMetadata;

use super::DriveUploader;

/// Uploader that waits a fixed delay and invents a file id. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedDrive {
    delay: Duration,
}

impl SimulatedDrive {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// `drive-file-` followed by random base-36 characters.
pub fn new_drive_file_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..DRIVE_FILE_ID_LEN)
        .map(|_| std::char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect();
    format!("{DRIVE_FILE_ID_PREFIX}{suffix}")
}

#[async_trait]
impl DriveUploader for SimulatedDrive {
    async fn upload(&self, file: &FileMetadata, _bytes: &[u8]) -> Result<String, RemoteError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let id = new_drive_file_id();
        debug!(file_name = %file.name, size = file.size, drive_file_id = %id, "Simulated upload complete");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_file_id_shape() {
        let id = new_drive_file_id();
        let suffix = id.strip_prefix(DRIVE_FILE_ID_PREFIX).unwrap();
        assert_eq!(suffix.len(), DRIVE_FILE_ID_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn drive_file_ids_differ() {
        assert_ne!(new_drive_file_id(), new_drive_file_id());
    }

    #[tokio::test(start_paused = true)]
    async fn upload_waits_for_delay() {
        let drive = SimulatedDrive::new(Duration::from_millis(1_500));
        let meta = FileMetadata {
            name: "a.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 3,
        };

        let start = tokio::time::Instant::now();
        let id = drive.upload(&meta, b"abc").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1_500));
        assert!(id.starts_with(DRIVE_FILE_ID_PREFIX));
    }
}
