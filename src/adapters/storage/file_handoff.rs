//! File-based Handoff Adapter
//!
//! Stores the report card as `<directory>/reportCardData.json`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::grading::ReportCard;
use crate::ports::{HandoffError, ReportCardHandoff, HANDOFF_KEY};

/// File-backed handoff slot
#[derive(Debug, Clone)]
pub struct FileHandoff {
    directory: PathBuf,
}

impl FileHandoff {
    /// Create a slot stored under `directory`.
    ///
    /// # Example
    /// ```ignore
    /// let handoff = FileHandoff::new("./data/handoff");
    /// ```
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding the card.
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", HANDOFF_KEY))
    }
}

#[async_trait]
impl ReportCardHandoff for FileHandoff {
    async fn get(&self) -> Result<Option<ReportCard>, HandoffError> {
        let raw = match fs::read_to_string(self.file_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HandoffError::IoError(e.to_string())),
        };

        let card = serde_json::from_str(&raw)
            .map_err(|e| HandoffError::DeserializationFailed(e.to_string()))?;
        Ok(Some(card))
    }

    async fn set(&self, card: &ReportCard) -> Result<(), HandoffError> {
        fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| HandoffError::IoError(e.to_string()))?;

        let json = serde_json::to_string_pretty(card)
            .map_err(|e| HandoffError::SerializationFailed(e.to_string()))?;

        fs::write(self.file_path(), json)
            .await
            .map_err(|e| HandoffError::IoError(e.to_string()))?;

        tracing::debug!(path = %self.file_path().display(), "Report card written to handoff file");
        Ok(())
    }

    async fn clear(&self) -> Result<(), HandoffError> {
        match fs::remove_file(self.file_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HandoffError::IoError(e.to_string())),
        }
    }
}
