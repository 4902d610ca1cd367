//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::document::{PulldownExportService, DEFAULT_PDF_TIMEOUT_SECS};
use crate::ports::ExportFormat;

/// Document export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory exported files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub format: ExportFormat,

    /// Pandoc executable; searched on PATH when unset
    pub pandoc_path: Option<String>,

    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

impl ExportConfig {
    /// Builds the export adapter with these settings.
    pub fn build_service(&self) -> PulldownExportService {
        let service = PulldownExportService::new().with_pdf_timeout(self.pdf_timeout_secs);
        match &self.pandoc_path {
            Some(path) => service.with_pandoc_path(path.clone()),
            None => service,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > 300 {
            return Err(ValidationError::InvalidPdfTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
            pandoc_path: None,
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./exports")
}

fn default_pdf_timeout() -> u64 {
    DEFAULT_PDF_TIMEOUT_SECS
}
