//! Handoff slot configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::storage::{FileHandoff, InMemoryHandoff};
use crate::ports::ReportCardHandoff;

/// Which handoff adapter to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HandoffBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandoffConfig {
    #[serde(default)]
    pub backend: HandoffBackend,

    /// Directory for the file backend
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl HandoffConfig {
    /// Builds the configured adapter.
    pub fn build(&self) -> Arc<dyn ReportCardHandoff> {
        match self.backend {
            HandoffBackend::Memory => Arc::new(InMemoryHandoff::new()),
            HandoffBackend::File => Arc::new(FileHandoff::new(&self.directory)),
        }
    }
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            backend: HandoffBackend::default(),
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./data/handoff")
}
