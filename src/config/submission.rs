//! Submission behavior configuration

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionConfig {
    /// Produce a card under a placeholder id when the student cannot be saved
    #[serde(default)]
    pub offline_fallback: bool,
}
