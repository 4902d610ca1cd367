//! Report Card Handoff Port - a single slot holding the latest report card.
//!
//! The submit flow writes the assembled card here and the viewing flow reads
//! it back. An empty slot is a normal state, reported as `Ok(None)`.

use async_trait::async_trait;

use crate::domain::grading::ReportCard;

/// Fixed key under which the card is stored.
pub const HANDOFF_KEY: &str = "reportCardData";

/// Errors that can occur while reading or writing the slot.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("Failed to serialize report card: {0}")]
    SerializationFailed(String),

    #[error("Stored report card is malformed: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the report card handoff slot.
#[async_trait]
pub trait ReportCardHandoff: Send + Sync {
    /// Reads the stored card.
    ///
    /// # Returns
    /// `None` if nothing has been stored or the slot was cleared.
    ///
    /// # Errors
    /// `DeserializationFailed` if the stored value is not a report card.
    async fn get(&self) -> Result<Option<ReportCard>, HandoffError>;

    /// Replaces the stored card.
    async fn set(&self, card: &ReportCard) -> Result<(), HandoffError>;

    /// Empties the slot. Clearing an empty slot succeeds.
    async fn clear(&self) -> Result<(), HandoffError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_is_object_safe() {
        fn check<T: ReportCardHandoff + ?Sized>() {}
        check::<dyn ReportCardHandoff>();
    }

    #[test]
    fn handoff_key_matches_stored_format() {
        assert_eq!(HANDOFF_KEY, "reportCardData");
    }
}
