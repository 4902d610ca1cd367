//! LoadReportCardHandler - the viewing flow.

use std::sync::Arc;

use crate::domain::grading::ReportCard;
use crate::ports::{HandoffError, ReportCardHandoff};

/// Reads the last generated card from the handoff slot.
pub struct LoadReportCardHandler {
    handoff: Arc<dyn ReportCardHandoff>,
}

impl LoadReportCardHandler {
    pub fn new(handoff: Arc<dyn ReportCardHandoff>) -> Self {
        Self { handoff }
    }

    /// Returns the stored card, or `None` if nothing has been generated yet.
    pub async fn handle(&self) -> Result<Option<ReportCard>, HandoffError> {
        let card = self.handoff.get().await?;
        match &card {
            Some(card) => tracing::debug!(student = %card.student().id, "Report card loaded"),
            None => tracing::debug!("No report card in handoff slot"),
        }
        Ok(card)
    }

    /// Empties the slot.
    pub async fn discard(&self) -> Result<(), HandoffError> {
        self.handoff.clear().await
    }
}
