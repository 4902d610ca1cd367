//! Report Renderer Port - turns a report card into a markdown document.

use thiserror::Error;

use crate::domain::grading::ReportCard;

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Failed to format report card: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Port for rendering report cards.
///
/// Rendering is pure: the same card always renders to the same document.
pub trait ReportRenderer: Send + Sync {
    /// Renders the card as markdown.
    fn render(&self, card: &ReportCard) -> Result<String, RenderError>;
}
