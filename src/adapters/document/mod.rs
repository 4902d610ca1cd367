//! Document adapters - rendering and export of report cards.
//!
//! - `MarkdownReportRenderer` - Lays out a report card as markdown
//! - `PulldownExportService` - Converts markdown to HTML or PDF

mod markdown_renderer;
mod pulldown_export_service;

pub use markdown_renderer::{Letterhead, MarkdownReportRenderer};
pub use pulldown_export_service::{PulldownExportService, DEFAULT_PDF_TIMEOUT_SECS};
