//! Report handlers - generating, loading and exporting report cards.

mod export_report_card;
mod generate_report_card;
mod load_report_card;

pub use export_report_card::{
    ExportReportCardCommand, ExportReportCardError, ExportReportCardHandler, ExportedReportCard,
};
pub use generate_report_card::{
    GenerateReportCardCommand, GenerateReportCardError, GenerateReportCardHandler,
    GenerateReportCardResult, SubmissionNotice,
};
pub use load_report_card::LoadReportCardHandler;
