//! Application layer - Commands, Handlers and the submission boundary.
//!
//! Handlers orchestrate domain operations and coordinate between ports.
//! Form payloads enter through `submission` and are validated before any
//! handler sees them.

pub mod handlers;
pub mod submission;

pub use handlers::{
    ExportReportCardCommand, ExportReportCardHandler, GenerateReportCardCommand,
    GenerateReportCardError, GenerateReportCardHandler, GenerateReportCardResult,
    LoadReportCardHandler, RecordResolver, SaveGradesHandler, SaveStudentHandler,
    SubmissionNotice,
};
pub use submission::{
    GradeSubmission, ReportCardForm, ReportCardSubmission, StudentSubmission, SubmissionErrors,
};
