//! Application handlers.
//!
//! - `records` - durable persistence of students and grades
//! - `report` - generating, loading and exporting report cards

pub mod records;
pub mod report;

pub use records::{
    GradeFailure, RecordResolver, SaveGradesCommand, SaveGradesError, SaveGradesHandler,
    SaveGradesOutcome, SaveStudentCommand, SaveStudentError, SaveStudentHandler,
    SaveStudentResult, SavedGrade,
};
pub use report::{
    ExportReportCardCommand, ExportReportCardError, ExportReportCardHandler, ExportedReportCard,
    GenerateReportCardCommand, GenerateReportCardError, GenerateReportCardHandler,
    GenerateReportCardResult, LoadReportCardHandler, SubmissionNotice,
};
