//! Ports - Interfaces between the application core and the outside world.
//!
//! Record repositories cover durable persistence. The handoff slot, renderer
//! and export service cover what happens to an assembled report card.

mod course_repository;
mod document_export_service;
mod enrollment_repository;
mod grade_repository;
mod persistence;
mod report_card_handoff;
mod report_renderer;
mod student_repository;
mod term_repository;

pub use course_repository::CourseRepository;
pub use document_export_service::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use enrollment_repository::EnrollmentRepository;
pub use grade_repository::GradeRepository;
pub use persistence::{PersistenceError, Upserted};
pub use report_card_handoff::{HandoffError, ReportCardHandoff, HANDOFF_KEY};
pub use report_renderer::{RenderError, ReportRenderer};
pub use student_repository::StudentRepository;
pub use term_repository::TermRepository;
