//! Record handlers - durable persistence of submissions.

mod resolver;
mod save_grades;
mod save_student;

pub use resolver::RecordResolver;
pub use save_grades::{
    GradeFailure, SaveGradesCommand, SaveGradesError, SaveGradesHandler, SaveGradesOutcome,
    SavedGrade,
};
pub use save_student::{SaveStudentCommand, SaveStudentError, SaveStudentHandler, SaveStudentResult};
