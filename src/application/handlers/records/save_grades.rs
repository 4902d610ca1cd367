//! SaveGradesHandler - persists a batch of grades for a saved student.
//!
//! Grades are stored under the student's most recent term. Each grade is
//! processed independently: a failed course or grade write is logged and
//! collected, and the batch carries on.

use std::sync::Arc;

use thiserror::Error;

use super::resolver::RecordResolver;
use crate::application::submission::GradeSubmission;
use crate::domain::foundation::{CourseId, StudentId};
use crate::domain::grading::{CreditHours, CreditWeighted, GpaCalculator, GpaSummary};
use crate::domain::records::GradeRecord;
use crate::ports::PersistenceError;

#[derive(Debug, Clone)]
pub struct SaveGradesCommand {
    pub student_id: StudentId,
    pub grades: Vec<GradeSubmission>,
}

/// A grade that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedGrade {
    pub course_code: String,
    pub course_id: CourseId,
    pub credit_hours: CreditHours,
    pub record: GradeRecord,
}

impl CreditWeighted for SavedGrade {
    fn grade_points(&self) -> f64 {
        self.record.grade_points
    }

    fn credit_hours(&self) -> u32 {
        u32::from(self.credit_hours.value())
    }
}

/// A grade that did not reach the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeFailure {
    pub course_code: String,
    pub error: PersistenceError,
}

/// Per-grade results of a batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveGradesOutcome {
    pub saved: Vec<SavedGrade>,
    pub failures: Vec<GradeFailure>,
}

impl SaveGradesOutcome {
    /// True only if every grade was stored.
    pub fn all_saved(&self) -> bool {
        self.failures.is_empty()
    }

    /// GPA over the stored grades.
    pub fn summary(&self) -> GpaSummary {
        GpaCalculator::aggregate(&self.saved)
    }
}

#[derive(Debug, Clone, Error)]
pub enum SaveGradesError {
    #[error("No term found for student {0}")]
    NoActiveTerm(StudentId),

    #[error("Failed to look up student term: {0}")]
    Lookup(PersistenceError),
}

pub struct SaveGradesHandler {
    resolver: Arc<RecordResolver>,
}

impl SaveGradesHandler {
    pub fn new(resolver: Arc<RecordResolver>) -> Self {
        Self { resolver }
    }

    pub async fn handle(&self, cmd: SaveGradesCommand) -> Result<SaveGradesOutcome, SaveGradesError> {
        let student_id = cmd.student_id;
        let link = self
            .resolver
            .latest_link(student_id)
            .await
            .map_err(SaveGradesError::Lookup)?
            .ok_or(SaveGradesError::NoActiveTerm(student_id))?;
        let term_id = link.term_id;

        let mut outcome = SaveGradesOutcome::default();
        for grade in cmd.grades {
            let course_code = grade.course_code;

            let course_id = match self
                .resolver
                .resolve_course(&course_code, &grade.course_name, grade.credit_hours)
                .await
            {
                Ok(id) => id,
                Err(error) => {
                    tracing::warn!(%student_id, course_code = %course_code, %error, "Course could not be resolved");
                    outcome.failures.push(GradeFailure { course_code, error });
                    continue;
                }
            };

            match self
                .resolver
                .record_grade(student_id, course_id, term_id, &grade.grade)
                .await
            {
                Ok(record) => outcome.saved.push(SavedGrade {
                    course_code,
                    course_id,
                    credit_hours: grade.credit_hours,
                    record,
                }),
                Err(error) => {
                    tracing::warn!(%student_id, course_code = %course_code, %error, "Grade could not be saved");
                    outcome.failures.push(GradeFailure { course_code, error });
                }
            }
        }

        tracing::info!(
            %student_id,
            %term_id,
            saved = outcome.saved.len(),
            failed = outcome.failures.len(),
            "Grades saved"
        );
        Ok(outcome)
    }
}
