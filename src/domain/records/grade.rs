//! Grade records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, GradeId, StudentId, TermId, Timestamp};
use crate::domain::grading::GradeScale;

/// Values for a grade row; points and percentage come from the scale.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub term_id: TermId,
    pub grade_letter: String,
    pub grade_points: f64,
    pub percentage: f64,
    pub remarks: Option<String>,
}

impl NewGrade {
    /// Builds a grade row for `letter`, looking up points and percentage.
    pub fn scored(
        student_id: StudentId,
        course_id: CourseId,
        term_id: TermId,
        letter: impl Into<String>,
    ) -> Self {
        let grade_letter = letter.into();
        Self {
            student_id,
            course_id,
            term_id,
            grade_points: GradeScale::points_for(&grade_letter),
            percentage: GradeScale::percentage_for(&grade_letter),
            grade_letter,
            remarks: None,
        }
    }
}

/// Durable grade row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: GradeId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub term_id: TermId,
    pub grade_letter: String,
    pub grade_points: f64,
    pub percentage: f64,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GradeRecord {
    pub fn create(new: NewGrade) -> Self {
        let now = Timestamp::now();
        Self {
            id: GradeId::new(),
            student_id: new.student_id,
            course_id: new.course_id,
            term_id: new.term_id,
            grade_letter: new.grade_letter,
            grade_points: new.grade_points,
            percentage: new.percentage,
            remarks: new.remarks,
            created_at: now,
            updated_at: now,
        }
    }
}
