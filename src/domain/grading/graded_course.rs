//! A course line on a report card.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::grade_scale::GradeScale;
use crate::domain::foundation::{CourseIdentity, ValidationError};

/// Smallest credit weight a course may carry.
pub const MIN_CREDIT_HOURS: u8 = 1;

/// Largest credit weight a course may carry.
pub const MAX_CREDIT_HOURS: u8 = 6;

/// Credit-hour weight of a course (1 to 6 inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CreditHours(u8);

impl CreditHours {
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(MIN_CREDIT_HOURS..=MAX_CREDIT_HOURS).contains(&value) {
            return Err(ValidationError::out_of_range(
                "credit_hours",
                i64::from(MIN_CREDIT_HOURS),
                i64::from(MAX_CREDIT_HOURS),
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CreditHours {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CreditHours> for u8 {
    fn from(hours: CreditHours) -> Self {
        hours.0
    }
}

impl fmt::Display for CreditHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that contributes to a credit-weighted average.
pub trait CreditWeighted {
    fn grade_points(&self) -> f64;
    fn credit_hours(&self) -> u32;
}

/// A graded course as shown on a report card.
///
/// # Invariants
///
/// - `points` is always `GradeScale::points_for(grade)`, also when read back
///   from JSON
/// - immutable once constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredGradedCourse")]
pub struct GradedCourse {
    course_id: CourseIdentity,
    course_code: String,
    course_name: String,
    credit_hours: CreditHours,
    grade: String,
    points: f64,
}

impl GradedCourse {
    /// Creates a graded course, deriving its grade points from the scale.
    pub fn new(
        course_id: CourseIdentity,
        course_code: impl Into<String>,
        course_name: impl Into<String>,
        credit_hours: CreditHours,
        grade: impl Into<String>,
    ) -> Self {
        let grade = grade.into();
        let points = GradeScale::points_for(&grade);
        Self {
            course_id,
            course_code: course_code.into(),
            course_name: course_name.into(),
            credit_hours,
            grade,
            points,
        }
    }

    pub fn course_id(&self) -> CourseIdentity {
        self.course_id
    }

    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    pub fn course_name(&self) -> &str {
        &self.course_name
    }

    pub fn credits(&self) -> CreditHours {
        self.credit_hours
    }

    /// The letter exactly as entered.
    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn points(&self) -> f64 {
        self.points
    }
}

/// Serialized form of a course line. Stored points are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredGradedCourse {
    course_id: CourseIdentity,
    course_code: String,
    course_name: String,
    credit_hours: CreditHours,
    grade: String,
}

impl From<StoredGradedCourse> for GradedCourse {
    fn from(stored: StoredGradedCourse) -> Self {
        GradedCourse::new(
            stored.course_id,
            stored.course_code,
            stored.course_name,
            stored.credit_hours,
            stored.grade,
        )
    }
}

impl CreditWeighted for GradedCourse {
    fn grade_points(&self) -> f64 {
        self.points
    }

    fn credit_hours(&self) -> u32 {
        u32::from(self.credit_hours.value())
    }
}
