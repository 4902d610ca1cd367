//! Course records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, Timestamp};
use crate::domain::grading::CreditHours;

/// Department heuristic: the first whitespace-delimited word of the name.
pub fn derive_department(course_name: &str) -> String {
    course_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Values for a course that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    pub credit_hours: CreditHours,
    pub department: String,
}

impl NewCourse {
    pub fn new(
        course_code: impl Into<String>,
        course_name: impl Into<String>,
        credit_hours: CreditHours,
    ) -> Self {
        let course_name = course_name.into();
        Self {
            course_code: course_code.into(),
            department: derive_department(&course_name),
            course_name,
            credit_hours,
        }
    }
}

/// Durable course row. Unique on `course_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    pub course_code: String,
    pub course_name: String,
    pub credit_hours: CreditHours,
    pub department: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CourseRecord {
    pub fn create(new: NewCourse) -> Self {
        let now = Timestamp::now();
        Self {
            id: CourseId::new(),
            course_code: new.course_code,
            course_name: new.course_name,
            credit_hours: new.credit_hours,
            department: new.department,
            created_at: now,
            updated_at: now,
        }
    }
}
