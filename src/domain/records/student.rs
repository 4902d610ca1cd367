//! Student records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StudentId, Timestamp};

/// Values for a student row. Students are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub external_student_id: String,
    pub program: String,
    pub email: String,
    pub enrollment_date: NaiveDate,
}

/// Durable student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub external_student_id: String,
    pub program: String,
    pub email: String,
    pub enrollment_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StudentRecord {
    pub fn create(new: NewStudent) -> Self {
        let now = Timestamp::now();
        Self {
            id: StudentId::new(),
            first_name: new.first_name,
            last_name: new.last_name,
            external_student_id: new.external_student_id,
            program: new.program,
            email: new.email,
            enrollment_date: new.enrollment_date,
            created_at: now,
            updated_at: now,
        }
    }
}
