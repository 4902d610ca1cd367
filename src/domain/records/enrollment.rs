//! Student-term association records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EnrollmentId, StudentId, TermId, Timestamp};

/// Links a student to a term. Not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentTermLink {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub term_id: TermId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StudentTermLink {
    pub fn create(student_id: StudentId, term_id: TermId) -> Self {
        let now = Timestamp::now();
        Self {
            id: EnrollmentId::new(),
            student_id,
            term_id,
            created_at: now,
            updated_at: now,
        }
    }
}
