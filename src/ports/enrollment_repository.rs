//! Student-term link repository port.

use async_trait::async_trait;

use super::persistence::PersistenceError;
use crate::domain::foundation::{StudentId, TermId};
use crate::domain::records::StudentTermLink;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Inserts a link. Duplicates are allowed.
    async fn insert(
        &self,
        student_id: StudentId,
        term_id: TermId,
    ) -> Result<StudentTermLink, PersistenceError>;

    /// The most recently created link for the student, if any.
    async fn latest_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Option<StudentTermLink>, PersistenceError>;
}
