//! Grade repository port.

use async_trait::async_trait;

use super::persistence::PersistenceError;
use crate::domain::foundation::StudentId;
use crate::domain::records::{GradeRecord, NewGrade};

#[async_trait]
pub trait GradeRepository: Send + Sync {
    async fn insert(&self, grade: NewGrade) -> Result<GradeRecord, PersistenceError>;

    /// All grades of a student in insertion order.
    async fn find_by_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<GradeRecord>, PersistenceError>;
}
