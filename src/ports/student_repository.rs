//! Student repository port.

use async_trait::async_trait;

use super::persistence::PersistenceError;
use crate::domain::foundation::StudentId;
use crate::domain::records::{NewStudent, StudentRecord};

/// Write and lookup access to student rows.
///
/// Students are not deduplicated: every `insert` creates a new row.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Inserts a student and returns the stored row.
    async fn insert(&self, student: NewStudent) -> Result<StudentRecord, PersistenceError>;

    /// Finds a student by id.
    async fn find_by_id(&self, id: StudentId) -> Result<Option<StudentRecord>, PersistenceError>;
}
