//! Course repository port.

use async_trait::async_trait;

use super::persistence::{PersistenceError, Upserted};
use crate::domain::foundation::CourseId;
use crate::domain::records::{CourseRecord, NewCourse};

/// Access to the course catalog, unique on `course_code`.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_code(&self, course_code: &str)
        -> Result<Option<CourseRecord>, PersistenceError>;

    async fn find_by_id(&self, id: CourseId) -> Result<Option<CourseRecord>, PersistenceError>;

    /// Returns the course with the same code, or inserts `course`.
    ///
    /// An existing course is returned unchanged; name and credit hours from
    /// `course` are not applied to it.
    async fn upsert(&self, course: NewCourse) -> Result<Upserted<CourseRecord>, PersistenceError>;
}
