//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, value objects and error types that form the
//! vocabulary of the report card domain.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    CourseId, CourseIdentity, EnrollmentId, GradeId, StudentId, StudentKey, TermId,
    LOCAL_COURSE_PREFIX, PLACEHOLDER_PREFIX,
};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
