//! Strongly-typed identifier value objects.
//!
//! Durable identifiers are UUIDs minted when a record is first persisted.
//! `StudentKey` and `CourseIdentity` additionally model the ephemeral,
//! client-side identity spaces used by a report card before (or instead of)
//! persistence, and keep the two spaces from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a UUID-backed identifier newtype.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mints a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Durable identifier of a student row.
    StudentId
);
uuid_id!(
    /// Durable identifier of an academic term.
    TermId
);
uuid_id!(
    /// Durable identifier of a course.
    CourseId
);
uuid_id!(
    /// Durable identifier of a grade row.
    GradeId
);
uuid_id!(
    /// Durable identifier of a student-term association row.
    EnrollmentId
);

/// Reserved prefix for placeholder student keys.
pub const PLACEHOLDER_PREFIX: &str = "local-";

/// Prefix for caller-assigned course identities.
pub const LOCAL_COURSE_PREFIX: &str = "course-";

/// Identity of the student shown on a report card.
///
/// A durable key exists once the student row has been persisted. When
/// persistence failed, a placeholder carrying the `local-` prefix is used
/// instead so downstream code can never treat it as a store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StudentKey {
    Durable(StudentId),
    Placeholder(i64),
}

impl StudentKey {
    /// Creates a placeholder key from a millisecond timestamp.
    pub fn placeholder(millis: i64) -> Self {
        StudentKey::Placeholder(millis)
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, StudentKey::Durable(_))
    }

    /// Returns the durable id, if any.
    pub fn durable(&self) -> Option<StudentId> {
        match self {
            StudentKey::Durable(id) => Some(*id),
            StudentKey::Placeholder(_) => None,
        }
    }
}

impl From<StudentId> for StudentKey {
    fn from(id: StudentId) -> Self {
        StudentKey::Durable(id)
    }
}

impl fmt::Display for StudentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentKey::Durable(id) => write!(f, "{}", id),
            StudentKey::Placeholder(millis) => write!(f, "{}{}", PLACEHOLDER_PREFIX, millis),
        }
    }
}

impl From<StudentKey> for String {
    fn from(key: StudentKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for StudentKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for StudentKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix(PLACEHOLDER_PREFIX) {
            return rest
                .parse::<i64>()
                .map(StudentKey::Placeholder)
                .map_err(|_| ValidationError::invalid_format("student_key", "bad placeholder"));
        }
        s.parse::<StudentId>()
            .map(StudentKey::Durable)
            .map_err(|e| ValidationError::invalid_format("student_key", e.to_string()))
    }
}

/// Identity of a course line on a report card.
///
/// `Local` identities are positional and assigned at grade-entry time;
/// `Durable` identities come from the record resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CourseIdentity {
    Local(u32),
    Durable(CourseId),
}

impl CourseIdentity {
    /// Local identity for the course at `index` (zero-based) of an entry form.
    pub fn local_for_index(index: usize) -> Self {
        CourseIdentity::Local(u32::try_from(index).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, CourseIdentity::Durable(_))
    }
}

impl fmt::Display for CourseIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseIdentity::Local(n) => write!(f, "{}{}", LOCAL_COURSE_PREFIX, n),
            CourseIdentity::Durable(id) => write!(f, "{}", id),
        }
    }
}

impl From<CourseIdentity> for String {
    fn from(identity: CourseIdentity) -> Self {
        identity.to_string()
    }
}

impl TryFrom<String> for CourseIdentity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(rest) = value.strip_prefix(LOCAL_COURSE_PREFIX) {
            return rest
                .parse::<u32>()
                .map(CourseIdentity::Local)
                .map_err(|_| ValidationError::invalid_format("course_id", "bad local index"));
        }
        value
            .parse::<CourseId>()
            .map(CourseIdentity::Durable)
            .map_err(|e| ValidationError::invalid_format("course_id", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_id_generates_unique_values() {
        assert_ne!(StudentId::new(), StudentId::new());
    }

    #[test]
    fn term_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TermId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn course_id_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CourseId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn placeholder_key_carries_reserved_prefix() {
        let key = StudentKey::placeholder(1_700_000_000_000);
        assert_eq!(key.to_string(), "local-1700000000000");
        assert!(!key.is_durable());
        assert_eq!(key.durable(), None);
    }

    #[test]
    fn durable_key_round_trips_through_json() {
        let id = StudentId::new();
        let key = StudentKey::from(id);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let parsed: StudentKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.durable(), Some(id));
    }

    #[test]
    fn placeholder_never_parses_as_durable() {
        let parsed: StudentKey = "local-42".parse().unwrap();
        assert_eq!(parsed, StudentKey::Placeholder(42));
        assert!("local-abc".parse::<StudentKey>().is_err());
        assert!("not-a-uuid".parse::<StudentKey>().is_err());
    }

    #[test]
    fn local_course_identity_is_one_based() {
        assert_eq!(CourseIdentity::local_for_index(0).to_string(), "course-1");
        assert_eq!(CourseIdentity::local_for_index(4).to_string(), "course-5");
    }

    #[test]
    fn course_identity_spaces_are_distinct_in_json() {
        let local: CourseIdentity = serde_json::from_str("\"course-3\"").unwrap();
        assert_eq!(local, CourseIdentity::Local(3));

        let id = CourseId::new();
        let durable: CourseIdentity =
            serde_json::from_str(&format!("\"{}\"", id)).unwrap();
        assert_eq!(durable, CourseIdentity::Durable(id));
        assert!(durable.is_durable());
        assert!(!local.is_durable());
    }
}
