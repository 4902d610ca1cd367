//! Student snapshot carried by a report card.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StudentKey;

/// Student identity as displayed on a report card.
///
/// This is a snapshot owned by the card, not a reference to the durable
/// student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub id: StudentKey,
    pub first_name: String,
    pub last_name: String,
    /// Institution-issued student number.
    #[serde(rename = "studentId")]
    pub external_student_id: String,
    /// Year of study.
    pub year: String,
    /// Semester label as entered (a term name or a number).
    pub semester: String,
    pub program: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub portrait_url: Option<String>,
}

impl StudentIdentity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First letters of first and last name, used when no portrait exists.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}
