//! Academic term records.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{TermId, Timestamp};

/// Length of a newly created term.
pub const TERM_LENGTH_MONTHS: u32 = 4;

/// Named academic period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TermName {
    #[default]
    Fall,
    Spring,
    Summer,
    Winter,
}

impl TermName {
    /// Maps a free-form semester label onto a term name.
    ///
    /// Only the exact names match; anything else (numeric semesters, other
    /// casing, surrounding whitespace) becomes `Fall`.
    pub fn normalize(label: &str) -> Self {
        match label {
            "Fall" => TermName::Fall,
            "Spring" => TermName::Spring,
            "Summer" => TermName::Summer,
            "Winter" => TermName::Winter,
            _ => TermName::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TermName::Fall => "Fall",
            TermName::Spring => "Spring",
            TermName::Summer => "Summer",
            TermName::Winter => "Winter",
        }
    }
}

impl fmt::Display for TermName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the leading digits of a semester label, so "3" and "3rd" both give
/// 3. Zero, no leading digits, or a value above `u8::MAX` count as absent.
pub fn parse_semester_number(label: &str) -> Option<u8> {
    let label = label.trim_start();
    let end = label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(label.len());
    label[..end].parse::<u8>().ok().filter(|n| *n > 0)
}

/// Values for a term that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTerm {
    pub term_name: TermName,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester_number: Option<u8>,
}

impl NewTerm {
    /// A term starting `today` and ending four calendar months later.
    pub fn starting(
        term_name: TermName,
        academic_year: impl Into<String>,
        semester_number: Option<u8>,
        today: NaiveDate,
    ) -> Self {
        let end_date = today
            .checked_add_months(Months::new(TERM_LENGTH_MONTHS))
            .unwrap_or(today);
        Self {
            term_name,
            academic_year: academic_year.into(),
            start_date: today,
            end_date,
            semester_number,
        }
    }
}

/// Durable term row. Unique on `(term_name, academic_year)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: TermId,
    pub term_name: TermName,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester_number: Option<u8>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TermRecord {
    /// Materializes a new row with a fresh id.
    pub fn create(new: NewTerm) -> Self {
        let now = Timestamp::now();
        Self {
            id: TermId::new(),
            term_name: new.term_name,
            academic_year: new.academic_year,
            start_date: new.start_date,
            end_date: new.end_date,
            semester_number: new.semester_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// True if `(term_name, academic_year)` identifies this row.
    pub fn matches(&self, term_name: TermName, academic_year: &str) -> bool {
        self.term_name == term_name && self.academic_year == academic_year
    }

    /// Whether a supplied semester number should replace the stored one.
    pub fn needs_semester_update(&self, supplied: Option<u8>) -> bool {
        matches!(supplied, Some(n) if self.semester_number != Some(n))
    }
}
