//! Report card aggregate.
//!
//! A report card is assembled in one step from a student snapshot, the graded
//! courses and issue metadata. Derived fields (`total_credits`, `gpa` and
//! derived remarks) are always computed together from `grades`; there is no
//! way to patch them individually.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::gpa::{GpaCalculator, GpaSummary};
use super::graded_course::GradedCourse;
use super::student::StudentIdentity;

/// GPA at or above which a student is eligible for the Dean's List.
pub const DEANS_LIST_THRESHOLD: f64 = 3.5;

/// GPA at or above which a student is in good standing.
pub const GOOD_STANDING_THRESHOLD: f64 = 3.0;

/// Academic standing tier derived from GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    DeansList,
    GoodStanding,
    Satisfactory,
}

impl Standing {
    pub const ALL: [Standing; 3] = [
        Standing::DeansList,
        Standing::GoodStanding,
        Standing::Satisfactory,
    ];

    /// Classifies a GPA, top tier first.
    pub fn from_gpa(gpa: f64) -> Self {
        if gpa >= DEANS_LIST_THRESHOLD {
            Standing::DeansList
        } else if gpa >= GOOD_STANDING_THRESHOLD {
            Standing::GoodStanding
        } else {
            Standing::Satisfactory
        }
    }

    /// Default remark text for this tier.
    pub fn remark(&self) -> &'static str {
        match self {
            Standing::DeansList => "Excellent performance. Eligible for Dean's List.",
            Standing::GoodStanding => "Good academic standing. Keep up the good work.",
            Standing::Satisfactory => {
                "Satisfactory performance. Consider additional academic support."
            }
        }
    }
}

/// How the remarks of a card are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemarksMode {
    /// Derive from GPA.
    #[default]
    Derived,
    /// Use caller text. Blank text behaves like `Derived`.
    Supplied(String),
}

impl RemarksMode {
    /// Builds a mode from optional form text.
    pub fn from_optional(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.trim().is_empty() => RemarksMode::Supplied(text),
            _ => RemarksMode::Derived,
        }
    }

    /// Mode for remarks already on a card: tier text is re-derived, any
    /// other text is kept.
    pub fn from_stored(text: String) -> Self {
        if Standing::ALL.iter().any(|tier| tier.remark() == text) {
            RemarksMode::Derived
        } else {
            RemarksMode::from_optional(Some(text))
        }
    }

    fn resolve(&self, gpa: f64) -> String {
        match self {
            RemarksMode::Supplied(text) if !text.trim().is_empty() => text.clone(),
            _ => Standing::from_gpa(gpa).remark().to_string(),
        }
    }
}

/// Report card aggregate.
///
/// # Invariants
///
/// - `total_credits == Σ credit_hours(grades)`
/// - `gpa == Σ(points × credits) / total_credits`, or 0 with no credits
/// - derived remarks always match `Standing::from_gpa(gpa)`
///
/// Deserializing goes through [`ReportCard::assemble`]: stored totals, GPA
/// and tier remarks are recomputed from `grades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredReportCard")]
pub struct ReportCard {
    student: StudentIdentity,
    grades: Vec<GradedCourse>,
    issue_date: NaiveDate,
    remarks: String,
    total_credits: u32,
    gpa: f64,
    signature: String,
}

/// Serialized form of a card; only non-derived fields are read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredReportCard {
    student: StudentIdentity,
    #[serde(default)]
    grades: Vec<GradedCourse>,
    issue_date: NaiveDate,
    #[serde(default)]
    remarks: String,
    #[serde(default)]
    signature: String,
}

impl From<StoredReportCard> for ReportCard {
    fn from(stored: StoredReportCard) -> Self {
        ReportCard::assemble(
            stored.student,
            stored.grades,
            stored.issue_date,
            stored.signature,
            RemarksMode::from_stored(stored.remarks),
        )
    }
}

impl ReportCard {
    /// Assembles a card and computes every derived field.
    pub fn assemble(
        student: StudentIdentity,
        grades: Vec<GradedCourse>,
        issue_date: NaiveDate,
        signature: impl Into<String>,
        remarks_mode: RemarksMode,
    ) -> Self {
        let GpaSummary { gpa, total_credits } = GpaCalculator::aggregate(&grades);
        let remarks = remarks_mode.resolve(gpa);
        Self {
            student,
            grades,
            issue_date,
            remarks,
            total_credits,
            gpa,
            signature: signature.into(),
        }
    }

    /// Returns a new card for a different set of grades.
    ///
    /// Everything derived is recomputed. Remarks that are not tier text are
    /// treated as supplied and kept; otherwise they follow the new GPA.
    pub fn with_grades(self, grades: Vec<GradedCourse>) -> Self {
        let remarks_mode = RemarksMode::from_stored(self.remarks);
        Self::assemble(
            self.student,
            grades,
            self.issue_date,
            self.signature,
            remarks_mode,
        )
    }

    pub fn student(&self) -> &StudentIdentity {
        &self.student
    }

    pub fn grades(&self) -> &[GradedCourse] {
        &self.grades
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// Issue date in long form, e.g. "October 19, 2026".
    pub fn issue_date_display(&self) -> String {
        self.issue_date.format("%B %-d, %Y").to_string()
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn summary(&self) -> GpaSummary {
        GpaSummary {
            gpa: self.gpa,
            total_credits: self.total_credits,
        }
    }

    pub fn standing(&self) -> Standing {
        Standing::from_gpa(self.gpa)
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// File name stem used for exports: `<lastName>_<firstName>_ReportCard`.
    ///
    /// Characters other than letters, digits, `-` and `_` become `_`, so the
    /// stem is always a single plain path component.
    pub fn export_basename(&self) -> String {
        format!(
            "{}_{}_ReportCard",
            file_safe(&self.student.last_name),
            file_safe(&self.student.first_name)
        )
    }
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
