//! Submission boundary - loosely typed form payloads and their validation.
//!
//! A `ReportCardForm` is whatever the entry form sends. Validation checks
//! every field, collects all failures, and only on success produces a
//! `ReportCardSubmission` the record resolver and report assembly can trust.

use serde::Deserialize;
use std::fmt;

use crate::domain::foundation::{CourseIdentity, StudentKey, ValidationError};
use crate::domain::grading::{
    CreditHours, GradedCourse, RemarksMode, StudentIdentity, MAX_CREDIT_HOURS, MIN_CREDIT_HOURS,
};

const MIN_NAME_LEN: usize = 2;
const MIN_STUDENT_ID_LEN: usize = 3;
const MIN_PROGRAM_LEN: usize = 2;
const MIN_SIGNATURE_LEN: usize = 2;
const MIN_COURSE_CODE_LEN: usize = 2;
const MIN_COURSE_NAME_LEN: usize = 2;

/// A number that may arrive as JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn coerce(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(*n),
            LooseNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One grade row as entered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeEntryForm {
    pub course_code: String,
    pub course_name: String,
    pub credit_hours: Option<LooseNumber>,
    pub grade: String,
}

/// Raw report card form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportCardForm {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub year: String,
    pub semester: String,
    pub program: String,
    pub email: String,
    pub image_url: Option<String>,
    pub grades: Vec<GradeEntryForm>,
    pub remarks: Option<String>,
    pub signature: String,
}

/// Validated student fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSubmission {
    pub first_name: String,
    pub last_name: String,
    pub external_student_id: String,
    pub year: String,
    pub semester: String,
    pub program: String,
    pub email: String,
    pub portrait_url: Option<String>,
}

impl StudentSubmission {
    /// Snapshot for a report card under the given key.
    pub fn identity(&self, id: StudentKey) -> StudentIdentity {
        StudentIdentity {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            external_student_id: self.external_student_id.clone(),
            year: self.year.clone(),
            semester: self.semester.clone(),
            program: self.program.clone(),
            portrait_url: self.portrait_url.clone(),
        }
    }
}

/// Validated grade row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSubmission {
    pub course_code: String,
    pub course_name: String,
    pub credit_hours: CreditHours,
    /// Letter as entered; unknown letters are allowed and score zero.
    pub grade: String,
}

/// A fully validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCardSubmission {
    pub student: StudentSubmission,
    pub grades: Vec<GradeSubmission>,
    pub remarks: RemarksMode,
    pub signature: String,
}

impl ReportCardSubmission {
    /// Card lines, numbered `course-1`, `course-2`, ... in entry order.
    pub fn graded_courses(&self) -> Vec<GradedCourse> {
        self.grades
            .iter()
            .enumerate()
            .map(|(index, g)| {
                GradedCourse::new(
                    CourseIdentity::local_for_index(index),
                    g.course_code.clone(),
                    g.course_name.clone(),
                    g.credit_hours,
                    g.grade.clone(),
                )
            })
            .collect()
    }
}

/// Every field error found in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionErrors(Vec<ValidationError>);

impl SubmissionErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Error for a field path such as `grades[1].courseCode`.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SubmissionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.0.len())?;
        for err in &self.0 {
            write!(f, "; {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for SubmissionErrors {}

impl ReportCardForm {
    /// Fills a blank signature with `default`.
    pub fn with_default_signature(mut self, default: Option<&str>) -> Self {
        if let Some(default) = default {
            if self.signature.trim().is_empty() {
                self.signature = default.to_string();
            }
        }
        self
    }

    /// Validates every field and builds the submission.
    ///
    /// # Errors
    ///
    /// Returns all field errors at once, in form order.
    pub fn validate(self) -> Result<ReportCardSubmission, SubmissionErrors> {
        let mut errors = Vec::new();

        let first_name = min_len(&mut errors, "firstName", &self.first_name, MIN_NAME_LEN);
        let last_name = min_len(&mut errors, "lastName", &self.last_name, MIN_NAME_LEN);
        let external_student_id =
            min_len(&mut errors, "studentId", &self.student_id, MIN_STUDENT_ID_LEN);
        let year = min_len(&mut errors, "year", &self.year, 1);
        let semester = min_len(&mut errors, "semester", &self.semester, 1);
        let program = min_len(&mut errors, "program", &self.program, MIN_PROGRAM_LEN);
        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.push(ValidationError::invalid_format("email", "not a valid email address"));
        }

        if self.grades.is_empty() {
            errors.push(ValidationError::empty_field("grades"));
        }
        let grades: Vec<GradeSubmission> = self
            .grades
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| validate_grade(&mut errors, index, entry))
            .collect();

        let signature = min_len(&mut errors, "signature", &self.signature, MIN_SIGNATURE_LEN);

        if !errors.is_empty() {
            return Err(SubmissionErrors(errors));
        }

        Ok(ReportCardSubmission {
            student: StudentSubmission {
                first_name,
                last_name,
                external_student_id,
                year,
                semester,
                program,
                email,
                portrait_url: self
                    .image_url
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty()),
            },
            grades,
            remarks: RemarksMode::from_optional(self.remarks),
            signature,
        })
    }
}

fn min_len(errors: &mut Vec<ValidationError>, field: &str, value: &str, min: usize) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::empty_field(field));
    } else if trimmed.chars().count() < min {
        errors.push(ValidationError::too_short(field, min));
    }
    trimmed.to_string()
}

fn validate_grade(
    errors: &mut Vec<ValidationError>,
    index: usize,
    entry: &GradeEntryForm,
) -> Option<GradeSubmission> {
    let before = errors.len();
    let path = |name: &str| format!("grades[{}].{}", index, name);

    let course_code = min_len(errors, &path("courseCode"), &entry.course_code, MIN_COURSE_CODE_LEN);
    let course_name = min_len(errors, &path("courseName"), &entry.course_name, MIN_COURSE_NAME_LEN);
    let grade = min_len(errors, &path("grade"), &entry.grade, 1);
    let credit_hours = validate_credit_hours(errors, &path("creditHours"), entry.credit_hours.as_ref());

    if errors.len() > before {
        return None;
    }
    Some(GradeSubmission {
        course_code,
        course_name,
        credit_hours: credit_hours?,
        grade,
    })
}

fn validate_credit_hours(
    errors: &mut Vec<ValidationError>,
    field: &str,
    raw: Option<&LooseNumber>,
) -> Option<CreditHours> {
    let Some(raw) = raw else {
        errors.push(ValidationError::empty_field(field));
        return None;
    };
    let Some(value) = raw.coerce() else {
        errors.push(ValidationError::invalid_format(field, "must be a number"));
        return None;
    };
    if value.fract() != 0.0 {
        errors.push(ValidationError::invalid_format(field, "must be a whole number"));
        return None;
    }
    if value < f64::from(MIN_CREDIT_HOURS) || value > f64::from(MAX_CREDIT_HOURS) {
        errors.push(ValidationError::out_of_range(
            field,
            i64::from(MIN_CREDIT_HOURS),
            i64::from(MAX_CREDIT_HOURS),
            value as i64,
        ));
        return None;
    }
    match CreditHours::try_new(value as u8) {
        Ok(hours) => Some(hours),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

/// Shape check: one `@`, a non-empty local part, and a dotted domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
