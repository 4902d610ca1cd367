//! Grading module - grade scale, GPA aggregation and report card assembly.
//!
//! Everything here is pure: no ports, no I/O. The record resolver and the
//! report assembly both read points and percentages from `GradeScale`, which
//! keeps the display path and the persisted path numerically consistent.

mod gpa;
mod grade_scale;
mod graded_course;
mod report_card;
mod student;

pub use gpa::{GpaCalculator, GpaSummary};
pub use grade_scale::{GradeBand, GradeLetter, GradeScale};
pub use graded_course::{
    CreditHours, CreditWeighted, GradedCourse, MAX_CREDIT_HOURS, MIN_CREDIT_HOURS,
};
pub use report_card::{
    RemarksMode, ReportCard, Standing, DEANS_LIST_THRESHOLD, GOOD_STANDING_THRESHOLD,
};
pub use student::StudentIdentity;
