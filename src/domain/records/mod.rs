//! Durable records owned by the persistence store.
//!
//! Each kind has a `New*` value describing a row to insert and a `*Record`
//! carrying the store-assigned id and timestamps.

mod course;
mod enrollment;
mod grade;
mod student;
mod term;

use std::fmt;

pub use course::{derive_department, CourseRecord, NewCourse};
pub use enrollment::StudentTermLink;
pub use grade::{GradeRecord, NewGrade};
pub use student::{NewStudent, StudentRecord};
pub use term::{parse_semester_number, NewTerm, TermName, TermRecord, TERM_LENGTH_MONTHS};

/// Kinds of records held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Student,
    Term,
    Course,
    Grade,
    StudentTerm,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Student => "student",
            RecordKind::Term => "term",
            RecordKind::Course => "course",
            RecordKind::Grade => "grade",
            RecordKind::StudentTerm => "student_term",
        };
        f.write_str(s)
    }
}
