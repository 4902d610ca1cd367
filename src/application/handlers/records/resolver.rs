//! RecordResolver - maps validated submissions onto durable records.
//!
//! Every call goes through the repository ports. Terms and courses are
//! resolved with the ports' upsert operations, so resolving the same natural
//! key twice yields the same id.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::application::submission::StudentSubmission;
use crate::domain::foundation::{CourseId, StudentId, TermId, Timestamp};
use crate::domain::grading::CreditHours;
use crate::domain::records::{
    GradeRecord, NewCourse, NewGrade, NewStudent, NewTerm, StudentTermLink, TermName,
};
use crate::ports::{
    CourseRepository, EnrollmentRepository, GradeRepository, PersistenceError,
    StudentRepository, TermRepository,
};

/// Resolves identities and writes records through the repository ports.
pub struct RecordResolver {
    students: Arc<dyn StudentRepository>,
    terms: Arc<dyn TermRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    grades: Arc<dyn GradeRepository>,
    fixed_today: Option<NaiveDate>,
}

impl RecordResolver {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        terms: Arc<dyn TermRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        grades: Arc<dyn GradeRepository>,
    ) -> Self {
        Self {
            students,
            terms,
            courses,
            enrollments,
            grades,
            fixed_today: None,
        }
    }

    /// Resolver backed by a single store implementing every repository.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: StudentRepository
            + TermRepository
            + CourseRepository
            + EnrollmentRepository
            + GradeRepository
            + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        )
    }

    /// Pins "today" for enrollment and term dates.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Timestamp::now().date())
    }

    /// Academic year used for new terms: the current calendar year.
    pub fn academic_year(&self) -> String {
        self.today().year().to_string()
    }

    /// Inserts a new student row. Students are never deduplicated.
    pub async fn resolve_student(
        &self,
        student: &StudentSubmission,
    ) -> Result<StudentId, PersistenceError> {
        let record = self
            .students
            .insert(NewStudent {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                external_student_id: student.external_student_id.clone(),
                program: student.program.clone(),
                email: student.email.clone(),
                enrollment_date: self.today(),
            })
            .await?;
        Ok(record.id)
    }

    /// Finds or creates the term for `semester_label` in `academic_year`.
    ///
    /// A supplied semester number that differs from the stored one is
    /// written back to an existing term. A failed write-back is logged and
    /// does not fail resolution.
    pub async fn resolve_term(
        &self,
        semester_label: &str,
        academic_year: &str,
        semester_number: Option<u8>,
    ) -> Result<TermId, PersistenceError> {
        let term_name = TermName::normalize(semester_label);
        let upserted = self
            .terms
            .upsert(NewTerm::starting(
                term_name,
                academic_year,
                semester_number,
                self.today(),
            ))
            .await?;

        let term = upserted.record;
        if upserted.created {
            tracing::debug!(term_id = %term.id, term = %term_name, academic_year, "Created term");
            return Ok(term.id);
        }

        match semester_number {
            Some(number) if term.needs_semester_update(semester_number) => {
                // The term itself is resolved; a stale number does not block the save.
                match self.terms.update_semester_number(term.id, number).await {
                    Ok(_) => {
                        tracing::debug!(term_id = %term.id, semester_number = number, "Updated term semester number")
                    }
                    Err(error) => {
                        tracing::warn!(term_id = %term.id, semester_number = number, %error, "Term semester number not updated")
                    }
                }
            }
            _ => {}
        }
        Ok(term.id)
    }

    /// Inserts a student-term link. Duplicates are allowed.
    pub async fn link_student_term(
        &self,
        student_id: StudentId,
        term_id: TermId,
    ) -> Result<StudentTermLink, PersistenceError> {
        self.enrollments.insert(student_id, term_id).await
    }

    /// The student's most recently created term link.
    pub async fn latest_link(
        &self,
        student_id: StudentId,
    ) -> Result<Option<StudentTermLink>, PersistenceError> {
        self.enrollments.latest_for_student(student_id).await
    }

    /// Finds or creates the course with `course_code`.
    pub async fn resolve_course(
        &self,
        course_code: &str,
        course_name: &str,
        credit_hours: CreditHours,
    ) -> Result<CourseId, PersistenceError> {
        let upserted = self
            .courses
            .upsert(NewCourse::new(course_code, course_name, credit_hours))
            .await?;
        if upserted.created {
            tracing::debug!(course_code, course_id = %upserted.record.id, "Created course");
        }
        Ok(upserted.record.id)
    }

    /// Inserts a grade; points and percentage come from the grade scale.
    pub async fn record_grade(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        term_id: TermId,
        letter: &str,
    ) -> Result<GradeRecord, PersistenceError> {
        self.grades
            .insert(NewGrade::scored(student_id, course_id, term_id, letter))
            .await
    }
}
