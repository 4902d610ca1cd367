//! In-Memory Record Store
//!
//! Holds students, terms, courses, student-term links and grades in memory.
//! Implements every record repository port, so one store can back a whole
//! submission. Useful for tests, development and the CLI.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CourseId, StudentId, TermId, Timestamp};
use crate::domain::records::{
    CourseRecord, GradeRecord, NewCourse, NewGrade, NewStudent, NewTerm, RecordKind,
    StudentRecord, StudentTermLink, TermName, TermRecord,
};
use crate::ports::{
    CourseRepository, EnrollmentRepository, GradeRepository, PersistenceError,
    StudentRepository, TermRepository, Upserted,
};

/// In-memory storage for all record kinds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    students: Arc<RwLock<HashMap<StudentId, StudentRecord>>>,
    terms: Arc<RwLock<Vec<TermRecord>>>,
    courses: Arc<RwLock<HashMap<String, CourseRecord>>>,
    links: Arc<RwLock<Vec<StudentTermLink>>>,
    grades: Arc<RwLock<Vec<GradeRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn student_count(&self) -> usize {
        self.students.read().await.len()
    }

    pub async fn term_count(&self) -> usize {
        self.terms.read().await.len()
    }

    pub async fn course_count(&self) -> usize {
        self.courses.read().await.len()
    }

    pub async fn link_count(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn grade_count(&self) -> usize {
        self.grades.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.students.write().await.clear();
        self.terms.write().await.clear();
        self.courses.write().await.clear();
        self.links.write().await.clear();
        self.grades.write().await.clear();
    }
}

#[async_trait]
impl StudentRepository for InMemoryRecordStore {
    async fn insert(&self, student: NewStudent) -> Result<StudentRecord, PersistenceError> {
        let record = StudentRecord::create(student);
        self.students.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<StudentRecord>, PersistenceError> {
        Ok(self.students.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl TermRepository for InMemoryRecordStore {
    async fn find_by_name_and_year(
        &self,
        term_name: TermName,
        academic_year: &str,
    ) -> Result<Option<TermRecord>, PersistenceError> {
        let terms = self.terms.read().await;
        Ok(terms
            .iter()
            .find(|t| t.matches(term_name, academic_year))
            .cloned())
    }

    async fn upsert(&self, term: NewTerm) -> Result<Upserted<TermRecord>, PersistenceError> {
        let mut terms = self.terms.write().await;
        if let Some(existing) = terms
            .iter()
            .find(|t| t.matches(term.term_name, &term.academic_year))
        {
            return Ok(Upserted::existing(existing.clone()));
        }
        let record = TermRecord::create(term);
        terms.push(record.clone());
        Ok(Upserted::created(record))
    }

    async fn update_semester_number(
        &self,
        id: TermId,
        semester_number: u8,
    ) -> Result<TermRecord, PersistenceError> {
        let mut terms = self.terms.write().await;
        let term = terms
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PersistenceError::not_found(RecordKind::Term, id))?;
        term.semester_number = Some(semester_number);
        term.updated_at = Timestamp::now();
        Ok(term.clone())
    }
}

#[async_trait]
impl CourseRepository for InMemoryRecordStore {
    async fn find_by_code(
        &self,
        course_code: &str,
    ) -> Result<Option<CourseRecord>, PersistenceError> {
        Ok(self.courses.read().await.get(course_code).cloned())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<CourseRecord>, PersistenceError> {
        let courses = self.courses.read().await;
        Ok(courses.values().find(|c| c.id == id).cloned())
    }

    async fn upsert(&self, course: NewCourse) -> Result<Upserted<CourseRecord>, PersistenceError> {
        let mut courses = self.courses.write().await;
        if let Some(existing) = courses.get(&course.course_code) {
            return Ok(Upserted::existing(existing.clone()));
        }
        let record = CourseRecord::create(course);
        courses.insert(record.course_code.clone(), record.clone());
        Ok(Upserted::created(record))
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryRecordStore {
    async fn insert(
        &self,
        student_id: StudentId,
        term_id: TermId,
    ) -> Result<StudentTermLink, PersistenceError> {
        let link = StudentTermLink::create(student_id, term_id);
        self.links.write().await.push(link.clone());
        Ok(link)
    }

    async fn latest_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Option<StudentTermLink>, PersistenceError> {
        let links = self.links.read().await;
        // Later pushes win ties on created_at.
        Ok(links
            .iter()
            .filter(|l| l.student_id == student_id)
            .max_by_key(|l| l.created_at)
            .cloned())
    }
}

#[async_trait]
impl GradeRepository for InMemoryRecordStore {
    async fn insert(&self, grade: NewGrade) -> Result<GradeRecord, PersistenceError> {
        let record = GradeRecord::create(grade);
        self.grades.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<GradeRecord>, PersistenceError> {
        let grades = self.grades.read().await;
        Ok(grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect())
    }
}
