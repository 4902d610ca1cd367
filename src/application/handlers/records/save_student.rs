//! SaveStudentHandler - persists a student and enrolls them in a term.

use std::sync::Arc;

use thiserror::Error;

use super::resolver::RecordResolver;
use crate::application::submission::StudentSubmission;
use crate::domain::foundation::{StudentId, TermId};
use crate::domain::records::{parse_semester_number, StudentTermLink};
use crate::ports::PersistenceError;

/// Command to save a student.
#[derive(Debug, Clone)]
pub struct SaveStudentCommand {
    pub student: StudentSubmission,
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SaveStudentResult {
    pub student_id: StudentId,
    pub term_id: TermId,
    pub link: StudentTermLink,
}

/// Any failure here means the student has no usable durable id.
#[derive(Debug, Clone, Error)]
pub enum SaveStudentError {
    #[error("Failed to insert student: {0}")]
    Student(PersistenceError),

    #[error("Failed to resolve term: {0}")]
    Term(PersistenceError),

    #[error("Failed to link student to term: {0}")]
    Link(PersistenceError),
}

/// Handler for saving students.
pub struct SaveStudentHandler {
    resolver: Arc<RecordResolver>,
}

impl SaveStudentHandler {
    pub fn new(resolver: Arc<RecordResolver>) -> Self {
        Self { resolver }
    }

    pub async fn handle(&self, cmd: SaveStudentCommand) -> Result<SaveStudentResult, SaveStudentError> {
        let student = &cmd.student;

        // 1. Insert student row
        let student_id = self
            .resolver
            .resolve_student(student)
            .await
            .map_err(SaveStudentError::Student)?;

        // 2. Resolve the term for the entered semester
        let academic_year = self.resolver.academic_year();
        let term_id = self
            .resolver
            .resolve_term(
                &student.semester,
                &academic_year,
                parse_semester_number(&student.semester),
            )
            .await
            .map_err(SaveStudentError::Term)?;

        // 3. Link them
        let link = self
            .resolver
            .link_student_term(student_id, term_id)
            .await
            .map_err(SaveStudentError::Link)?;

        tracing::info!(
            %student_id,
            %term_id,
            external_student_id = %student.external_student_id,
            "Student saved"
        );

        Ok(SaveStudentResult {
            student_id,
            term_id,
            link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRecordStore;
    use crate::domain::records::{
        NewStudent, NewTerm, RecordKind, StudentRecord, StudentTermLink, TermName, TermRecord,
    };
    use crate::ports::{EnrollmentRepository, StudentRepository, TermRepository, Upserted};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn submission(semester: &str) -> StudentSubmission {
        StudentSubmission {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            external_student_id: "ST12345".to_string(),
            year: "2".to_string(),
            semester: semester.to_string(),
            program: "Computer Science".to_string(),
            email: "jane@example.edu".to_string(),
            portrait_url: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[tokio::test]
    async fn saves_student_term_and_link() {
        let store = Arc::new(InMemoryRecordStore::new());
        let resolver = Arc::new(RecordResolver::from_store(store.clone()).with_today(today()));
        let handler = SaveStudentHandler::new(resolver);

        let result = handler
            .handle(SaveStudentCommand {
                student: submission("Spring"),
            })
            .await
            .unwrap();

        assert_eq!(result.link.student_id, result.student_id);
        assert_eq!(result.link.term_id, result.term_id);
        let term = store
            .find_by_name_and_year(TermName::Spring, "2025")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(term.id, result.term_id);
        assert_eq!(term.semester_number, None);
    }

    #[tokio::test]
    async fn numeric_semester_maps_to_fall_with_number() {
        let store = Arc::new(InMemoryRecordStore::new());
        let resolver = Arc::new(RecordResolver::from_store(store.clone()).with_today(today()));
        let handler = SaveStudentHandler::new(resolver);

        handler
            .handle(SaveStudentCommand {
                student: submission("2"),
            })
            .await
            .unwrap();

        let term = store
            .find_by_name_and_year(TermName::Fall, "2025")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(term.semester_number, Some(2));
    }

    struct FailingStudentRepository;

    #[async_trait]
    impl StudentRepository for FailingStudentRepository {
        async fn insert(&self, _student: NewStudent) -> Result<StudentRecord, PersistenceError> {
            Err(PersistenceError::store_failed(RecordKind::Student, "Simulated insert failure"))
        }

        async fn find_by_id(&self, _id: StudentId) -> Result<Option<StudentRecord>, PersistenceError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn student_failure_is_definitive() {
        let store = Arc::new(InMemoryRecordStore::new());
        let resolver = RecordResolver::new(
            Arc::new(FailingStudentRepository),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        )
        .with_today(today());
        let handler = SaveStudentHandler::new(Arc::new(resolver));

        let err = handler
            .handle(SaveStudentCommand {
                student: submission("Fall"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SaveStudentError::Student(_)));
        assert!(err.to_string().contains("Simulated insert failure"));
        assert_eq!(store.term_count().await, 0);
        assert_eq!(store.link_count().await, 0);
    }

    /// Term store that can refuse upserts and always refuses number updates.
    struct BrokenTerms {
        inner: Arc<InMemoryRecordStore>,
        fail_upsert: bool,
    }

    #[async_trait]
    impl TermRepository for BrokenTerms {
        async fn find_by_name_and_year(
            &self,
            term_name: TermName,
            academic_year: &str,
        ) -> Result<Option<TermRecord>, PersistenceError> {
            self.inner.find_by_name_and_year(term_name, academic_year).await
        }

        async fn upsert(&self, term: NewTerm) -> Result<Upserted<TermRecord>, PersistenceError> {
            if self.fail_upsert {
                return Err(PersistenceError::store_failed(RecordKind::Term, "Simulated upsert failure"));
            }
            TermRepository::upsert(self.inner.as_ref(), term).await
        }

        async fn update_semester_number(
            &self,
            _id: TermId,
            _semester_number: u8,
        ) -> Result<TermRecord, PersistenceError> {
            Err(PersistenceError::store_failed(RecordKind::Term, "Simulated update failure"))
        }
    }

    struct FailingEnrollments;

    #[async_trait]
    impl EnrollmentRepository for FailingEnrollments {
        async fn insert(
            &self,
            _student_id: StudentId,
            _term_id: TermId,
        ) -> Result<StudentTermLink, PersistenceError> {
            Err(PersistenceError::store_failed(RecordKind::StudentTerm, "Simulated link failure"))
        }

        async fn latest_for_student(
            &self,
            _student_id: StudentId,
        ) -> Result<Option<StudentTermLink>, PersistenceError> {
            Ok(None)
        }
    }

    fn resolver_with_terms(store: &Arc<InMemoryRecordStore>, fail_upsert: bool) -> RecordResolver {
        RecordResolver::new(
            store.clone(),
            Arc::new(BrokenTerms {
                inner: store.clone(),
                fail_upsert,
            }),
            store.clone(),
            store.clone(),
            store.clone(),
        )
        .with_today(today())
    }

    #[tokio::test]
    async fn term_failure_is_reported_as_term_error() {
        let store = Arc::new(InMemoryRecordStore::new());
        let handler = SaveStudentHandler::new(Arc::new(resolver_with_terms(&store, true)));

        let err = handler
            .handle(SaveStudentCommand {
                student: submission("Spring"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SaveStudentError::Term(_)));
        assert_eq!(store.link_count().await, 0);
    }

    #[tokio::test]
    async fn link_failure_is_reported_as_link_error() {
        let store = Arc::new(InMemoryRecordStore::new());
        let resolver = RecordResolver::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(FailingEnrollments),
            store.clone(),
        )
        .with_today(today());
        let handler = SaveStudentHandler::new(Arc::new(resolver));

        let err = handler
            .handle(SaveStudentCommand {
                student: submission("Spring"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SaveStudentError::Link(_)));
        assert!(err.to_string().contains("Simulated link failure"));
        assert_eq!(store.term_count().await, 1);
    }

    #[tokio::test]
    async fn failed_semester_number_update_still_saves() {
        let store = Arc::new(InMemoryRecordStore::new());
        let handler = SaveStudentHandler::new(Arc::new(resolver_with_terms(&store, false)));

        // First save creates Fall without a number, second one tries to set it
        handler
            .handle(SaveStudentCommand {
                student: submission("Fall"),
            })
            .await
            .unwrap();
        let result = handler
            .handle(SaveStudentCommand {
                student: submission("2"),
            })
            .await
            .unwrap();

        let term = store
            .find_by_name_and_year(TermName::Fall, "2025")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.term_id, term.id);
        assert_eq!(term.semester_number, None);
        assert_eq!(store.link_count().await, 2);
    }
}
