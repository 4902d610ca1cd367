//! Integration tests for record resolution.
//!
//! These tests drive the save handlers against the in-memory store and check
//! what ends up in it:
//! 1. Terms and courses resolve to the same id on repeat submissions
//! 2. A failing course write skips only that grade
//! 3. Stored grades aggregate to the same GPA as the generated card

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use report_card::adapters::memory::InMemoryRecordStore;
use report_card::application::handlers::{
    SaveGradesCommand, SaveStudentCommand, SaveStudentHandler,
};
use report_card::application::{
    GenerateReportCardCommand, GenerateReportCardHandler, GradeSubmission, RecordResolver,
    ReportCardSubmission, SaveGradesHandler, StudentSubmission, SubmissionNotice,
};
use report_card::domain::foundation::{CourseId, StudentKey};
use report_card::domain::grading::{CreditHours, RemarksMode};
use report_card::domain::records::{CourseRecord, NewCourse, RecordKind, TermName};
use report_card::ports::{
    CourseRepository, GradeRepository, PersistenceError, TermRepository, Upserted,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()
}

fn resolver(store: &Arc<InMemoryRecordStore>) -> Arc<RecordResolver> {
    Arc::new(RecordResolver::from_store(store.clone()).with_today(today()))
}

fn student(first_name: &str, semester: &str) -> StudentSubmission {
    StudentSubmission {
        first_name: first_name.to_string(),
        last_name: "Smith".to_string(),
        external_student_id: format!("ST-{}", first_name),
        year: "2".to_string(),
        semester: semester.to_string(),
        program: "Computer Science".to_string(),
        email: format!("{}@example.edu", first_name.to_lowercase()),
        portrait_url: None,
    }
}

fn grade(code: &str, name: &str, credits: u8, letter: &str) -> GradeSubmission {
    GradeSubmission {
        course_code: code.to_string(),
        course_name: name.to_string(),
        credit_hours: CreditHours::try_new(credits).unwrap(),
        grade: letter.to_string(),
    }
}

fn sixteen_credit_grades() -> Vec<GradeSubmission> {
    vec![
        grade("CS101", "Introduction to Programming", 3, "A"),
        grade("CS102", "Data Structures", 4, "B+"),
        grade("CS103", "Discrete Mathematics", 3, "A-"),
        grade("CS104", "Computer Architecture", 3, "B"),
        grade("MATH201", "Calculus II", 3, "A"),
    ]
}

/// Course catalog that refuses to create one course code.
struct FlakyCatalog {
    inner: Arc<InMemoryRecordStore>,
    refused_code: &'static str,
}

#[async_trait]
impl CourseRepository for FlakyCatalog {
    async fn find_by_code(&self, code: &str) -> Result<Option<CourseRecord>, PersistenceError> {
        self.inner.find_by_code(code).await
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<CourseRecord>, PersistenceError> {
        CourseRepository::find_by_id(self.inner.as_ref(), id).await
    }

    async fn upsert(&self, course: NewCourse) -> Result<Upserted<CourseRecord>, PersistenceError> {
        if course.course_code == self.refused_code {
            return Err(PersistenceError::store_failed(
                RecordKind::Course,
                "connection reset",
            ));
        }
        CourseRepository::upsert(self.inner.as_ref(), course).await
    }
}

// =============================================================================
// Idempotent Resolution
// =============================================================================

#[tokio::test]
async fn repeat_submissions_share_term_and_courses() {
    let store = Arc::new(InMemoryRecordStore::new());
    let resolver = resolver(&store);
    let save_student = SaveStudentHandler::new(resolver.clone());
    let save_grades = SaveGradesHandler::new(resolver);

    let mut term_ids = Vec::new();
    for name in ["Jane", "John"] {
        let saved = save_student
            .handle(SaveStudentCommand {
                student: student(name, "Spring"),
            })
            .await
            .unwrap();
        term_ids.push(saved.term_id);

        let outcome = save_grades
            .handle(SaveGradesCommand {
                student_id: saved.student_id,
                grades: vec![grade("CS101", "Introduction to Programming", 3, "A")],
            })
            .await
            .unwrap();
        assert!(outcome.all_saved());
    }

    assert_eq!(term_ids[0], term_ids[1]);
    assert_eq!(store.student_count().await, 2);
    assert_eq!(store.term_count().await, 1);
    assert_eq!(store.link_count().await, 2);
    assert_eq!(store.course_count().await, 1);
    assert_eq!(store.grade_count().await, 2);

    let term = store
        .find_by_name_and_year(TermName::Spring, "2024")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(term.id, term_ids[0]);
    assert_eq!(term.start_date, today());
}

#[tokio::test]
async fn numeric_semester_fills_term_number() {
    let store = Arc::new(InMemoryRecordStore::new());
    let save_student = SaveStudentHandler::new(resolver(&store));

    save_student
        .handle(SaveStudentCommand {
            student: student("Jane", "Fall"),
        })
        .await
        .unwrap();
    save_student
        .handle(SaveStudentCommand {
            student: student("John", "1"),
        })
        .await
        .unwrap();

    let fall = store
        .find_by_name_and_year(TermName::Fall, "2024")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(store.term_count().await, 1);
    assert_eq!(fall.semester_number, Some(1));
}

#[tokio::test]
async fn only_exact_term_names_are_recognised() {
    let store = Arc::new(InMemoryRecordStore::new());
    let save_student = SaveStudentHandler::new(resolver(&store));

    for label in ["Fall", "spring", " Summer"] {
        save_student
            .handle(SaveStudentCommand {
                student: student("Jane", label),
            })
            .await
            .unwrap();
    }

    assert_eq!(store.term_count().await, 1);
    assert!(store
        .find_by_name_and_year(TermName::Spring, "2024")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_by_name_and_year(TermName::Fall, "2024")
        .await
        .unwrap()
        .is_some());
}

// =============================================================================
// Partial Failure
// =============================================================================

#[tokio::test]
async fn failed_course_skips_only_its_grade() {
    let store = Arc::new(InMemoryRecordStore::new());
    let catalog = Arc::new(FlakyCatalog {
        inner: store.clone(),
        refused_code: "CS102",
    });
    let resolver = Arc::new(
        RecordResolver::new(
            store.clone(),
            store.clone(),
            catalog,
            store.clone(),
            store.clone(),
        )
        .with_today(today()),
    );
    let generate = GenerateReportCardHandler::new(
        SaveStudentHandler::new(resolver.clone()),
        SaveGradesHandler::new(resolver),
    );

    let submission = ReportCardSubmission {
        student: student("Jane", "Spring"),
        grades: vec![
            grade("CS101", "Introduction to Programming", 3, "A"),
            grade("CS102", "Data Structures", 4, "B+"),
            grade("CS103", "Discrete Mathematics", 3, "A-"),
        ],
        remarks: RemarksMode::Derived,
        signature: "Dr. Robert Johnson".to_string(),
    };

    let result = generate
        .handle(GenerateReportCardCommand {
            submission,
            issue_date: Some(today()),
        })
        .await
        .unwrap();

    // The card still shows every submitted course
    assert_eq!(result.card.grades().len(), 3);
    assert_eq!(result.card.total_credits(), 10);
    assert!(matches!(result.card.student().id, StudentKey::Durable(_)));
    assert!(result.notices.contains(&SubmissionNotice::GradesPartiallySaved));
    assert!(result.notices.contains(&SubmissionNotice::ReportGenerated));
    assert!(!result.fully_persisted());

    let outcome = result.grades.unwrap();
    assert!(!outcome.all_saved());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].course_code, "CS102");
    assert_eq!(store.grade_count().await, 2);
    assert_eq!(store.course_count().await, 2);
}

// =============================================================================
// Stored And Displayed GPA
// =============================================================================

#[tokio::test]
async fn stored_grades_match_card_gpa() {
    let store = Arc::new(InMemoryRecordStore::new());
    let resolver = resolver(&store);
    let generate = GenerateReportCardHandler::new(
        SaveStudentHandler::new(resolver.clone()),
        SaveGradesHandler::new(resolver),
    );

    let result = generate
        .handle(GenerateReportCardCommand {
            submission: ReportCardSubmission {
                student: student("Jane", "Spring"),
                grades: sixteen_credit_grades(),
                remarks: RemarksMode::Derived,
                signature: "Dr. Robert Johnson".to_string(),
            },
            issue_date: Some(today()),
        })
        .await
        .unwrap();

    assert!(result.fully_persisted());
    assert_eq!(result.card.total_credits(), 16);
    assert!((result.card.gpa() - 3.58125).abs() < 1e-9);
    assert_eq!(result.card.summary().display_gpa(), "3.58");

    let outcome = result.grades.unwrap();
    assert_eq!(outcome.summary().total_credits, 16);
    assert!((outcome.summary().gpa - result.card.gpa()).abs() < 1e-9);

    let StudentKey::Durable(student_id) = result.card.student().id else {
        panic!("expected a durable student id");
    };
    let stored = GradeRepository::find_by_student(store.as_ref(), student_id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 5);
    let letters: Vec<&str> = stored.iter().map(|g| g.grade_letter.as_str()).collect();
    assert_eq!(letters, vec!["A", "B+", "A-", "B", "A"]);
    assert!(stored.iter().all(|g| g.term_id == stored[0].term_id));
}
