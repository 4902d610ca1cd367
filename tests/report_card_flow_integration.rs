//! End-to-end report card flow.
//!
//! Form JSON → validation → generation with a file handoff → loading the
//! handed-off card → HTML export, all against temporary directories.

use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

use chrono::NaiveDate;
use report_card::adapters::document::{MarkdownReportRenderer, PulldownExportService};
use report_card::adapters::memory::InMemoryRecordStore;
use report_card::adapters::storage::FileHandoff;
use report_card::application::{
    ExportReportCardCommand, ExportReportCardHandler, GenerateReportCardCommand,
    GenerateReportCardHandler, LoadReportCardHandler, RecordResolver, ReportCardForm,
    SaveGradesHandler, SaveStudentHandler, SubmissionNotice,
};
use report_card::domain::grading::Standing;
use report_card::ports::{ExportFormat, ReportCardHandoff};

// =============================================================================
// Fixtures
// =============================================================================

fn form_json() -> serde_json::Value {
    json!({
        "firstName": "Jane",
        "lastName": "Smith",
        "studentId": "ST12345",
        "year": "2",
        "semester": "Spring",
        "program": "Computer Science",
        "email": "jane.smith@example.edu",
        "grades": [
            { "courseCode": "CS101", "courseName": "Introduction to Programming", "creditHours": 3, "grade": "A" },
            { "courseCode": "CS102", "courseName": "Data Structures", "creditHours": "4", "grade": "B+" },
            { "courseCode": "CS103", "courseName": "Discrete Mathematics", "creditHours": 3, "grade": "A-" },
            { "courseCode": "CS104", "courseName": "Computer Architecture", "creditHours": "3", "grade": "B" },
            { "courseCode": "MATH201", "courseName": "Calculus II", "creditHours": 3, "grade": "A" }
        ],
        "remarks": "",
        "signature": ""
    })
}

fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn generate_handler(handoff: Arc<dyn ReportCardHandoff>) -> GenerateReportCardHandler {
    let store = Arc::new(InMemoryRecordStore::new());
    let resolver = Arc::new(RecordResolver::from_store(store));
    GenerateReportCardHandler::new(
        SaveStudentHandler::new(resolver.clone()),
        SaveGradesHandler::new(resolver),
    )
    .with_handoff(handoff)
}

// =============================================================================
// Flow
// =============================================================================

#[tokio::test]
async fn form_to_html_export() {
    let handoff_dir = TempDir::new().unwrap();
    let export_dir = TempDir::new().unwrap();
    let handoff: Arc<dyn ReportCardHandoff> = Arc::new(FileHandoff::new(handoff_dir.path()));

    // 1. Parse and validate the form, filling the configured signature
    let form: ReportCardForm = serde_json::from_value(form_json()).unwrap();
    let submission = form
        .with_default_signature(Some("Dr. Robert Johnson"))
        .validate()
        .unwrap();

    // 2. Generate
    let result = generate_handler(handoff.clone())
        .handle(GenerateReportCardCommand {
            submission,
            issue_date: Some(issue_date()),
        })
        .await
        .unwrap();
    assert_eq!(result.notices, vec![SubmissionNotice::ReportGenerated]);
    assert!(handoff_dir.path().join("reportCardData.json").exists());

    // 3. Load what the viewer sees
    let card = LoadReportCardHandler::new(handoff.clone())
        .handle()
        .await
        .unwrap()
        .expect("card should be handed off");
    assert_eq!(card.student().full_name(), "Jane Smith");
    assert_eq!(card.total_credits(), 16);
    assert_eq!(card.summary().display_gpa(), "3.58");
    assert_eq!(card.standing(), Standing::DeansList);
    assert_eq!(card.signature(), "Dr. Robert Johnson");
    assert_eq!(card.remarks(), Standing::DeansList.remark());

    // 4. Export
    let exporter = ExportReportCardHandler::new(
        Arc::new(MarkdownReportRenderer::default()),
        Arc::new(PulldownExportService::new()),
        export_dir.path(),
    );
    let exported = exporter
        .handle(ExportReportCardCommand {
            card,
            format: ExportFormat::Html,
        })
        .await
        .expect("HTML export should succeed");

    assert_eq!(exported.document.filename, "Smith_Jane_ReportCard.html");
    assert_eq!(exported.path, export_dir.path().join("Smith_Jane_ReportCard.html"));
    let html = std::fs::read_to_string(&exported.path).unwrap();
    assert!(html.contains("<title>State University Report Card</title>"));
    assert!(html.contains("Jane Smith"));
    assert!(html.contains("3.58"));
    assert!(html.contains("October 19, 2026"));
    assert!(html.contains("Dr. Robert Johnson"));
}

#[tokio::test]
async fn invalid_form_never_reaches_handoff() {
    let handoff_dir = TempDir::new().unwrap();
    let handoff = FileHandoff::new(handoff_dir.path());

    let mut raw = form_json();
    raw["email"] = json!("not-an-email");
    raw["grades"][1]["creditHours"] = json!("4.5");
    let form: ReportCardForm = serde_json::from_value(raw).unwrap();

    let errors = form.validate().unwrap_err();
    assert!(errors.for_field("email").is_some());
    assert!(errors.for_field("grades[1].creditHours").is_some());
    assert!(errors.for_field("signature").is_some());
    assert!(handoff.get().await.unwrap().is_none());
}

#[tokio::test]
async fn discarding_clears_the_handoff_file() {
    let handoff_dir = TempDir::new().unwrap();
    let handoff: Arc<dyn ReportCardHandoff> = Arc::new(FileHandoff::new(handoff_dir.path()));

    let form: ReportCardForm = serde_json::from_value(form_json()).unwrap();
    let submission = form
        .with_default_signature(Some("Dr. Robert Johnson"))
        .validate()
        .unwrap();
    generate_handler(handoff.clone())
        .handle(GenerateReportCardCommand {
            submission,
            issue_date: Some(issue_date()),
        })
        .await
        .unwrap();

    let loader = LoadReportCardHandler::new(handoff);
    assert!(loader.handle().await.unwrap().is_some());
    loader.discard().await.unwrap();
    assert!(loader.handle().await.unwrap().is_none());
    assert!(!handoff_dir.path().join("reportCardData.json").exists());
}

#[tokio::test]
async fn edited_handoff_file_is_recomputed_on_load() {
    let handoff_dir = TempDir::new().unwrap();
    let handoff = Arc::new(FileHandoff::new(handoff_dir.path()));

    let form: ReportCardForm = serde_json::from_value(form_json()).unwrap();
    let submission = form
        .with_default_signature(Some("Dr. Robert Johnson"))
        .validate()
        .unwrap();
    generate_handler(handoff.clone())
        .handle(GenerateReportCardCommand {
            submission,
            issue_date: Some(issue_date()),
        })
        .await
        .unwrap();

    // Overwrite the derived values on disk
    let path = handoff.file_path();
    let mut stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    stored["totalCredits"] = json!(99);
    stored["gpa"] = json!(1.2);
    stored["grades"][0]["points"] = json!(0.0);
    std::fs::write(&path, serde_json::to_string(&stored).unwrap()).unwrap();

    let card = LoadReportCardHandler::new(handoff)
        .handle()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(card.total_credits(), 16);
    assert!((card.gpa() - 3.58125).abs() < 1e-9);
    assert_eq!(card.grades()[0].points(), 4.0);
    assert_eq!(card.remarks(), Standing::DeansList.remark());
}
