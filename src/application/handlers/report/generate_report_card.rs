//! GenerateReportCardHandler - the submit flow.
//!
//! Persists the student and grades, assembles the report card, writes it to
//! the handoff slot if one is configured, and returns it together with the
//! notices to show the user.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::application::handlers::records::{
    SaveGradesCommand, SaveGradesHandler, SaveGradesOutcome, SaveStudentCommand,
    SaveStudentError, SaveStudentHandler,
};
use crate::application::submission::ReportCardSubmission;
use crate::domain::foundation::{StudentKey, Timestamp};
use crate::domain::grading::ReportCard;
use crate::ports::{HandoffError, ReportCardHandoff};

/// User-facing outcome messages of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionNotice {
    /// The student could not be saved.
    StudentNotSaved,
    /// At least one grade could not be saved.
    GradesPartiallySaved,
    ReportGenerated,
}

impl SubmissionNotice {
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionNotice::StudentNotSaved => "Failed to save student information to database.",
            SubmissionNotice::GradesPartiallySaved => {
                "Some grades may not have been saved correctly."
            }
            SubmissionNotice::ReportGenerated => "Report card generated.",
        }
    }

    /// Whether the notice reports a problem.
    pub fn is_warning(&self) -> bool {
        !matches!(self, SubmissionNotice::ReportGenerated)
    }
}

#[derive(Debug, Clone)]
pub struct GenerateReportCardCommand {
    pub submission: ReportCardSubmission,
    /// Defaults to today.
    pub issue_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct GenerateReportCardResult {
    pub card: ReportCard,
    pub notices: Vec<SubmissionNotice>,
    /// `None` when grade saving was skipped or could not start.
    pub grades: Option<SaveGradesOutcome>,
}

impl GenerateReportCardResult {
    /// True if the student and every grade reached the store.
    pub fn fully_persisted(&self) -> bool {
        self.grades.as_ref().is_some_and(SaveGradesOutcome::all_saved)
    }
}

#[derive(Debug, Error)]
pub enum GenerateReportCardError {
    #[error("Failed to save student information to database: {0}")]
    StudentNotSaved(#[source] SaveStudentError),

    #[error("Failed to hand off report card: {0}")]
    Handoff(#[from] HandoffError),
}

/// Handler for the submit flow.
pub struct GenerateReportCardHandler {
    save_student: SaveStudentHandler,
    save_grades: SaveGradesHandler,
    handoff: Option<Arc<dyn ReportCardHandoff>>,
    offline_fallback: bool,
}

impl GenerateReportCardHandler {
    pub fn new(save_student: SaveStudentHandler, save_grades: SaveGradesHandler) -> Self {
        Self {
            save_student,
            save_grades,
            handoff: None,
            offline_fallback: false,
        }
    }

    /// Also write each generated card to `handoff`.
    pub fn with_handoff(mut self, handoff: Arc<dyn ReportCardHandoff>) -> Self {
        self.handoff = Some(handoff);
        self
    }

    /// Produce a card under a placeholder id when the student cannot be saved.
    pub fn with_offline_fallback(mut self, enabled: bool) -> Self {
        self.offline_fallback = enabled;
        self
    }

    pub async fn handle(
        &self,
        cmd: GenerateReportCardCommand,
    ) -> Result<GenerateReportCardResult, GenerateReportCardError> {
        let submission = cmd.submission;
        let mut notices = Vec::new();
        let mut grades = None;

        // 1. Save the student; failure is fatal unless falling back
        let student_key = match self
            .save_student
            .handle(SaveStudentCommand {
                student: submission.student.clone(),
            })
            .await
        {
            Ok(saved) => {
                // 2. Save grades under the new term link
                match self
                    .save_grades
                    .handle(SaveGradesCommand {
                        student_id: saved.student_id,
                        grades: submission.grades.clone(),
                    })
                    .await
                {
                    Ok(outcome) => {
                        if !outcome.all_saved() {
                            notices.push(SubmissionNotice::GradesPartiallySaved);
                        }
                        grades = Some(outcome);
                    }
                    Err(error) => {
                        tracing::warn!(student_id = %saved.student_id, %error, "Grades not saved");
                        notices.push(SubmissionNotice::GradesPartiallySaved);
                    }
                }
                StudentKey::Durable(saved.student_id)
            }
            Err(error) if self.offline_fallback => {
                tracing::warn!(%error, "Student not saved, using placeholder id");
                notices.push(SubmissionNotice::StudentNotSaved);
                StudentKey::placeholder(Timestamp::now().as_unix_millis())
            }
            Err(error) => {
                tracing::error!(%error, "Student not saved");
                return Err(GenerateReportCardError::StudentNotSaved(error));
            }
        };

        // 3. Assemble
        let issue_date = cmd.issue_date.unwrap_or_else(|| Timestamp::now().date());
        let card = ReportCard::assemble(
            submission.student.identity(student_key),
            submission.graded_courses(),
            issue_date,
            submission.signature,
            submission.remarks,
        );

        // 4. Hand off
        if let Some(handoff) = &self.handoff {
            handoff.set(&card).await?;
        }

        tracing::info!(
            student = %card.student().id,
            total_credits = card.total_credits(),
            gpa = %card.summary().display_gpa(),
            "Report card generated"
        );
        notices.push(SubmissionNotice::ReportGenerated);

        Ok(GenerateReportCardResult {
            card,
            notices,
            grades,
        })
    }
}
