//! ExportReportCardHandler - renders a card and writes it out.
//!
//! Export never fails the caller: problems are logged and reported as
//! `None`, since the card itself already exists.

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::fs;

use crate::domain::grading::ReportCard;
use crate::ports::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument, RenderError,
    ReportRenderer,
};

#[derive(Debug, Clone)]
pub struct ExportReportCardCommand {
    pub card: ReportCard,
    pub format: ExportFormat,
}

/// A document written to disk.
#[derive(Debug, Clone)]
pub struct ExportedReportCard {
    pub document: ExportedDocument,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ExportReportCardError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub struct ExportReportCardHandler {
    renderer: Arc<dyn ReportRenderer>,
    exporter: Arc<dyn DocumentExportService>,
    output_dir: PathBuf,
}

impl ExportReportCardHandler {
    pub fn new(
        renderer: Arc<dyn ReportRenderer>,
        exporter: Arc<dyn DocumentExportService>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            renderer,
            exporter,
            output_dir: output_dir.into(),
        }
    }

    /// Converts the card and writes `<output_dir>/<Last>_<First>_ReportCard.<ext>`.
    ///
    /// Returns `None` if rendering, conversion or writing fails.
    pub async fn handle(&self, cmd: ExportReportCardCommand) -> Option<ExportedReportCard> {
        match self.export(&cmd.card, cmd.format).await {
            Ok(exported) => {
                tracing::info!(
                    path = %exported.path.display(),
                    format = %exported.document.format,
                    "Report card exported"
                );
                Some(exported)
            }
            Err(error) => {
                tracing::error!(
                    student = %cmd.card.student().id,
                    format = %cmd.format,
                    %error,
                    "Report card export failed"
                );
                None
            }
        }
    }

    /// Converts the card without writing it.
    pub async fn convert(
        &self,
        card: &ReportCard,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportReportCardError> {
        let markdown = self.renderer.render(card)?;
        let content = match format {
            ExportFormat::Markdown => markdown.into_bytes(),
            ExportFormat::Html => self.exporter.to_html(&markdown).await?.into_bytes(),
            ExportFormat::Pdf => self.exporter.to_pdf(&markdown).await?,
        };
        Ok(ExportedDocument::for_report_card(content, format, card))
    }

    /// Writes the rendered markdown to `out`.
    pub fn print<W: Write>(&self, card: &ReportCard, out: &mut W) -> Result<(), ExportReportCardError> {
        let markdown = self.renderer.render(card)?;
        out.write_all(markdown.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ExportError::io_error(e.to_string()))?;
        Ok(())
    }

    async fn export(
        &self,
        card: &ReportCard,
        format: ExportFormat,
    ) -> Result<ExportedReportCard, ExportReportCardError> {
        let document = self.convert(card, format).await?;
        let path = self.target_path(&document.filename)?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| ExportError::io_error(e.to_string()))?;
        fs::write(&path, &document.content)
            .await
            .map_err(|e| ExportError::io_error(e.to_string()))?;

        Ok(ExportedReportCard { document, path })
    }

    /// `output_dir/filename`, provided `filename` is one plain component.
    fn target_path(&self, filename: &str) -> Result<PathBuf, ExportError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.output_dir.join(name)),
            _ => Err(ExportError::io_error(format!(
                "export file name {:?} leaves the output directory",
                filename
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::{MarkdownReportRenderer, PulldownExportService};
    use crate::domain::foundation::{CourseIdentity, StudentKey};
    use crate::domain::grading::{CreditHours, GradedCourse, RemarksMode, StudentIdentity};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn card() -> ReportCard {
        ReportCard::assemble(
            StudentIdentity {
                id: StudentKey::placeholder(11),
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
                external_student_id: "ST12345".to_string(),
                year: "2".to_string(),
                semester: "Spring".to_string(),
                program: "Computer Science".to_string(),
                portrait_url: None,
            },
            vec![GradedCourse::new(
                CourseIdentity::local_for_index(0),
                "CS101",
                "Introduction to Programming",
                CreditHours::try_new(3).unwrap(),
                "B",
            )],
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            "Dr. Robert Johnson",
            RemarksMode::Derived,
        )
    }

    fn handler(output_dir: &std::path::Path) -> ExportReportCardHandler {
        ExportReportCardHandler::new(
            Arc::new(MarkdownReportRenderer::default()),
            Arc::new(PulldownExportService::new()),
            output_dir,
        )
    }

    /// Exporter whose conversions always fail.
    struct BrokenExporter;

    #[async_trait]
    impl DocumentExportService for BrokenExporter {
        async fn to_pdf(&self, _markdown: &str) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Timeout(1))
        }

        async fn to_html(&self, _markdown: &str) -> Result<String, ExportError> {
            Err(ExportError::html_failed("Simulated failure"))
        }

        async fn is_available(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn writes_html_named_after_student() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("exports");

        let exported = handler(&out)
            .handle(ExportReportCardCommand {
                card: card(),
                format: ExportFormat::Html,
            })
            .await
            .unwrap();

        assert_eq!(exported.path, out.join("Smith_Jane_ReportCard.html"));
        let html = std::fs::read_to_string(&exported.path).unwrap();
        assert!(html.contains("<td>CS101</td>"));
        assert!(html.contains("Good academic standing"));
    }

    #[tokio::test]
    async fn markdown_export_is_the_rendered_text() {
        let dir = TempDir::new().unwrap();
        let exported = handler(dir.path())
            .handle(ExportReportCardCommand {
                card: card(),
                format: ExportFormat::Markdown,
            })
            .await
            .unwrap();

        assert_eq!(exported.document.filename, "Smith_Jane_ReportCard.md");
        let expected = MarkdownReportRenderer::default().render(&card()).unwrap();
        assert_eq!(exported.document.content, expected.into_bytes());
    }

    #[tokio::test]
    async fn export_failure_yields_none_and_no_file() {
        let dir = TempDir::new().unwrap();
        let handler = ExportReportCardHandler::new(
            Arc::new(MarkdownReportRenderer::default()),
            Arc::new(BrokenExporter),
            dir.path(),
        );

        for format in [ExportFormat::Html, ExportFormat::Pdf] {
            let result = handler
                .handle(ExportReportCardCommand {
                    card: card(),
                    format,
                })
                .await;
            assert!(result.is_none());
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn path_like_names_stay_in_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("exports");
        let base = card();
        let card = ReportCard::assemble(
            StudentIdentity {
                last_name: "../escaped".to_string(),
                ..base.student().clone()
            },
            base.grades().to_vec(),
            base.issue_date(),
            base.signature(),
            RemarksMode::Derived,
        );

        let exported = handler(&out)
            .handle(ExportReportCardCommand {
                card,
                format: ExportFormat::Markdown,
            })
            .await
            .unwrap();

        assert_eq!(exported.path.parent(), Some(out.as_path()));
        assert_eq!(exported.path, out.join("___escaped_Jane_ReportCard.md"));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn target_path_rejects_anything_but_a_plain_name() {
        let dir = TempDir::new().unwrap();
        let handler = handler(dir.path());

        assert_eq!(
            handler.target_path("Smith_Jane_ReportCard.pdf").unwrap(),
            dir.path().join("Smith_Jane_ReportCard.pdf")
        );
        for bad in ["../out.md", "nested/out.md", "/tmp/out.md", "..", ""] {
            assert!(handler.target_path(bad).is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn print_writes_markdown() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        handler(dir.path()).print(&card(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# State University"));
        assert!(text.contains("| CS101 | Introduction to Programming | 3 | B | 3.0 |"));
    }
}
