//! Pulldown-cmark based export service adapter.
//!
//! - HTML conversion using pulldown-cmark (pure Rust, no external dependencies)
//! - PDF conversion using Pandoc (requires external Pandoc installation)
//!
//! Implements the `DocumentExportService` port for rendered report cards.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::ports::{DocumentExportService, ExportError};

/// Default PDF conversion timeout in seconds.
pub const DEFAULT_PDF_TIMEOUT_SECS: u64 = 30;

/// Export service using pulldown-cmark for HTML and Pandoc for PDF.
///
/// If Pandoc is not available, PDF conversion returns `ServiceUnavailable`.
///
/// # Example
///
/// ```rust,ignore
/// let service = PulldownExportService::new().with_pdf_timeout(60);
///
/// let html = service.to_html(&markdown).await?;
/// let pdf = service.to_pdf(&markdown).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PulldownExportService {
    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,

    pdf_timeout_secs: u64,

    include_default_css: bool,
}

impl Default for PulldownExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl PulldownExportService {
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: DEFAULT_PDF_TIMEOUT_SECS,
            include_default_css: true,
        }
    }

    /// Set a custom path to the Pandoc executable.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    /// Set the timeout for PDF conversion.
    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    /// Disable default CSS styling for HTML output.
    pub fn without_default_css(mut self) -> Self {
        self.include_default_css = false;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    /// Wrap HTML content in a complete document with styling.
    fn wrap_html(&self, body: String, title: &str) -> String {
        let css = if self.include_default_css {
            DEFAULT_CSS
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="report-card" data-watermark="OFFICIAL">
{body}
    </article>
</body>
</html>"#,
            title = html_escape(title),
            css = css,
            body = body
        )
    }

    /// Title for the HTML document: the first h1 heading.
    fn extract_title(&self, markdown: &str) -> String {
        markdown
            .lines()
            .find_map(|line| line.trim().strip_prefix("# "))
            .map(|title| format!("{} Report Card", title.trim()))
            .unwrap_or_else(|| "Report Card".to_string())
    }

    async fn check_pandoc(&self) -> bool {
        let output = Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        output.map(|o| o.status.success()).unwrap_or(false)
    }
}

#[async_trait]
impl DocumentExportService for PulldownExportService {
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        if !self.check_pandoc().await {
            return Err(ExportError::service_unavailable(
                "Pandoc is not installed. PDF export requires Pandoc. \
                 Install from https://pandoc.org/installing.html",
            ));
        }

        let mut child = Command::new(self.pandoc_command())
            .args([
                "-f",
                "markdown",
                "-t",
                "pdf",
                "--pdf-engine=xelatex",
                "-V",
                "geometry:margin=0.75in",
                "-V",
                "fontsize=11pt",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::pdf_failed(format!("Failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| ExportError::pdf_failed(format!("Failed to write to Pandoc: {}", e)))?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| ExportError::pdf_failed(format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::pdf_failed(format!(
                "Pandoc returned error: {}",
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }

    async fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        let options = Options::ENABLE_TABLES | Options::ENABLE_SMART_PUNCTUATION;
        let parser = Parser::new_ext(markdown, options);

        let mut html_body = String::new();
        html::push_html(&mut html_body, parser);

        let title = self.extract_title(markdown);
        Ok(self.wrap_html(html_body, &title))
    }

    async fn is_available(&self) -> bool {
        self.check_pandoc().await
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Default CSS for styled HTML output.
const DEFAULT_CSS: &str = r#"
:root {
    --primary-color: #1e3a8a;
    --text-color: #1f2937;
    --muted-color: #6b7280;
    --border-color: #d1d5db;
    --bg-color: #ffffff;
    --header-bg: #eff6ff;
}

* {
    box-sizing: border-box;
}

body {
    font-family: Georgia, 'Times New Roman', serif;
    font-size: 15px;
    line-height: 1.5;
    color: var(--text-color);
    background-color: var(--bg-color);
    padding: 2rem;
    max-width: 900px;
    margin: 0 auto;
}

.report-card {
    position: relative;
    padding: 2rem;
    border: 2px solid var(--primary-color);
}

.report-card > h1,
.report-card > h2:first-of-type,
.report-card > h3:first-of-type {
    text-align: center;
    margin: 0.25em 0;
}

h1 {
    font-size: 2rem;
    color: var(--primary-color);
}

h2 {
    font-size: 1.35rem;
    border-bottom: 1px solid var(--border-color);
    padding-bottom: 0.25rem;
    margin-top: 1.5em;
}

h3 {
    font-size: 1.1rem;
    letter-spacing: 0.1em;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin: 1em 0;
}

th, td {
    padding: 0.5rem;
    border: 1px solid var(--border-color);
}

th {
    background-color: var(--header-bg);
    font-weight: 600;
}

tr:last-child td {
    background-color: var(--header-bg);
}

img {
    max-width: 120px;
    border-radius: 4px;
}

hr {
    border: none;
    border-top: 1px solid var(--border-color);
    margin: 2em 0 1em;
    width: 40%;
}

@media print {
    body {
        font-size: 11pt;
        padding: 0;
    }

    .report-card {
        border: none;
        padding: 0;
    }

    .report-card::before {
        content: attr(data-watermark);
        position: fixed;
        top: 45%;
        left: 10%;
        font-size: 96pt;
        color: rgba(30, 58, 138, 0.06);
        transform: rotate(-30deg);
        z-index: -1;
    }

    table {
        page-break-inside: avoid;
    }
}
"#;

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
