//! report-card CLI - generate a report card from a JSON grade form.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use report_card::adapters::document::MarkdownReportRenderer;
use report_card::adapters::memory::InMemoryRecordStore;
use report_card::application::{
    ExportReportCardCommand, ExportReportCardHandler, GenerateReportCardCommand,
    GenerateReportCardError, GenerateReportCardHandler, LoadReportCardHandler, RecordResolver,
    ReportCardForm, SaveGradesHandler, SaveStudentHandler, SubmissionNotice,
};
use report_card::config::{AppConfig, LoggingConfig};
use report_card::domain::foundation::DomainError;
use report_card::ports::ExportFormat;

#[derive(Parser)]
#[command(name = "report-card", version, about = "Generate a student report card from a grade form")]
struct Cli {
    /// Path to the JSON form payload
    form: PathBuf,

    /// Write the rendered markdown to stdout instead of exporting a file
    #[arg(long)]
    print: bool,

    /// Export format: markdown, html, pdf (defaults to configuration)
    #[arg(long)]
    format: Option<ExportFormat>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<ExitCode> {
    let raw = tokio::fs::read_to_string(&cli.form)
        .await
        .with_context(|| format!("Failed to read form {}", cli.form.display()))?;
    let form: ReportCardForm = serde_json::from_str(&raw).context("Form is not valid JSON")?;

    let submission = match form
        .with_default_signature(config.institution.default_signature.as_deref())
        .validate()
    {
        Ok(submission) => submission,
        Err(errors) => {
            eprintln!("Form has {} invalid field(s):", errors.len());
            for error in errors.errors() {
                eprintln!("  - {}", DomainError::from(error.clone()));
            }
            return Ok(ExitCode::from(2));
        }
    };

    let store = Arc::new(InMemoryRecordStore::new());
    let resolver = Arc::new(RecordResolver::from_store(store));
    let handoff = config.handoff.build();
    let generate = GenerateReportCardHandler::new(
        SaveStudentHandler::new(resolver.clone()),
        SaveGradesHandler::new(resolver),
    )
    .with_handoff(handoff.clone())
    .with_offline_fallback(config.submission.offline_fallback);

    let result = match generate
        .handle(GenerateReportCardCommand {
            submission,
            issue_date: None,
        })
        .await
    {
        Ok(result) => result,
        Err(GenerateReportCardError::StudentNotSaved(_)) => {
            eprintln!("{}", SubmissionNotice::StudentNotSaved.message());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    for notice in &result.notices {
        if notice.is_warning() {
            eprintln!("Warning: {}", notice.message());
        } else {
            eprintln!("{}", notice.message());
        }
    }

    let card = LoadReportCardHandler::new(handoff)
        .handle()
        .await?
        .unwrap_or(result.card);

    let exporter = ExportReportCardHandler::new(
        Arc::new(MarkdownReportRenderer::new(config.institution.letterhead())),
        Arc::new(config.export.build_service()),
        config.export.output_dir.clone(),
    );

    if cli.print {
        exporter.print(&card, &mut std::io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let format = cli.format.unwrap_or(config.export.format);
    match exporter.handle(ExportReportCardCommand { card, format }).await {
        Some(exported) => {
            println!("{}", exported.path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("Export failed; see log output for details.");
            Ok(ExitCode::FAILURE)
        }
    }
}
