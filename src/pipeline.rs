//! One report run: export file in, PDF out. All state is local to the call.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::categorizer::collect_transactions;
use crate::error::Result;
use crate::importer;
use crate::markdown::{self, ReportMeta};
use crate::pandoc::{self, Conversion, Invocation, ProcessRunner};
use crate::reports::{self, Summary};
use crate::status::{Status, StatusMailbox};

pub const MARKDOWN_FILE_NAME: &str = "report.md";

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub csv: PathBuf,
    pub pdf: PathBuf,
    pub author: String,
    pub title: String,
    pub starting_balance: Decimal,
    pub ending_balance: Decimal,
    pub keep_markdown: bool,
    pub pandoc: PathBuf,
    pub tool_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Generated {
        pdf: PathBuf,
        markdown: Option<PathBuf>,
        cleanup_error: Option<String>,
    },
    NoData,
    WriteFailed(String),
    RendererFailed { code: i32, command: String },
    RendererNotStarted { command: String, error: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Generated { .. })
    }
}

/// `statement.csv` -> `statement.pdf` next to it.
pub fn default_pdf_path(csv: &Path) -> PathBuf {
    csv.with_extension("pdf")
}

pub fn markdown_path_for(pdf: &Path) -> PathBuf {
    pdf.parent()
        .unwrap_or_else(|| Path::new(""))
        .join(MARKDOWN_FILE_NAME)
}

/// Extract, classify and total the export without writing anything.
pub fn summarize(csv: &Path) -> Result<Summary> {
    let rows = importer::load_rows(csv)?;
    let transactions = collect_transactions(&rows)?;
    reports::aggregate(transactions)
}

pub fn generate(
    req: &GenerateRequest,
    runner: &dyn ProcessRunner,
    status: &StatusMailbox,
) -> Result<RunOutcome> {
    info!(csv = %req.csv.display(), pdf = %req.pdf.display(), "generating report");

    status.working("Reading CSV File");
    let data = importer::read_export(&req.csv)?;
    let rows = importer::parse_rows(&data)?;

    status.working("Parsing CSV Rows");
    if rows.is_empty() {
        warn!("no data rows after extraction");
        status.post(Status::Failed(
            "No data read from file, report not generated".to_string(),
        ));
        return Ok(RunOutcome::NoData);
    }
    let transactions = collect_transactions(&rows)?;
    info!(rows = rows.len(), transactions = transactions.len(), "rows classified");

    status.working("Creating Transaction Categories");
    let summary = reports::aggregate(transactions)?;

    status.working("Calculating Totals");
    let totals = summary.totals;
    info!(
        inflows = %totals.total_inflows,
        outflows = %totals.total_outflows,
        net = %totals.net_total,
        "totals calculated"
    );

    status.working("Writing Intermediate Markdown");
    let markdown_path = markdown_path_for(&req.pdf);
    let meta = ReportMeta {
        author: &req.author,
        title: &req.title,
        starting_balance: req.starting_balance,
        ending_balance: req.ending_balance,
    };
    let text = markdown::render(&meta, &summary);
    if let Err(e) = markdown::write_markdown(&markdown_path, &text) {
        warn!(path = %markdown_path.display(), error = %e, "markdown write failed");
        let message = format!("failed to write markdown file to disk: {e}");
        status.post(Status::Failed(message.clone()));
        return Ok(RunOutcome::WriteFailed(message));
    }

    status.working("Converting Markdown to PDF");
    let path_env = std::env::var_os("PATH");
    let invocation = Invocation::pandoc(
        &req.pandoc,
        &req.tool_dir,
        &markdown_path,
        &req.pdf,
        path_env.as_deref(),
    )?;
    match pandoc::convert(runner, &invocation) {
        Conversion::Converted => {}
        Conversion::Failed { code, command } => {
            warn!(code, %command, "renderer failed");
            status.post(Status::Failed(format!(
                "renderer exited with status {code}: {command}"
            )));
            return Ok(RunOutcome::RendererFailed { code, command });
        }
        Conversion::NotStarted { command, error } => {
            warn!(%command, %error, "renderer could not be started");
            status.post(Status::Failed(format!(
                "renderer could not be started ({error}): {command}"
            )));
            return Ok(RunOutcome::RendererNotStarted { command, error });
        }
    }

    let mut cleanup_error = None;
    let mut markdown = Some(markdown_path.clone());
    if !req.keep_markdown {
        status.working("Deleting Intermediate Markdown");
        match std::fs::remove_file(&markdown_path) {
            Ok(()) => markdown = None,
            Err(e) => {
                warn!(path = %markdown_path.display(), error = %e, "markdown cleanup failed");
                let message = format!("failed to delete markdown file: {e}");
                status.working(message.clone());
                cleanup_error = Some(message);
            }
        }
    }

    status.post(Status::Done(format!(
        "Report Generated in {}",
        req.pdf.display()
    )));
    Ok(RunOutcome::Generated {
        pdf: req.pdf.clone(),
        markdown,
        cleanup_error,
    })
}

/// Run `generate` on a worker thread. A terminal status is always posted,
/// including when the run ends in an error or a panic. The panic is then
/// resumed so `join` still reports it.
pub fn spawn_generate<R>(
    req: GenerateRequest,
    runner: R,
    status: StatusMailbox,
) -> JoinHandle<Result<RunOutcome>>
where
    R: ProcessRunner + Send + 'static,
{
    std::thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| generate(&req, &runner, &status)));
        match result {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(e)) => {
                status.post(Status::Failed(e.to_string()));
                Err(e)
            }
            Err(payload) => {
                error!("report worker panicked");
                status.post(Status::Failed("report worker panicked".to_string()));
                panic::resume_unwind(payload)
            }
        }
    })
}
