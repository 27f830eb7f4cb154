use std::path::PathBuf;

use colored::Colorize;

use crate::error::{ReportError, Result};
use crate::fmt::parse_balance;
use crate::pandoc::SystemRunner;
use crate::pipeline::{default_pdf_path, spawn_generate, GenerateRequest, RunOutcome};
use crate::settings::{read_settings, settings_path, shellexpand_path, Settings};
use crate::status::{Status, StatusMailbox};

pub struct GenerateArgs {
    pub csv: String,
    pub starting_balance: String,
    pub ending_balance: String,
    pub output: Option<String>,
    pub signature: Option<String>,
    pub keep_markdown: bool,
    pub pandoc: Option<String>,
    pub tool_dir: Option<String>,
}

/// Settings file merged with command-line overrides. The file may be absent
/// only when both renderer paths come from the command line.
fn resolve_settings(args: &GenerateArgs) -> Result<Settings> {
    let mut settings = match read_settings(&settings_path()) {
        Ok(s) => s,
        Err(_) if args.pandoc.is_some() && args.tool_dir.is_some() => Settings::default(),
        Err(e) => return Err(e),
    };
    if let Some(p) = &args.pandoc {
        settings.pandoc = shellexpand_path(p);
    }
    if let Some(d) = &args.tool_dir {
        settings.tool_dir = shellexpand_path(d);
    }
    if let Some(sig) = &args.signature {
        settings.signature = sig.clone();
    }
    settings.keep_markdown |= args.keep_markdown;
    settings.validate()?;
    Ok(settings)
}

fn print_status(status: &Status) {
    let message = status.message();
    match status {
        Status::Working(_) => eprintln!("{}", message.dimmed()),
        Status::Done(_) => println!("{}", message.green()),
        Status::Failed(_) => eprintln!("{}", message.red()),
    }
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let starting_balance = parse_balance(&args.starting_balance)?;
    let ending_balance = parse_balance(&args.ending_balance)?;

    let csv = PathBuf::from(shellexpand_path(&args.csv));
    let pdf = args
        .output
        .as_deref()
        .map(|o| PathBuf::from(shellexpand_path(o)))
        .unwrap_or_else(|| default_pdf_path(&csv));

    let req = GenerateRequest {
        csv,
        pdf,
        author: settings.signature,
        title: settings.report_title,
        starting_balance,
        ending_balance,
        keep_markdown: settings.keep_markdown,
        pandoc: PathBuf::from(settings.pandoc),
        tool_dir: PathBuf::from(settings.tool_dir),
    };

    let mailbox = StatusMailbox::new();
    let handle = spawn_generate(req, SystemRunner, mailbox.clone());
    loop {
        let status = mailbox.wait();
        print_status(&status);
        if status.is_terminal() {
            break;
        }
    }

    let outcome = handle
        .join()
        .map_err(|_| ReportError::Other("report worker panicked".to_string()))??;

    if !outcome.is_success() {
        return Err(ReportError::Other("report not generated".to_string()));
    }
    if let RunOutcome::Generated {
        pdf,
        markdown,
        cleanup_error,
    } = outcome
    {
        tracing::info!(pdf = %pdf.display(), "report written");
        if let Some(md) = markdown {
            println!("Markdown kept at {}", md.display());
        }
        if let Some(msg) = cleanup_error {
            eprintln!("{}", msg.yellow());
        }
    }
    Ok(())
}
