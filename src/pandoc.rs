use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{ReportError, Result};

/// A fully resolved renderer call: what to run, with which arguments, and
/// the PATH value it should see.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub path_env: OsString,
}

impl Invocation {
    /// `pandoc --pdf-engine xelatex -s -o <pdf> <markdown>`, with `tool_dir`
    /// ahead of the inherited search path.
    pub fn pandoc(
        pandoc: &Path,
        tool_dir: &Path,
        markdown: &Path,
        pdf: &Path,
        inherited_path: Option<&OsStr>,
    ) -> Result<Self> {
        Ok(Self {
            program: pandoc.to_path_buf(),
            args: vec![
                "--pdf-engine".into(),
                "xelatex".into(),
                "-s".into(),
                "-o".into(),
                pdf.as_os_str().to_owned(),
                markdown.as_os_str().to_owned(),
            ],
            path_env: prepend_search_path(tool_dir, inherited_path)?,
        })
    }

    /// Shell-ish rendering for status messages.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Join `dir` in front of `existing` with the platform's path-list separator.
pub fn prepend_search_path(dir: &Path, existing: Option<&OsStr>) -> Result<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = existing {
        paths.extend(std::env::split_paths(existing));
    }
    std::env::join_paths(paths).map_err(|e| ReportError::Other(format!("Invalid search path: {e}")))
}

/// Runs an external program to completion and returns its exit code.
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<i32>;
}

/// Spawns the real process with inherited stdio and waits for it.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<i32> {
        debug!(command = %invocation.command_line(), "spawning renderer");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .env("PATH", &invocation.path_env)
            .status()?;
        info!(?status, "renderer exited");
        // Killed by a signal: no code, treat as failure.
        Ok(status.code().unwrap_or(-1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted,
    Failed { code: i32, command: String },
    /// The process never ran; `error` is the OS reason.
    NotStarted { command: String, error: String },
}

/// Block until the renderer exits.
pub fn convert(runner: &dyn ProcessRunner, invocation: &Invocation) -> Conversion {
    let command = invocation.command_line();
    match runner.run(invocation) {
        Ok(0) => Conversion::Converted,
        Ok(code) => Conversion::Failed { code, command },
        Err(e) => Conversion::NotStarted {
            command,
            error: e.to_string(),
        },
    }
}
