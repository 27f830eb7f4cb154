pub mod generate;
pub mod init;
pub mod summary;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "treasurer",
    version,
    about = "Turn a monthly finance CSV export into a treasurer's report."
)]
pub struct Cli {
    /// Log pipeline detail to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the renderer paths and report defaults.
    Init {
        /// Path to the pandoc executable
        #[arg(long)]
        pandoc: String,
        /// Directory holding xelatex, prepended to pandoc's PATH
        #[arg(long = "tool-dir")]
        tool_dir: String,
        /// Name and callsign used to sign the report
        #[arg(long)]
        signature: Option<String>,
        /// Title prefix, e.g. "DVRA Treasurer's Report"
        #[arg(long)]
        title: Option<String>,
        /// Keep the intermediate markdown by default
        #[arg(long = "keep-markdown")]
        keep_markdown: bool,
    },
    /// Generate the PDF report from an export file.
    Generate {
        /// Path to the exported CSV file
        csv: String,
        /// Starting balance, e.g. 1000.00
        #[arg(long = "start")]
        starting_balance: String,
        /// Ending balance, e.g. 600.00
        #[arg(long = "end")]
        ending_balance: String,
        /// Output PDF (default: CSV name with .pdf, next to the CSV)
        #[arg(short, long)]
        output: Option<String>,
        /// Override the signature from settings
        #[arg(long)]
        signature: Option<String>,
        /// Keep report.md next to the PDF
        #[arg(long = "keep-markdown")]
        keep_markdown: bool,
        /// Override the pandoc path from settings
        #[arg(long)]
        pandoc: Option<String>,
        /// Override the tool directory from settings
        #[arg(long = "tool-dir")]
        tool_dir: Option<String>,
    },
    /// Print category totals for an export file without rendering.
    Summary {
        /// Path to the exported CSV file
        csv: String,
    },
    /// Print shell completions.
    Completions {
        shell: clap_complete::Shell,
    },
}
