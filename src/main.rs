mod categorizer;
mod cli;
mod error;
mod fmt;
mod importer;
mod markdown;
mod models;
mod pandoc;
mod pipeline;
mod reports;
mod settings;
mod status;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "treasurer=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init {
            pandoc,
            tool_dir,
            signature,
            title,
            keep_markdown,
        } => cli::init::run(&pandoc, &tool_dir, signature.as_deref(), title.as_deref(), keep_markdown),
        Commands::Generate {
            csv,
            starting_balance,
            ending_balance,
            output,
            signature,
            keep_markdown,
            pandoc,
            tool_dir,
        } => cli::generate::run(cli::generate::GenerateArgs {
            csv,
            starting_balance,
            ending_balance,
            output,
            signature,
            keep_markdown,
            pandoc,
            tool_dir,
        }),
        Commands::Summary { csv } => cli::summary::run(&csv),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "treasurer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
