//! Zipstage CLI - download, safely extract, and search zip archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json && progress::CliProgress::should_show();

    match &cli.command {
        cli::Commands::Fetch(args) => commands::fetch::execute(args, &*formatter),
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Find(args) => commands::find::execute(args, &*formatter),
        cli::Commands::Get(args) => commands::get::execute(args, &*formatter, show_progress),
    }
}

/// Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "zipstage_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
