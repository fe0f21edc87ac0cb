//! Fetch command implementation.

use crate::cli::FetchArgs;
use crate::error::with_hints;
use crate::output::OutputFormatter;
use anyhow::Result;

pub fn execute(args: &FetchArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = super::fetch_config(&args.staging);
    let staged = with_hints(zipstage_core::fetch(&args.url, &config))?;

    formatter.format_fetch_result(&args.url, &staged)
}
