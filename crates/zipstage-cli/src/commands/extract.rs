//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::with_hints;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use zipstage_core::NoopProgress;
use zipstage_core::extract_with_progress;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let output_dir = super::output_dir(args.output_dir.as_deref())?;
    let config = super::extract_config(&args.permissions);

    let report = if show_progress {
        let mut progress = CliProgress::new("Extracting");
        with_hints(extract_with_progress(
            &args.archive,
            &output_dir,
            &config,
            &mut progress,
        ))?
    } else {
        with_hints(extract_with_progress(
            &args.archive,
            &output_dir,
            &config,
            &mut NoopProgress,
        ))?
    };

    formatter.format_extraction_result(&report)?;

    Ok(())
}
