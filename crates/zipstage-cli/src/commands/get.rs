//! Get command implementation: fetch, then extract the staged archive.

use crate::cli::GetArgs;
use crate::error::with_hints;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use std::fs;
use tracing::debug;
use zipstage_core::NoopProgress;
use zipstage_core::StagedDownload;
use zipstage_core::extract_with_progress;

pub fn execute(args: &GetArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let output_dir = super::output_dir(args.output_dir.as_deref())?;
    let fetch_config = super::fetch_config(&args.staging);
    let extract_config = super::extract_config(&args.permissions);

    let staged = with_hints(zipstage_core::fetch(&args.url, &fetch_config))?;

    let result = if show_progress {
        let mut progress = CliProgress::new("Extracting");
        extract_with_progress(&staged.path, &output_dir, &extract_config, &mut progress)
    } else {
        extract_with_progress(&staged.path, &output_dir, &extract_config, &mut NoopProgress)
    };

    // The staged archive goes away whether or not extraction succeeded.
    if !args.keep_archive {
        discard_staged(&staged, formatter);
    }

    let report = with_hints(result)?;
    formatter.format_get_result(&args.url, &staged, &report, args.keep_archive)
}

fn discard_staged(staged: &StagedDownload, formatter: &dyn OutputFormatter) {
    match fs::remove_file(&staged.path) {
        Ok(()) => debug!(path = %staged.path.display(), "removed staged archive"),
        Err(e) => formatter.format_warning(&format!(
            "could not remove staged archive {}: {e}",
            staged.path.display()
        )),
    }
}
