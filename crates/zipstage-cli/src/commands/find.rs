//! Find command implementation.

use crate::cli::FindArgs;
use crate::error::with_hints;
use crate::output::OutputFormatter;
use anyhow::Result;

pub fn execute(args: &FindArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let matches = with_hints(zipstage_core::find(&args.root, &args.pattern))?;
    formatter.format_find_result(&args.root, &matches)
}
