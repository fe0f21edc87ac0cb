//! Finding files by base-name pattern.

use std::path::Path;
use std::path::PathBuf;

use regex::Regex;
use tracing::debug;
use tracing::instrument;

use crate::Result;
use crate::ZipstageError;
use crate::fs::Filesystem;

/// Walks `root` and returns the paths whose base name matches `pattern`.
///
/// The pattern is an unanchored regular expression tested against the final
/// path component only, so `"txt"` matches `notes.txt` and `"^a"` matches
/// every name starting with `a`. The root itself and directories are
/// candidates too. Results come back in walk order (name-sorted pre-order).
///
/// Nodes that cannot be visited during the walk are skipped.
///
/// # Errors
///
/// - [`ZipstageError::Pattern`] if `pattern` does not compile
/// - [`ZipstageError::Walk`] if the walk cannot start at `root`
#[instrument(level = "debug", skip(fs), fields(root = %root.display()))]
pub fn find_files<F: Filesystem + ?Sized>(
    fs: &F,
    root: &Path,
    pattern: &str,
) -> Result<Vec<PathBuf>> {
    let regex = Regex::new(pattern)?;

    let walk = fs.walk(root).map_err(|source| ZipstageError::Walk {
        path: root.to_path_buf(),
        source,
    })?;

    let mut matches = Vec::new();
    let mut skipped = 0usize;
    for entry in walk {
        match entry {
            Ok(entry) => {
                if regex.is_match(&entry.file_name()) {
                    matches.push(entry.path);
                }
            }
            Err(_) => skipped += 1,
        }
    }

    debug!(matches = matches.len(), skipped, "search complete");
    Ok(matches)
}
