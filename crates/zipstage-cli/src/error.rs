//! Error conversion utilities for CLI.
//!
//! Converts zipstage-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use zipstage_core::ZipstageError;

/// Converts `ZipstageError` to user-friendly anyhow error with a hint
pub fn convert_error(err: ZipstageError) -> anyhow::Error {
    match err {
        ZipstageError::PathTraversal { path } => {
            anyhow!(
                "Security violation: archive entry '{}' escapes the destination directory\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                path.display()
            )
        }
        ZipstageError::RemoteFetch { url, status } => {
            anyhow!(
                "Download of '{url}' failed with HTTP status {status}\n\
                 HINT: Check that the URL is correct and the file is publicly reachable."
            )
        }
        ZipstageError::Transport { url, source } => {
            anyhow!(
                "Could not download '{url}': {source}\n\
                 HINT: Check your network connection, or raise --timeout for slow servers."
            )
        }
        ZipstageError::ArchiveOpen { path, source } => {
            anyhow!(
                "Invalid archive '{}': {source}\n\
                 HINT: The archive may be corrupted or may not be a zip file.",
                path.display()
            )
        }
        ZipstageError::Pattern(source) => {
            anyhow!(
                "Invalid search pattern: {source}\n\
                 HINT: Patterns use regular expression syntax. Escape literal dots as '\\.'."
            )
        }
        ZipstageError::Walk { path, source } => {
            anyhow!(
                "Cannot search '{}': {source}\n\
                 HINT: Check that the directory exists and is readable.",
                path.display()
            )
        }
        err @ ZipstageError::Storage { .. } => anyhow::Error::from(err),
    }
}

/// Maps a core result into an anyhow result with hints attached
pub fn with_hints<T>(result: zipstage_core::Result<T>) -> anyhow::Result<T> {
    result.map_err(convert_error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_path_traversal_error() {
        let err = ZipstageError::PathTraversal {
            path: PathBuf::from("../../../etc/passwd"),
        };
        let msg = format!("{:?}", convert_error(err));
        assert!(msg.contains("Security violation"));
        assert!(msg.contains("../../../etc/passwd"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_remote_fetch_error() {
        let err = ZipstageError::RemoteFetch {
            url: "https://example.com/a.zip".to_string(),
            status: 404,
        };
        let msg = format!("{:?}", convert_error(err));
        assert!(msg.contains("404"));
        assert!(msg.contains("https://example.com/a.zip"));
    }

    #[test]
    fn test_convert_storage_error_keeps_source() {
        let err = ZipstageError::Storage {
            path: PathBuf::from("/out/a.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{:?}", convert_error(err));
        assert!(msg.contains("/out/a.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_convert_pattern_error() {
        let err = zipstage_core::find(".", "(unclosed").unwrap_err();
        let msg = format!("{:?}", convert_error(err));
        assert!(msg.contains("Invalid search pattern"));
    }
}
