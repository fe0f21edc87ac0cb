//! Extraction reporting and progress observation.

use std::path::Path;
use std::time::Duration;

/// Report of an archive extraction operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Number of file entries written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total bytes written to the destination.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Observer notified while an archive is being extracted.
///
/// The library does not log per entry; callers that want per-entry feedback
/// implement this trait instead.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::ExtractProgress;
///
/// struct Printer;
///
/// impl ExtractProgress for Printer {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("{current}/{total}: {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ExtractProgress: Send {
    /// Called before an entry is sanitized and materialized.
    ///
    /// `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after a file entry's content has been written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been fully materialized.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once after every entry has been processed.
    fn on_complete(&mut self);
}

/// Progress observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ExtractProgress for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ExtractionReport::new();
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.directories_created, 0);
        assert_eq!(report.bytes_written, 0);
    }

    #[test]
    fn test_total_items() {
        let mut report = ExtractionReport::new();
        report.files_extracted = 10;
        report.directories_created = 5;
        assert_eq!(report.total_items(), 15);
    }
}
