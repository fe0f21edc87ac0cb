//! Convenience entry points on the real filesystem.
//!
//! These wrap [`Fetcher`], [`extract_archive`] and [`find_files`] with
//! [`OsFs`] and default collaborators. Use those directly to plug in another
//! [`Filesystem`](crate::fs::Filesystem), HTTP client or identifier source.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractConfig;
use crate::ExtractProgress;
use crate::ExtractionReport;
use crate::FetchConfig;
use crate::Fetcher;
use crate::Result;
use crate::StagedDownload;
use crate::extraction::extract_archive;
use crate::extraction::extract_archive_with_progress;
use crate::find::find_files;
use crate::fs::OsFs;

/// Downloads `url` into the staging directory of `config`.
///
/// # Errors
///
/// See [`Fetcher::fetch`].
///
/// # Examples
///
/// ```no_run
/// use zipstage_core::FetchConfig;
///
/// let staged = zipstage_core::fetch("https://example.com/test.zip", &FetchConfig::default())?;
/// println!("{}", staged.path.display());
/// # Ok::<(), zipstage_core::ZipstageError>(())
/// ```
pub fn fetch(url: &str, config: &FetchConfig) -> Result<StagedDownload> {
    Fetcher::new(config.clone())?.fetch(&OsFs::new(), url)
}

/// Extracts the zip archive at `archive_path` into `destination`.
///
/// # Errors
///
/// See [`extract_archive`].
///
/// # Examples
///
/// ```no_run
/// use zipstage_core::ExtractConfig;
///
/// let report = zipstage_core::extract("test.zip", "/out", &ExtractConfig::default())?;
/// println!("extracted {} files", report.files_extracted);
/// # Ok::<(), zipstage_core::ZipstageError>(())
/// ```
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    destination: Q,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    extract_archive(
        &OsFs::new(),
        archive_path.as_ref(),
        destination.as_ref(),
        config,
    )
}

/// Extracts an archive while reporting progress.
///
/// # Errors
///
/// See [`extract_archive`].
pub fn extract_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    destination: Q,
    config: &ExtractConfig,
    progress: &mut dyn ExtractProgress,
) -> Result<ExtractionReport> {
    extract_archive_with_progress(
        &OsFs::new(),
        archive_path.as_ref(),
        destination.as_ref(),
        config,
        progress,
    )
}

/// Returns the paths under `root` whose base name matches `pattern`.
///
/// # Errors
///
/// See [`find_files`].
///
/// # Examples
///
/// ```no_run
/// let hits = zipstage_core::find("/out", r"(.*)\.txt")?;
/// for path in hits {
///     println!("{}", path.display());
/// }
/// # Ok::<(), zipstage_core::ZipstageError>(())
/// ```
pub fn find<P: AsRef<Path>>(root: P, pattern: &str) -> Result<Vec<PathBuf>> {
    find_files(&OsFs::new(), root.as_ref(), pattern)
}
