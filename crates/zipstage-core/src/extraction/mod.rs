//! Zip extraction into a destination root.
//!
//! Entries are processed in archive index order. Each entry name is resolved
//! against the destination and rejected with
//! [`ZipstageError::PathTraversal`] before anything is written for it if the
//! resolved path leaves the root or passes through a symlink that already
//! exists under it. Extraction aborts on the first error;
//! entries materialized before the failure stay on disk.

mod materialize;
mod source;

use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::instrument;

use crate::ExtractConfig;
use crate::ExtractProgress;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::Result;
use crate::ZipstageError;
use crate::copy::CopyBuffer;
use crate::fs::Filesystem;
use crate::types::DestRoot;
use crate::types::EntryKind;
use crate::types::SafePath;

use self::source::ZipSource;

/// Extracts the zip archive at `archive_path` into `destination`.
///
/// Missing directories are created, existing files are replaced, and existing
/// directories named by directory entries are kept. File modes come from the
/// archive when `config` preserves permissions.
///
/// # Errors
///
/// - [`ZipstageError::ArchiveOpen`] if the archive cannot be parsed or an
///   entry cannot be decoded
/// - [`ZipstageError::PathTraversal`] if an entry escapes `destination`,
///   lexically or through a symlink already inside it
/// - [`ZipstageError::Storage`] on any filesystem failure
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use zipstage_core::ExtractConfig;
/// use zipstage_core::extraction::extract_archive;
/// use zipstage_core::fs::OsFs;
///
/// let report = extract_archive(
///     &OsFs::new(),
///     Path::new("download.zip"),
///     Path::new("out"),
///     &ExtractConfig::default(),
/// )?;
/// println!("{} files", report.files_extracted);
/// # Ok::<(), zipstage_core::ZipstageError>(())
/// ```
pub fn extract_archive<F: Filesystem + ?Sized>(
    fs: &F,
    archive_path: &Path,
    destination: &Path,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    extract_archive_with_progress(fs, archive_path, destination, config, &mut NoopProgress)
}

/// Extracts an archive, reporting each entry to `progress`.
///
/// Behaves exactly like [`extract_archive`].
#[instrument(
    level = "debug",
    skip_all,
    fields(archive = %archive_path.display(), destination = %destination.display())
)]
pub fn extract_archive_with_progress<F: Filesystem + ?Sized>(
    fs: &F,
    archive_path: &Path,
    destination: &Path,
    config: &ExtractConfig,
    progress: &mut dyn ExtractProgress,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let root = DestRoot::new(destination)?;
    let mut source = ZipSource::open(fs, archive_path)?;
    let total = source.len();
    debug!(entries = total, "opened archive");

    let mut report = ExtractionReport::new();
    let mut buffer = CopyBuffer::new();

    for index in 0..total {
        source.with_entry(index, |entry, reader| {
            progress.on_entry_start(entry.name(), total, index + 1);

            let target = SafePath::resolve(entry.name(), &root)?;
            materialize::reject_symlinked_ancestors(fs, &root, &target, entry.name())?;
            match entry.kind {
                EntryKind::Directory => {
                    materialize::create_directory(fs, &target, &mut report)?;
                }
                EntryKind::File => {
                    // A file cannot replace the destination root itself.
                    if target.is_root() {
                        return Err(ZipstageError::PathTraversal {
                            path: entry.name.clone(),
                        });
                    }
                    let bytes = materialize::write_file(
                        fs,
                        &target,
                        config.file_mode(entry.mode),
                        reader,
                        &mut buffer,
                        &mut report,
                        archive_path,
                    )?;
                    progress.on_bytes_written(bytes);
                }
            }

            progress.on_entry_complete(entry.name());
            Ok(())
        })?;
    }

    report.duration = start.elapsed();
    progress.on_complete();
    debug!(
        files = report.files_extracted,
        directories = report.directories_created,
        bytes = report.bytes_written,
        "extraction complete"
    );

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fs::MemFs;
    use crate::test_utils::ZipTestBuilder;
    use std::path::PathBuf;

    fn stage(fs: &MemFs, data: &[u8]) -> PathBuf {
        let path = PathBuf::from("/staging/archive.zip");
        fs.insert_file(&path, data).unwrap();
        path
    }

    #[derive(Default)]
    struct Recording {
        started: Vec<(PathBuf, usize, usize)>,
        bytes: u64,
        completed: usize,
        finished: bool,
    }

    impl ExtractProgress for Recording {
        fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
            self.started.push((path.to_path_buf(), total, current));
        }

        fn on_bytes_written(&mut self, bytes: u64) {
            self.bytes += bytes;
        }

        fn on_entry_complete(&mut self, _path: &Path) {
            self.completed += 1;
        }

        fn on_complete(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn test_extract_single_file() {
        let fs = MemFs::new();
        let archive = stage(&fs, &ZipTestBuilder::new().add_file("notes.txt", b"hi").build());

        let report =
            extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default()).unwrap();

        assert_eq!(fs.read("/out/notes.txt").unwrap(), b"hi");
        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.bytes_written, 2);
    }

    #[test]
    fn test_extract_creates_unlisted_ancestors() {
        let fs = MemFs::new();
        let archive = stage(
            &fs,
            &ZipTestBuilder::new()
                .add_file("a/b/c/file.txt", b"deep")
                .build(),
        );

        extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default()).unwrap();

        assert!(fs.metadata(Path::new("/out/a/b/c")).unwrap().is_dir());
        assert_eq!(fs.read("/out/a/b/c/file.txt").unwrap(), b"deep");
    }

    #[test]
    fn test_extract_twice_is_idempotent() {
        let fs = MemFs::new();
        let archive = stage(
            &fs,
            &ZipTestBuilder::new()
                .add_directory("docs/")
                .add_file("docs/readme.md", b"# readme")
                .add_file("top.txt", b"top")
                .build(),
        );
        let config = ExtractConfig::default();

        extract_archive(&fs, &archive, Path::new("/out"), &config).unwrap();
        let first = fs.paths();
        extract_archive(&fs, &archive, Path::new("/out"), &config).unwrap();

        assert_eq!(fs.paths(), first);
        assert_eq!(fs.read("/out/docs/readme.md").unwrap(), b"# readme");
    }

    #[test]
    fn test_traversal_aborts_before_writing() {
        let fs = MemFs::new();
        let archive = stage(
            &fs,
            &ZipTestBuilder::new()
                .add_file("safe.txt", b"ok")
                .add_file("../evil.txt", b"pwned")
                .add_file("after.txt", b"never")
                .build(),
        );

        let result = extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default());

        assert!(
            matches!(result, Err(ZipstageError::PathTraversal { ref path }) if path == Path::new("../evil.txt"))
        );
        assert!(fs.exists("/out/safe.txt"));
        assert!(!fs.exists("/evil.txt"));
        assert!(!fs.exists("/out/after.txt"));
    }

    #[test]
    fn test_existing_symlink_inside_root_is_not_followed() {
        let fs = MemFs::new();
        fs.create_dir_all(Path::new("/outside")).unwrap();
        fs.insert_symlink("/out/link", "../outside").unwrap();
        let archive = stage(
            &fs,
            &ZipTestBuilder::new()
                .add_directory("link/sub/")
                .add_file("link/evil.txt", b"pwned")
                .build(),
        );

        let result = extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default());

        assert!(
            matches!(result, Err(ZipstageError::PathTraversal { ref path }) if path == Path::new("link/sub/"))
        );
        assert_eq!(
            fs.metadata(Path::new("/out/link")).unwrap().kind,
            crate::fs::NodeKind::Symlink
        );
        assert!(!fs.exists("/outside/sub"));
        assert!(!fs.exists("/outside/evil.txt"));
    }

    #[test]
    fn test_dot_dot_that_stays_inside_is_allowed() {
        let fs = MemFs::new();
        let archive = stage(
            &fs,
            &ZipTestBuilder::new()
                .add_file("a/../b.txt", b"inside")
                .build(),
        );

        extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default()).unwrap();

        assert_eq!(fs.read("/out/b.txt").unwrap(), b"inside");
    }

    #[test]
    fn test_file_entry_at_root_is_rejected() {
        let fs = MemFs::new();
        let archive = stage(&fs, &ZipTestBuilder::new().add_file(".", b"x").build());

        let result = extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default());

        assert!(result.is_err());
    }

    #[test]
    fn test_modes_follow_config() {
        let fs = MemFs::new();
        let archive = stage(
            &fs,
            &ZipTestBuilder::new()
                .add_file_with_mode("run.sh", b"#!/bin/sh", 0o755)
                .build(),
        );

        extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default()).unwrap();
        assert_eq!(fs.file_mode("/out/run.sh"), Some(0o755));

        let config = ExtractConfig::default().with_preserve_permissions(false);
        extract_archive(&fs, &archive, Path::new("/other"), &config).unwrap();
        assert_eq!(fs.file_mode("/other/run.sh"), Some(0o644));
    }

    #[test]
    fn test_progress_sees_every_entry() {
        let fs = MemFs::new();
        let archive = stage(
            &fs,
            &ZipTestBuilder::new()
                .add_directory("d/")
                .add_file("d/one.txt", b"1")
                .add_file("d/two.txt", b"22")
                .build(),
        );
        let mut progress = Recording::default();

        extract_archive_with_progress(
            &fs,
            &archive,
            Path::new("/out"),
            &ExtractConfig::default(),
            &mut progress,
        )
        .unwrap();

        assert_eq!(progress.started.len(), 3);
        assert_eq!(progress.started[0], (PathBuf::from("d/"), 3, 1));
        assert_eq!(progress.started[2].2, 3);
        assert_eq!(progress.bytes, 3);
        assert_eq!(progress.completed, 3);
        assert!(progress.finished);
    }

    #[test]
    fn test_not_a_zip_fails_to_open() {
        let fs = MemFs::new();
        let archive = stage(&fs, b"plain text");

        let result = extract_archive(&fs, &archive, Path::new("/out"), &ExtractConfig::default());

        assert!(matches!(result, Err(ZipstageError::ArchiveOpen { .. })));
        assert!(!fs.exists("/out"));
    }
}
