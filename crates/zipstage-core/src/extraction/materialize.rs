//! Materializing validated entries on a filesystem.
//!
//! Every function here takes a [`SafePath`], so lexical containment has
//! already been established by the caller. Links that already exist under the
//! root are caught by [`reject_symlinked_ancestors`] before anything is
//! touched.

use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionReport;
use crate::Result;
use crate::ZipstageError;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_with_buffer;
use crate::fs::Filesystem;
use crate::fs::NodeKind;
use crate::types::DestRoot;
use crate::types::SafePath;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Fails with `PathTraversal` naming `entry` if any existing node between
/// `root` and the parent of `target` is a symlink.
///
/// Nodes are inspected with [`Filesystem::metadata`], which never follows
/// links. The walk stops at the first missing node or non-directory; those
/// are reported later by the write itself. The root is trusted as given.
pub(crate) fn reject_symlinked_ancestors<F: Filesystem + ?Sized>(
    fs: &F,
    root: &DestRoot,
    target: &SafePath,
    entry: &Path,
) -> Result<()> {
    let Some(relative) = target
        .as_path()
        .parent()
        .and_then(|parent| parent.strip_prefix(root.as_path()).ok())
    else {
        return Ok(());
    };

    let mut current = root.as_path().to_path_buf();
    for component in relative.components() {
        current.push(component);
        match fs.metadata(&current) {
            Ok(meta) if meta.kind == NodeKind::Symlink => {
                return Err(ZipstageError::PathTraversal {
                    path: entry.to_path_buf(),
                });
            }
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(ZipstageError::storage(current, e)),
        }
    }
    Ok(())
}

/// Materializes a directory entry.
///
/// An existing directory is kept as is; any other node at the path is
/// removed first. Missing ancestors are created.
pub(crate) fn create_directory<F: Filesystem + ?Sized>(
    fs: &F,
    target: &SafePath,
    report: &mut ExtractionReport,
) -> Result<()> {
    let path = target.as_path();

    match fs.metadata(path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => fs.remove(path).map_err(|e| ZipstageError::storage(path, e))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ZipstageError::storage(path, e)),
    }

    fs.create_dir_all(path)
        .map_err(|e| ZipstageError::storage(path, e))?;

    report.directories_created += 1;
    Ok(())
}

/// Materializes a file entry and returns the number of bytes written.
///
/// Whatever sits at the path is removed, then the path is created as a
/// directory tree so every ancestor exists even when the archive never lists
/// them. The terminal directory (and only that one) is removed again before
/// the file is written in its place.
///
/// Read failures on `reader` are attributed to the archive at
/// `archive_path`; write failures to the target.
pub(crate) fn write_file<F: Filesystem + ?Sized, R: Read + ?Sized>(
    fs: &F,
    target: &SafePath,
    mode: u32,
    reader: &mut R,
    buffer: &mut CopyBuffer,
    report: &mut ExtractionReport,
    archive_path: &Path,
) -> Result<u64> {
    let path = target.as_path();
    let storage = |e| ZipstageError::storage(path, e);

    fs.remove(path).map_err(storage)?;
    fs.create_dir_all(path).map_err(storage)?;
    fs.remove(path).map_err(storage)?;

    let output = fs.open_write(path, mode).map_err(storage)?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, output);
    let bytes_written = copy_with_buffer(reader, &mut writer, buffer).map_err(|e| match e {
        CopyError::Read(e) => ZipstageError::ArchiveOpen {
            path: archive_path.to_path_buf(),
            source: e.into(),
        },
        CopyError::Write(e) => ZipstageError::storage(path, e),
    })?;
    writer.flush().map_err(storage)?;

    report.files_extracted += 1;
    report.bytes_written += bytes_written;
    Ok(bytes_written)
}
