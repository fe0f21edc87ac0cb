//! Real-disk filesystem.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;

use walkdir::WalkDir;

use super::Filesystem;
use super::NodeKind;
use super::NodeMetadata;
use super::ReadSeek;
use super::Walk;
use super::WalkEntry;

/// Filesystem backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl OsFs {
    /// Creates a new real-disk filesystem handle.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn node_kind(file_type: fs::FileType) -> NodeKind {
    if file_type.is_symlink() {
        NodeKind::Symlink
    } else if file_type.is_dir() {
        NodeKind::Directory
    } else {
        NodeKind::File
    }
}

impl Filesystem for OsFs {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn ReadSeek + '_>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_write(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + '_>> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        // Permission bits are Unix-only.
        #[cfg(not(unix))]
        let _ = mode;

        Ok(Box::new(options.open(path)?))
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        let result = match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir(path),
            Ok(_) => fs::remove_file(path),
            Err(e) => Err(e),
        };

        match result {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<NodeMetadata> {
        let meta = fs::symlink_metadata(path)?;
        let kind = node_kind(meta.file_type());
        Ok(NodeMetadata {
            kind,
            len: if kind == NodeKind::File { meta.len() } else { 0 },
        })
    }

    fn walk(&self, root: &Path) -> io::Result<Walk<'_>> {
        // walkdir reports an unreadable root as an item; surface it up front.
        fs::symlink_metadata(root)?;

        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry.map_err(io::Error::from).map(|entry| WalkEntry {
                    kind: node_kind(entry.file_type()),
                    path: entry.into_path(),
                })
            });

        Ok(Box::new(entries))
    }
}
