//! Filesystem capability consumed by fetch, extract and find.
//!
//! Operations take any [`Filesystem`] so the same code runs against the real
//! disk ([`OsFs`]) or an in-memory tree ([`MemFs`]).

mod mem;
mod os;

pub use mem::MemFs;
pub use os::OsFs;

use std::borrow::Cow;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Mode used by [`Filesystem::create`].
pub const DEFAULT_CREATE_MODE: u32 = 0o666;

/// Readable and seekable stream, as required by the zip reader.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Iterator returned by [`Filesystem::walk`].
pub type Walk<'a> = Box<dyn Iterator<Item = io::Result<WalkEntry>> + 'a>;

/// Kind of filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (never followed).
    Symlink,
}

/// Metadata about a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMetadata {
    /// Node kind.
    pub kind: NodeKind,
    /// Size in bytes (0 for directories).
    pub len: u64,
}

impl NodeMetadata {
    /// Returns `true` for directories.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// A node visited by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full path of the node.
    pub path: PathBuf,
    /// Node kind.
    pub kind: NodeKind,
}

impl WalkEntry {
    /// Returns the base name of the node.
    ///
    /// Paths without a final normal component (such as `/`) yield the whole
    /// path.
    #[must_use]
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy(),
            |name| name.to_string_lossy(),
        )
    }
}

/// Storage operations used by the core.
pub trait Filesystem {
    /// Opens a file for reading.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn ReadSeek + '_>>;

    /// Creates or truncates a file for writing with the given permission bits.
    ///
    /// The parent directory must exist.
    fn open_write(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + '_>>;

    /// Creates or truncates a file with [`DEFAULT_CREATE_MODE`].
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        self.open_write(path, DEFAULT_CREATE_MODE)
    }

    /// Removes a file, symlink or empty directory.
    ///
    /// A missing node is not an error.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Creates a directory and all of its missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Returns metadata for a node without following symlinks.
    fn metadata(&self, path: &Path) -> io::Result<NodeMetadata>;

    /// Walks the tree rooted at `root` in name-sorted pre-order, root first.
    ///
    /// Fails if the walk cannot start. Failures on individual nodes are
    /// yielded as `Err` items.
    fn walk(&self, root: &Path) -> io::Result<Walk<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_entry_file_name() {
        let entry = WalkEntry {
            path: PathBuf::from("/out/notes.txt"),
            kind: NodeKind::File,
        };
        assert_eq!(entry.file_name(), "notes.txt");

        let root = WalkEntry {
            path: PathBuf::from("/"),
            kind: NodeKind::Directory,
        };
        assert_eq!(root.file_name(), "/");
    }
}
