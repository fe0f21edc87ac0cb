//! Archive entry metadata.

use std::path::Path;
use std::path::PathBuf;

/// Kind of item stored in an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry.
    File,
    /// Directory entry.
    Directory,
}

impl EntryKind {
    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// One item of an archive as recorded in its index.
///
/// `name` is attacker controlled and must go through
/// [`SafePath::resolve`](super::SafePath::resolve) before touching the
/// filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Relative path stored in the archive.
    pub name: PathBuf,
    /// File or directory.
    pub kind: EntryKind,
    /// Unix mode recorded in the archive, if any.
    pub mode: Option<u32>,
    /// Uncompressed size in bytes.
    pub size: u64,
}

impl ArchiveEntry {
    /// Builds entry metadata from a zip index record.
    pub(crate) fn from_zip_parts(name: &str, is_dir: bool, mode: Option<u32>, size: u64) -> Self {
        Self {
            name: PathBuf::from(name),
            kind: if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            mode,
            size,
        }
    }

    /// Returns the stored name as a path.
    #[must_use]
    pub fn name(&self) -> &Path {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_zip_parts() {
        let dir = ArchiveEntry::from_zip_parts("a/b/", true, Some(0o40755), 0);
        assert!(dir.kind.is_directory());
        assert_eq!(dir.name(), Path::new("a/b/"));

        let file = ArchiveEntry::from_zip_parts("a/b/c.txt", false, None, 12);
        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(file.size, 12);
        assert_eq!(file.mode, None);
    }
}
