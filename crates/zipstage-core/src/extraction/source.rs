//! Zip archive reader over the filesystem capability.

use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use zip::ZipArchive;

use crate::Result;
use crate::ZipstageError;
use crate::fs::Filesystem;
use crate::fs::ReadSeek;
use crate::types::ArchiveEntry;

/// An opened zip archive whose entries are visited by index.
pub(crate) struct ZipSource<'a> {
    archive: ZipArchive<Box<dyn ReadSeek + 'a>>,
    path: PathBuf,
}

impl<'a> ZipSource<'a> {
    /// Opens and parses the central directory of the archive at `path`.
    pub(crate) fn open<F: Filesystem + ?Sized>(fs: &'a F, path: &Path) -> Result<Self> {
        let reader = fs
            .open_read(path)
            .map_err(|e| ZipstageError::storage(path, e))?;
        let archive = ZipArchive::new(reader).map_err(|source| ZipstageError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            archive,
            path: path.to_path_buf(),
        })
    }

    /// Number of entries in the archive index.
    pub(crate) fn len(&self) -> usize {
        self.archive.len()
    }

    /// Runs `f` with the metadata and decompressing reader of entry `index`.
    ///
    /// The entry reader is dropped when `f` returns.
    pub(crate) fn with_entry<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&ArchiveEntry, &mut dyn Read) -> Result<T>,
    ) -> Result<T> {
        let mut file = self
            .archive
            .by_index(index)
            .map_err(|source| ZipstageError::ArchiveOpen {
                path: self.path.clone(),
                source,
            })?;

        let entry =
            ArchiveEntry::from_zip_parts(file.name(), file.is_dir(), file.unix_mode(), file.size());
        f(&entry, &mut file)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fs::MemFs;
    use crate::test_utils::ZipTestBuilder;
    use crate::types::EntryKind;

    #[test]
    fn test_entries_in_index_order() {
        let fs = MemFs::new();
        let data = ZipTestBuilder::new()
            .add_directory("dir/")
            .add_file("dir/a.txt", b"alpha")
            .add_file("b.txt", b"beta")
            .build();
        fs.insert_file("/a.zip", &data).unwrap();

        let mut source = ZipSource::open(&fs, Path::new("/a.zip")).unwrap();
        assert_eq!(source.len(), 3);

        let mut seen = Vec::new();
        for index in 0..source.len() {
            source
                .with_entry(index, |entry, reader| {
                    let mut content = Vec::new();
                    reader.read_to_end(&mut content).unwrap();
                    seen.push((entry.name.clone(), entry.kind, content));
                    Ok(())
                })
                .unwrap();
        }

        assert_eq!(seen[0].0, PathBuf::from("dir/"));
        assert_eq!(seen[0].1, EntryKind::Directory);
        assert_eq!(seen[1].2, b"alpha");
        assert_eq!(seen[2].0, PathBuf::from("b.txt"));
    }

    #[test]
    fn test_garbage_is_archive_open_error() {
        let fs = MemFs::new();
        fs.insert_file("/bad.zip", b"definitely not a zip").unwrap();
        let result = ZipSource::open(&fs, Path::new("/bad.zip"));
        assert!(matches!(result, Err(ZipstageError::ArchiveOpen { .. })));
    }

    #[test]
    fn test_missing_archive_is_storage_error() {
        let fs = MemFs::new();
        let result = ZipSource::open(&fs, Path::new("/missing.zip"));
        assert!(matches!(result, Err(ZipstageError::Storage { .. })));
    }
}
