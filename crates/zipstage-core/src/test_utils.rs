//! Helpers for building zip fixtures in tests.
//!
//! # Panics
//!
//! Everything here panics on I/O errors; it is meant for tests only.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Creates an in-memory zip archive of stored files with mode `0o644`.
///
/// # Examples
///
/// ```
/// use zipstage_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builder for zip fixtures with files, directories and arbitrary names.
///
/// Names are written verbatim, so hostile entries such as `../evil` can be
/// produced.
///
/// # Examples
///
/// ```
/// use zipstage_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_file("../escape.txt", b"nope")
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored file with mode `0o644`.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a stored file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(mode);
        self.write_entry(path, data, options)
    }

    /// Adds a deflate-compressed file with mode `0o644`.
    #[must_use]
    pub fn add_deflated_file(self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        self.write_entry(path, data, options)
    }

    /// Adds a directory entry with mode `0o755`.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    fn write_entry(mut self, path: &str, data: &[u8], options: SimpleFileOptions) -> Self {
        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_zip_is_readable() {
        let data = create_test_zip(vec![("a.txt", b"a"), ("b/c.txt", b"c")]);
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_builder_keeps_hostile_names() {
        let data = ZipTestBuilder::new()
            .add_directory("dir/")
            .add_deflated_file("../evil.txt", b"evil")
            .build();
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert!(archive.by_index(0).unwrap().is_dir());
        assert_eq!(archive.by_index(1).unwrap().name(), "../evil.txt");
    }
}
