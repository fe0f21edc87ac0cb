//! Normalized destination root.

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::ZipstageError;
use crate::security::normalize_path;

/// The directory every extracted entry must land under.
///
/// The root is made absolute against the current directory and lexically
/// normalized (`.` dropped, `..` folded). It does not have to exist yet, and
/// no symlinks are resolved, so the same root works against any
/// [`Filesystem`](crate::fs::Filesystem).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::types::DestRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = DestRoot::new("/srv/./out/../out")?;
/// assert_eq!(root.as_path(), Path::new("/srv/out"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestRoot(PathBuf);

impl DestRoot {
    /// Normalizes `path` into a destination root.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the path is empty or the current directory cannot
    /// be determined for a relative path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| ZipstageError::storage(path, e))?;
        Ok(Self(normalize_path(&absolute)))
    }

    /// Returns the normalized root.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
