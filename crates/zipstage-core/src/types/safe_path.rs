//! Validated output path for an archive entry.

use std::path::Path;
use std::path::PathBuf;

use super::DestRoot;
use crate::Result;
use crate::ZipstageError;
use crate::security::normalize_path;

/// Absolute output path proven to lie under a [`DestRoot`].
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`SafePath::resolve`]
/// - NO `From<PathBuf>` implementation
/// - Containment is checked component-wise, so `/out` never accepts
///   `/outside/...`
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::types::DestRoot;
/// use zipstage_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = DestRoot::new("/out")?;
///
/// let safe = SafePath::resolve(Path::new("docs/../notes.txt"), &root)?;
/// assert_eq!(safe.as_path(), Path::new("/out/notes.txt"));
///
/// assert!(SafePath::resolve(Path::new("../../etc/passwd"), &root).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath {
    path: PathBuf,
    depth: usize,
}

impl SafePath {
    /// Joins `entry` onto `root`, normalizes the result and checks that it
    /// stays under the root.
    ///
    /// `..` segments are allowed as long as they never leave the root.
    /// Absolute entry names replace the root when joined and are therefore
    /// only accepted if they already point inside it; `/notes.txt` is
    /// rejected rather than rebased under the root.
    ///
    /// # Errors
    ///
    /// Returns `PathTraversal` naming `entry` if the resolved path escapes the
    /// root or the name contains a null byte.
    pub fn resolve(entry: &Path, root: &DestRoot) -> Result<Self> {
        if has_null_bytes(entry) {
            return Err(ZipstageError::PathTraversal {
                path: entry.to_path_buf(),
            });
        }

        let candidate = normalize_path(&root.as_path().join(entry));
        let Ok(relative) = candidate.strip_prefix(root.as_path()) else {
            return Err(ZipstageError::PathTraversal {
                path: entry.to_path_buf(),
            });
        };
        let depth = relative.components().count();

        Ok(Self {
            path: candidate,
            depth,
        })
    }

    /// Returns `true` if the path is the destination root itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Number of components below the destination root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the absolute output path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}
