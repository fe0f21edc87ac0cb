//! Path traversal validation.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::types::DestRoot;
use crate::types::SafePath;

/// Lexically normalizes a path.
///
/// `.` components are dropped and `..` removes the preceding normal
/// component. A `..` directly under the filesystem root stays at the root;
/// leading `..` in a relative path are kept. The filesystem is never
/// consulted, so symlinks are not resolved.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::security::normalize_path;
///
/// assert_eq!(normalize_path(Path::new("/out/a/../b/./c")), Path::new("/out/b/c"));
/// assert_eq!(normalize_path(Path::new("/..")), Path::new("/"));
/// assert_eq!(normalize_path(Path::new("../x/..")), Path::new(".."));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    normalized.push("..");
                }
            },
        }
    }

    normalized
}

/// Checks that an archive entry name stays under `destination` once joined.
///
/// Both sides are made absolute and normalized before comparing them
/// component-wise. Returns the absolute output path on success.
///
/// # Errors
///
/// - `PathTraversal` if the entry escapes the destination
/// - `Storage` if the destination cannot be made absolute
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::security::sanitize_extract_path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let out = sanitize_extract_path(Path::new("fake.file"), Path::new("/srv/fakePath"))?;
/// assert_eq!(out, Path::new("/srv/fakePath/fake.file"));
///
/// assert!(sanitize_extract_path(Path::new("../../fake.file"), Path::new("/srv/fakePath")).is_err());
/// # Ok(())
/// # }
/// ```
pub fn sanitize_extract_path(entry: &Path, destination: &Path) -> Result<PathBuf> {
    let root = DestRoot::new(destination)?;
    SafePath::resolve(entry, &root).map(SafePath::into_path_buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ZipstageError;

    #[test]
    fn test_sanitize_relative_destination_pass() {
        assert!(sanitize_extract_path(Path::new("fake.file"), Path::new("fakePath")).is_ok());
    }

    #[test]
    fn test_sanitize_relative_destination_fail() {
        let result = sanitize_extract_path(Path::new("../../fake.file"), Path::new("fakePath"));
        assert!(matches!(result, Err(ZipstageError::PathTraversal { .. })));
    }

    #[test]
    fn test_sanitize_destination_with_dot_segments() {
        let out = sanitize_extract_path(Path::new("x.txt"), Path::new("/a/./b/../out")).unwrap();
        assert_eq!(out, Path::new("/a/out/x.txt"));
    }

    #[test]
    fn test_sanitize_string_prefix_sibling() {
        // A char-wise prefix check would accept this.
        let result = sanitize_extract_path(Path::new("../outside/x"), Path::new("/out"));
        assert!(matches!(result, Err(ZipstageError::PathTraversal { .. })));
    }

    #[test]
    fn test_sanitize_relative_destination_internal_parent() {
        let out = sanitize_extract_path(Path::new("a/../b.txt"), Path::new("dest")).unwrap();
        assert!(out.ends_with("dest/b.txt"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b")), Path::new("a/b"));
        assert_eq!(normalize_path(Path::new("a/b/..")), Path::new("a"));
        assert_eq!(normalize_path(Path::new("a/../..")), Path::new(".."));
        assert_eq!(normalize_path(Path::new("/a/../../b")), Path::new("/b"));
        assert_eq!(normalize_path(Path::new("")), Path::new(""));
    }
}
