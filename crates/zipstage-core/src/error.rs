//! Error types for fetch, extract and find operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ZipstageError`.
pub type Result<T> = std::result::Result<T, ZipstageError>;

/// Boxed error used for transport failures coming from the HTTP collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while fetching, extracting or searching.
#[derive(Error, Debug)]
pub enum ZipstageError {
    /// The HTTP request could not be performed or its body could not be read.
    #[error("transport error for '{url}': {source}")]
    Transport {
        /// URL being fetched.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: BoxError,
    },

    /// The remote server answered with a status other than 200.
    #[error("remote fetch of '{url}' failed: received non 200 response code {status}")]
    RemoteFetch {
        /// URL being fetched.
        url: String,
        /// Status code received.
        status: u16,
    },

    /// Local read, write or remove failure.
    #[error("storage error at {path}: {source}")]
    Storage {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be parsed, or an entry could not be decoded.
    #[error("invalid archive {path}: {source}")]
    ArchiveOpen {
        /// Path of the archive.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// An archive entry resolves outside the destination root.
    #[error("path traversal detected: {path}: illegal file path")]
    PathTraversal {
        /// The entry name as stored in the archive.
        path: PathBuf,
    },

    /// The search expression is not a valid regular expression.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The directory walk could not be started or completed.
    #[error("cannot walk {path}: {source}")]
    Walk {
        /// Root of the walk.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ZipstageError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zipstage_core::ZipstageError;
    ///
    /// let err = ZipstageError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }

    /// Returns the HTTP status carried by a `RemoteFetch` error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteFetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the local path involved in the failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Storage { path, .. }
            | Self::ArchiveOpen { path, .. }
            | Self::PathTraversal { path }
            | Self::Walk { path, .. } => Some(path),
            Self::Transport { .. } | Self::RemoteFetch { .. } | Self::Pattern(_) => None,
        }
    }
}
