//! Configuration for fetch and extract operations.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Default permission bits for extracted files without a recorded Unix mode.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Mask applied to recorded modes: only permission bits survive.
pub const PERMISSION_BITS: u32 = 0o777;

/// Configuration for downloading archives into the staging area.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use zipstage_core::FetchConfig;
///
/// let config = FetchConfig::default()
///     .with_staging_dir("/var/tmp/zipstage")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(
///     config.staged_path("abc"),
///     std::path::PathBuf::from("/var/tmp/zipstage/abc.zip")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Directory where downloads are staged.
    pub staging_dir: PathBuf,

    /// Extension appended to the identifier to form the staged file name.
    pub extension: String,

    /// Request timeout for the default HTTP client.
    pub timeout: Duration,

    /// User agent sent by the default HTTP client.
    pub user_agent: String,
}

impl Default for FetchConfig {
    /// Default values:
    /// - `staging_dir`: the system temporary directory
    /// - `extension`: `zip`
    /// - `timeout`: 30 seconds
    /// - `user_agent`: `zipstage/<version>`
    fn default() -> Self {
        Self {
            staging_dir: std::env::temp_dir(),
            extension: "zip".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("zipstage/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Sets the staging directory.
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.staging_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the staged file path for an identifier.
    #[must_use]
    pub fn staged_path(&self, id: &str) -> PathBuf {
        self.staging_dir.join(format!("{id}.{}", self.extension))
    }
}

/// Configuration for archive extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Apply the permission bits recorded in the archive to extracted files.
    pub preserve_permissions: bool,

    /// Mode used when the entry records none or preservation is off.
    pub default_file_mode: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            default_file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl ExtractConfig {
    /// Enables or disables permission preservation.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets the fallback file mode.
    #[must_use]
    pub fn with_default_file_mode(mut self, mode: u32) -> Self {
        self.default_file_mode = mode & PERMISSION_BITS;
        self
    }

    /// Resolves the mode for a file entry from the mode recorded in the archive.
    #[must_use]
    pub fn file_mode(&self, recorded: Option<u32>) -> u32 {
        match recorded {
            Some(mode) if self.preserve_permissions => mode & PERMISSION_BITS,
            _ => self.default_file_mode & PERMISSION_BITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fetch_config() {
        let config = FetchConfig::default();
        assert_eq!(config.staging_dir, std::env::temp_dir());
        assert_eq!(config.extension, "zip");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("zipstage/"));
    }

    #[test]
    fn test_staged_path() {
        let config = FetchConfig::default().with_staging_dir("/tmp");
        assert_eq!(
            config.staged_path("0f3e"),
            PathBuf::from("/tmp/0f3e.zip")
        );
    }

    #[test]
    fn test_file_mode_preserved() {
        let config = ExtractConfig::default();
        // Regular file type bits are stripped.
        assert_eq!(config.file_mode(Some(0o100_755)), 0o755);
        assert_eq!(config.file_mode(None), DEFAULT_FILE_MODE);
    }

    #[test]
    fn test_file_mode_not_preserved() {
        let config = ExtractConfig::default()
            .with_preserve_permissions(false)
            .with_default_file_mode(0o600);
        assert_eq!(config.file_mode(Some(0o777)), 0o600);
        assert_eq!(config.file_mode(None), 0o600);
    }
}
