//! Downloading archives into the staging area.

use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;
use tracing::instrument;

use crate::FetchConfig;
use crate::Result;
use crate::ZipstageError;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_with_buffer;
use crate::fs::Filesystem;
use crate::http::HttpClient;
use crate::http::ReqwestClient;
use crate::id::IdProvider;
use crate::id::UuidProvider;

/// A download written to the staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDownload {
    /// Identifier the staged file is named after.
    pub id: String,
    /// Full path of the staged file.
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes: u64,
}

/// Downloads URLs into uniquely named staging files.
///
/// # Examples
///
/// ```no_run
/// use zipstage_core::FetchConfig;
/// use zipstage_core::Fetcher;
/// use zipstage_core::fs::OsFs;
///
/// let fetcher = Fetcher::new(FetchConfig::default())?;
/// let staged = fetcher.fetch(&OsFs::new(), "https://example.com/test.zip")?;
/// println!("staged {} as {}", staged.id, staged.path.display());
/// # Ok::<(), zipstage_core::ZipstageError>(())
/// ```
#[derive(Debug)]
pub struct Fetcher<H = ReqwestClient, I = UuidProvider> {
    http: H,
    ids: I,
    config: FetchConfig,
}

impl Fetcher {
    /// Creates a fetcher backed by `reqwest` and random UUIDs.
    ///
    /// # Errors
    ///
    /// Returns [`ZipstageError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http = ReqwestClient::new(&config)?;
        Ok(Self::with_collaborators(http, UuidProvider, config))
    }
}

impl<H: HttpClient, I: IdProvider> Fetcher<H, I> {
    /// Creates a fetcher from explicit collaborators.
    pub fn with_collaborators(http: H, ids: I, config: FetchConfig) -> Self {
        Self { http, ids, config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Downloads `url` to `<staging_dir>/<id>.<extension>` on `fs`.
    ///
    /// Only status 200 is accepted; any other status fails before a staging
    /// file is created. The staging directory is created if missing.
    ///
    /// # Errors
    ///
    /// - [`ZipstageError::Transport`] if the request or the body read fails
    /// - [`ZipstageError::RemoteFetch`] on a non-200 status
    /// - [`ZipstageError::Storage`] if the staging file cannot be written
    #[instrument(level = "debug", skip(self, fs))]
    pub fn fetch<F: Filesystem + ?Sized>(&self, fs: &F, url: &str) -> Result<StagedDownload> {
        let response = self.http.get(url)?;
        let status = response.status();
        if status != 200 {
            return Err(ZipstageError::RemoteFetch {
                url: url.to_string(),
                status,
            });
        }

        let id = self.ids.next_id();
        let path = self.config.staged_path(&id);

        fs.create_dir_all(&self.config.staging_dir)
            .map_err(|e| ZipstageError::storage(&self.config.staging_dir, e))?;
        let output = fs
            .create(&path)
            .map_err(|e| ZipstageError::storage(&path, e))?;

        let mut body = response.into_body();
        let mut writer = BufWriter::new(output);
        let bytes =
            copy_with_buffer(&mut body, &mut writer, &mut CopyBuffer::new()).map_err(|e| match e {
                CopyError::Read(e) => ZipstageError::transport(url, e),
                CopyError::Write(e) => ZipstageError::storage(&path, e),
            })?;
        writer
            .flush()
            .map_err(|e| ZipstageError::storage(&path, e))?;

        debug!(%id, bytes, path = %path.display(), "staged download");
        Ok(StagedDownload { id, path, bytes })
    }
}
