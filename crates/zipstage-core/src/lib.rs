//! Download, safely extract, and search zip archives.
//!
//! `zipstage-core` stages a remote archive under a unique name, unpacks it
//! into a destination root while rejecting entries that would escape that
//! root (zip-slip), and finds files by base-name pattern.
//!
//! All operations go through the [`fs::Filesystem`] capability so they can
//! run against the real disk or an in-memory tree.
//!
//! # Examples
//!
//! ```no_run
//! use zipstage_core::ExtractConfig;
//! use zipstage_core::FetchConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let staged = zipstage_core::fetch("https://example.com/test.zip", &FetchConfig::default())?;
//! let report = zipstage_core::extract(&staged.path, "/out", &ExtractConfig::default())?;
//! println!("Extracted {} files", report.files_extracted);
//!
//! for path in zipstage_core::find("/out", r"(.*)\.txt")? {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod find;
pub mod fs;
pub mod http;
pub mod id;
pub mod report;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract;
pub use api::extract_with_progress;
pub use api::fetch;
pub use api::find;
pub use config::ExtractConfig;
pub use config::FetchConfig;
pub use error::Result;
pub use error::ZipstageError;
pub use fetch::Fetcher;
pub use fetch::StagedDownload;
pub use report::ExtractProgress;
pub use report::ExtractionReport;
pub use report::NoopProgress;

pub use types::ArchiveEntry;
pub use types::DestRoot;
pub use types::EntryKind;
pub use types::SafePath;
