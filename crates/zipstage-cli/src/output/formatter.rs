//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use zipstage_core::ExtractionReport;
use zipstage_core::StagedDownload;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a completed download
    fn format_fetch_result(&self, url: &str, staged: &StagedDownload) -> Result<()>;

    /// Format extraction result
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()>;

    /// Format search matches
    fn format_find_result(&self, root: &Path, matches: &[PathBuf]) -> Result<()>;

    /// Format a download followed by extraction
    fn format_get_result(
        &self,
        url: &str,
        staged: &StagedDownload,
        report: &ExtractionReport,
        kept_archive: bool,
    ) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data,
        }
    }
}
