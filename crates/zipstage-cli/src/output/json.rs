//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;
use zipstage_core::ExtractionReport;
use zipstage_core::StagedDownload;

pub struct JsonFormatter;

#[derive(Serialize)]
struct FetchOutput {
    url: String,
    id: String,
    path: String,
    bytes: u64,
}

impl FetchOutput {
    fn new(url: &str, staged: &StagedDownload) -> Self {
        Self {
            url: url.to_string(),
            id: staged.id.clone(),
            path: staged.path.display().to_string(),
            bytes: staged.bytes,
        }
    }
}

#[derive(Serialize)]
struct ExtractionOutput {
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl From<&ExtractionReport> for ExtractionOutput {
    fn from(report: &ExtractionReport) -> Self {
        Self {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_fetch_result(&self, url: &str, staged: &StagedDownload) -> Result<()> {
        Self::output(&JsonOutput::success("fetch", FetchOutput::new(url, staged)))
    }

    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            "extract",
            ExtractionOutput::from(report),
        ))
    }

    fn format_find_result(&self, root: &Path, matches: &[PathBuf]) -> Result<()> {
        #[derive(Serialize)]
        struct FindOutput {
            root: String,
            count: usize,
            matches: Vec<String>,
        }

        let data = FindOutput {
            root: root.display().to_string(),
            count: matches.len(),
            matches: matches.iter().map(|p| p.display().to_string()).collect(),
        };

        Self::output(&JsonOutput::success("find", data))
    }

    fn format_get_result(
        &self,
        url: &str,
        staged: &StagedDownload,
        report: &ExtractionReport,
        kept_archive: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct GetOutput {
            download: FetchOutput,
            extraction: ExtractionOutput,
            archive_kept: bool,
        }

        let data = GetOutput {
            download: FetchOutput::new(url, staged),
            extraction: ExtractionOutput::from(report),
            archive_kept: kept_archive,
        };

        Self::output(&JsonOutput::success("get", data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_extraction_output_structure() {
        let report = ExtractionReport {
            files_extracted: 2,
            directories_created: 1,
            bytes_written: 10,
            duration: Duration::from_millis(7),
        };

        let json =
            serde_json::to_value(JsonOutput::success("extract", ExtractionOutput::from(&report)))
                .unwrap();
        assert_eq!(json["operation"], "extract");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["files_extracted"], 2);
        assert_eq!(json["data"]["duration_ms"], 7);
    }

    #[test]
    fn test_fetch_output_structure() {
        let staged = StagedDownload {
            id: "abc".to_string(),
            path: PathBuf::from("/tmp/abc.zip"),
            bytes: 3,
        };

        let json = serde_json::to_value(FetchOutput::new("http://x/a.zip", &staged)).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["path"], "/tmp/abc.zip");
        assert_eq!(json["bytes"], 3);
    }
}
