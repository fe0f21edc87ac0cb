//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use std::path::PathBuf;
use zipstage_core::ExtractionReport;
use zipstage_core::StagedDownload;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn write_staged(&self, staged: &StagedDownload) {
        let _ = self
            .term
            .write_line(&format!("  Staged as: {}", staged.path.display()));
        let _ = self.term.write_line(&format!(
            "  Downloaded: {}",
            Self::format_size(staged.bytes)
        ));
        if self.verbose {
            let _ = self.term.write_line(&format!("  Id: {}", staged.id));
        }
    }

    fn write_report(&self, report: &ExtractionReport) {
        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_fetch_result(&self, url: &str, staged: &StagedDownload) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Downloaded {url}"));
        self.write_staged(staged);
        Ok(())
    }

    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Extraction complete");
        self.write_report(report);
        Ok(())
    }

    fn format_find_result(&self, root: &Path, matches: &[PathBuf]) -> Result<()> {
        // Matches are the result itself, so they are printed even when quiet.
        for path in matches {
            let _ = self.term.write_line(&format!("{}", path.display()));
        }

        if matches.is_empty() && !self.quiet {
            let _ = self
                .term
                .write_line(&format!("No matches under {}", root.display()));
        } else if self.verbose {
            let _ = self.term.write_line(&format!("{} matches", matches.len()));
        }

        Ok(())
    }

    fn format_get_result(
        &self,
        url: &str,
        staged: &StagedDownload,
        report: &ExtractionReport,
        kept_archive: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Downloaded and extracted {url}"));
        self.write_report(report);
        if kept_archive {
            self.write_staged(staged);
        }
        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(HumanFormatter::format_size(1024), "1.0 KB");
        assert_eq!(HumanFormatter::format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024 * 1024), "2.0 GB");
    }
}
