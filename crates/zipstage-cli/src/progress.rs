//! Progress bar for extraction.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use std::path::Path;
use zipstage_core::ExtractProgress;

/// CLI progress bar implementing `ExtractProgress`.
///
/// The entry count is only known once the archive index has been read, so
/// the bar length is set from the first callback. Bytes written are shown in
/// the message. Cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    label: String,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a new progress bar labelled with `label` (e.g. "Extracting").
    #[must_use]
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Extracting 15.2 MB [████████░░░░] 42/100 entries (12s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} entries ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_duration(state.eta())).unwrap_or(());
                })
                .progress_chars("█▓░"),
        );
        bar.set_message(label.to_string());

        Self {
            bar,
            label: label.to_string(),
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ExtractProgress for CliProgress {
    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar
            .set_message(format!("{} {}", self.label, humanize_bytes(self.bytes_written)));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Converts duration to human-readable format.
fn humanize_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(512), "512 B");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(humanize_bytes(1024_u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration(Duration::from_secs(30)), "30s");
        assert_eq!(humanize_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(humanize_duration(Duration::from_secs(3661)), "1h1m");
    }

    #[test]
    fn test_progress_tracks_entries_and_bytes() {
        let mut progress = CliProgress::new("Testing");

        progress.on_entry_start(Path::new("a.txt"), 2, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete(Path::new("a.txt"));
        progress.on_entry_start(Path::new("b.txt"), 2, 2);
        progress.on_bytes_written(512);
        progress.on_entry_complete(Path::new("b.txt"));

        assert_eq!(progress.bytes_written, 1536);
        assert_eq!(progress.bar.length(), Some(2));
        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.message(), "Testing 1.5 KB");
    }
}
