//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipstage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download an archive into the staging directory
    Fetch(FetchArgs),
    /// Extract a zip archive
    Extract(ExtractArgs),
    /// Find files whose name matches a regular expression
    Find(FindArgs),
    /// Download and extract an archive in one step
    Get(GetArgs),
}

#[derive(clap::Args)]
pub struct StagingArgs {
    /// Directory for downloaded archives (default: system temp directory)
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

#[derive(clap::Args)]
pub struct PermissionArgs {
    /// Ignore Unix modes recorded in the archive
    #[arg(long)]
    pub no_preserve_permissions: bool,

    /// Octal mode for files without a recorded Unix mode
    #[arg(long, value_name = "MODE", default_value = "644", value_parser = parse_mode)]
    pub default_mode: u32,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    /// URL of the archive
    #[arg(value_name = "URL")]
    pub url: String,

    #[command(flatten)]
    pub staging: StagingArgs,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the zip archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub permissions: PermissionArgs,
}

#[derive(clap::Args)]
pub struct FindArgs {
    /// Directory to search
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Regular expression matched against base names
    #[arg(value_name = "PATTERN")]
    pub pattern: String,
}

#[derive(clap::Args)]
pub struct GetArgs {
    /// URL of the archive
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Keep the downloaded archive in the staging directory
    #[arg(long)]
    pub keep_archive: bool,

    #[command(flatten)]
    pub staging: StagingArgs,

    #[command(flatten)]
    pub permissions: PermissionArgs,
}

/// Parse an octal permission mode such as `644`, `0644` or `0o755`.
fn parse_mode(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let digits = s.strip_prefix("0o").unwrap_or(s);
    if digits.is_empty() {
        return Err("empty mode".to_string());
    }

    let mode = u32::from_str_radix(digits, 8).map_err(|_| format!("invalid octal mode: {s}"))?;
    if mode > 0o777 {
        return Err(format!("mode out of range: {s}"));
    }
    Ok(mode)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("644").unwrap(), 0o644);
        assert_eq!(parse_mode("0755").unwrap(), 0o755);
        assert_eq!(parse_mode("0o600").unwrap(), 0o600);
        assert!(parse_mode("").is_err());
        assert!(parse_mode("0o").is_err());
        assert!(parse_mode("888").is_err());
        assert!(parse_mode("1777").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_get_args_parse() {
        let cli = Cli::try_parse_from([
            "zipstage",
            "get",
            "https://example.com/test.zip",
            "out",
            "--staging-dir",
            "/tmp/stage",
            "--timeout",
            "5",
            "--default-mode",
            "600",
        ])
        .unwrap();

        let Commands::Get(args) = cli.command else {
            panic!("expected get command");
        };
        assert_eq!(args.url, "https://example.com/test.zip");
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.staging.staging_dir, Some(PathBuf::from("/tmp/stage")));
        assert_eq!(args.staging.timeout, 5);
        assert_eq!(args.permissions.default_mode, 0o600);
        assert!(!args.keep_archive);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["zipstage", "fetch", "http://x/a.zip", "--timeout", "0"]);
        assert!(result.is_err());
    }
}
