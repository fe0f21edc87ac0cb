//! Subcommand implementations.

pub mod extract;
pub mod fetch;
pub mod find;
pub mod get;

use crate::cli::PermissionArgs;
use crate::cli::StagingArgs;
use anyhow::Context;
use anyhow::Result;
use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use zipstage_core::ExtractConfig;
use zipstage_core::FetchConfig;

fn fetch_config(args: &StagingArgs) -> FetchConfig {
    let config = FetchConfig::default().with_timeout(Duration::from_secs(args.timeout));
    match &args.staging_dir {
        Some(dir) => config.with_staging_dir(dir),
        None => config,
    }
}

fn extract_config(args: &PermissionArgs) -> ExtractConfig {
    ExtractConfig::default()
        .with_preserve_permissions(!args.no_preserve_permissions)
        .with_default_file_mode(args.default_mode)
}

fn output_dir(dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => env::current_dir().context("failed to get current directory"),
    }
}
