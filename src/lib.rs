use crate::config::Settings;
use crate::domain::RunSummary;
use crate::error::{Result, StreamError};
use crate::extract::NameExtractor;
use crate::fs::find_config_files;
use crate::process::process_vehicle_folder;
use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fs;
pub mod logging;
pub mod process;
pub mod prompt;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder containing the vehicle folders (prompted for when omitted)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Folder containing the .yft and .ytd files (prompted for when omitted)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Optional YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_wait: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

pub fn validate_dirs(root: &Path, source: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(StreamError::InvalidRoot(root.to_path_buf()));
    }
    if !source.is_dir() {
        return Err(StreamError::InvalidSource(source.to_path_buf()));
    }
    Ok(())
}

/// Walks `root` and processes every vehicle folder found, `root` included.
/// Failures inside one folder are logged and the walk moves on.
pub fn run(root: &Path, source: &Path, settings: &Settings) -> Result<RunSummary> {
    validate_dirs(root, source)?;
    let extractor = NameExtractor::new(&settings.config_files)?;
    let mut summary = RunSummary::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::error!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();

        let config_files = match find_config_files(dir, settings) {
            Ok(files) if files.is_empty() => {
                tracing::debug!("No config files in {}", dir.display());
                continue;
            }
            Ok(files) => files,
            Err(e) => {
                tracing::error!("{e}");
                continue;
            }
        };

        tracing::info!("Processing: {}", dir.display());
        match process_vehicle_folder(dir, &config_files, source, settings, &extractor) {
            Ok(report) => summary.record(&report),
            Err(e) => {
                tracing::error!("Failed to process {}: {e}", dir.display());
                summary.folders_failed += 1;
            }
        }
    }

    Ok(summary)
}
