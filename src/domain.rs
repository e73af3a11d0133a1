use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Maps a recognized configuration file name to the tag whose text holds the
/// model, handling or layout names.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigRule {
    pub file: String,
    pub tag: String,
}

impl ConfigRule {
    pub fn new(file: &str, tag: &str) -> Self {
        Self {
            file: file.to_string(),
            tag: tag.to_string(),
        }
    }
}

const DEFAULT_RULES: [(&str, &str); 5] = [
    ("handling.meta", "handlingName"),
    ("carcols.meta", "modelName"),
    ("carvariations.meta", "modelName"),
    ("vehiclelayouts.meta", "layoutName"),
    ("vehicles.meta", "modelName"),
];

pub fn default_config_rules() -> Vec<ConfigRule> {
    DEFAULT_RULES
        .iter()
        .map(|(file, tag)| ConfigRule::new(file, tag))
        .collect()
}

pub fn default_asset_extensions() -> Vec<String> {
    vec!["yft".to_string(), "ytd".to_string()]
}

/// Strips everything outside `[A-Za-z0-9_]`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// The asset files a sanitized name resolves to in the source directory,
/// one per configured extension. Each file is independently optional.
#[derive(Debug, Clone)]
pub struct AssetPair {
    pub name: String,
    pub files: Vec<PathBuf>,
}

impl AssetPair {
    pub fn resolve(source_dir: &Path, name: &str, extensions: &[String]) -> Self {
        let files = extensions
            .iter()
            .map(|ext| source_dir.join(format!("{name}.{ext}")))
            .collect();
        Self {
            name: name.to_string(),
            files,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub names: Vec<String>,
    pub used_fallback: bool,
    pub copied: usize,
    pub missing: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub folders_processed: usize,
    pub folders_failed: usize,
    pub files_copied: usize,
    pub files_missing: usize,
    pub copy_failures: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &FolderReport) {
        self.folders_processed += 1;
        self.files_copied += report.copied;
        self.files_missing += report.missing;
        self.copy_failures += report.failed;
    }
}
