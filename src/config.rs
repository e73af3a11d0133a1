use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::{ConfigRule, default_asset_extensions, default_config_rules};
use crate::error::{Result, StreamError};

fn default_stream_dir() -> String {
    "stream".to_string()
}

/// Run settings. Every key is optional in the YAML file; omitted keys keep
/// the built-in defaults.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub stream_dir: String,
    pub asset_extensions: Vec<String>,
    pub config_files: Vec<ConfigRule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stream_dir: default_stream_dir(),
            asset_extensions: default_asset_extensions(),
            config_files: default_config_rules(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| StreamError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| StreamError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut settings: Settings = serde_yaml::from_str(raw)?;
        settings
            .asset_extensions
            .iter_mut()
            .for_each(|ext| *ext = ext.trim_start_matches('.').to_string());
        Ok(settings)
    }

    /// Whether `file_name` is one of the recognized configuration files.
    pub fn is_config_file(&self, file_name: &str) -> bool {
        self.config_files
            .iter()
            .any(|rule| rule.file.eq_ignore_ascii_case(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings = Settings::from_yaml("stream_dir: out\nasset_extensions: [.yft]\n").unwrap();
        assert_eq!(settings.stream_dir, "out");
        assert_eq!(settings.asset_extensions, vec!["yft".to_string()]);
        assert_eq!(settings.config_files, default_config_rules());
    }

    #[test]
    fn custom_config_files_replace_the_table() {
        let yaml = "config_files:\n  - file: weapons.meta\n    tag: Name\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.config_files, vec![ConfigRule::new("weapons.meta", "Name")]);
        assert!(settings.is_config_file("WEAPONS.META"));
        assert!(!settings.is_config_file("vehicles.meta"));
    }

    #[test]
    fn config_file_match_ignores_case() {
        let settings = Settings::default();
        assert!(settings.is_config_file("Vehicles.meta"));
        assert!(settings.is_config_file("HANDLING.META"));
        assert!(!settings.is_config_file("vehicles.meta.bak"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, StreamError::ConfigRead { .. }));
    }
}
