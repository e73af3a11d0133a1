use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::domain::{AssetPair, FolderReport, sanitize_name};
use crate::error::Result;
use crate::extract::NameExtractor;
use crate::fs::{CopyOutcome, copy_asset, prepare_stream_dir};

/// Fills the stream directory of one vehicle folder with the assets its
/// configuration files name. `config_files` are the recognized files found
/// directly in the folder. Missing assets and failed copies are counted in
/// the report; only failing to prepare the folder itself is an error.
pub fn process_vehicle_folder(
    vehicle_folder: &Path,
    config_files: &[PathBuf],
    source_dir: &Path,
    settings: &Settings,
    extractor: &NameExtractor,
) -> Result<FolderReport> {
    let stream = prepare_stream_dir(vehicle_folder, &settings.stream_dir)?;

    let mut names = BTreeSet::new();
    for config_path in config_files {
        names.extend(extractor.extract_names(config_path));
    }

    let mut report = FolderReport {
        folder: vehicle_folder.to_path_buf(),
        ..Default::default()
    };

    if names.is_empty() {
        let folder_name = vehicle_folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!(
            "No model names found in config files, using folder name: {}",
            folder_name
        );
        names.insert(folder_name);
        report.used_fallback = true;
    }

    for name in &names {
        let clean = sanitize_name(name);
        report.names.push(clean.clone());

        let pair = AssetPair::resolve(source_dir, &clean, &settings.asset_extensions);
        for (source, ext) in pair.files.iter().zip(&settings.asset_extensions) {
            if !source.is_file() {
                tracing::warn!("Missing {} file: {}", ext.to_uppercase(), source.display());
                report.missing += 1;
                continue;
            }
            let dest = stream.join(format!("{clean}.{ext}"));
            match copy_asset(source, &dest) {
                Ok(CopyOutcome::Copied) => {
                    tracing::info!("Copied: {} -> {}", source.display(), dest.display());
                    report.copied += 1;
                }
                Ok(CopyOutcome::SameFile) => {
                    tracing::debug!("Already in place: {}", dest.display());
                }
                Err(e) => {
                    tracing::error!("{e}");
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::find_config_files;
    use std::fs;
    use tempfile::TempDir;

    fn run(folder: &Path, source: &Path) -> FolderReport {
        let settings = Settings::default();
        let extractor = NameExtractor::new(&settings.config_files).unwrap();
        let config_files = find_config_files(folder, &settings).unwrap();
        process_vehicle_folder(folder, &config_files, source, &settings, &extractor).unwrap()
    }

    #[test]
    fn names_from_all_config_files_are_pooled() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("pack");
        let source = tmp.path().join("assets");
        fs::create_dir_all(&folder).unwrap();
        fs::create_dir_all(&source).unwrap();
        fs::write(folder.join("vehicles.meta"), "<modelName>adder</modelName>").unwrap();
        fs::write(folder.join("carcols.meta"), "<modelName>adder</modelName>").unwrap();
        fs::write(folder.join("handling.meta"), "<handlingName>ADDER_H</handlingName>").unwrap();
        fs::write(source.join("adder.yft"), b"model").unwrap();

        let report = run(&folder, &source);
        assert_eq!(report.names, vec!["ADDER_H", "adder"]);
        assert!(!report.used_fallback);
        assert_eq!(report.copied, 1);
        assert_eq!(report.missing, 3);
        assert_eq!(fs::read(folder.join("stream/adder.yft")).unwrap(), b"model");
    }

    #[test]
    fn folder_name_is_the_fallback_candidate() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("comet");
        let source = tmp.path().join("assets");
        fs::create_dir_all(&folder).unwrap();
        fs::create_dir_all(&source).unwrap();
        fs::write(folder.join("carvariations.meta"), "<Item></Item>").unwrap();
        fs::write(source.join("comet.ytd"), b"tex").unwrap();

        let report = run(&folder, &source);
        assert!(report.used_fallback);
        assert_eq!(report.names, vec!["comet"]);
        assert_eq!(report.copied, 1);
        assert!(folder.join("stream/comet.ytd").is_file());
    }

    #[test]
    fn unreadable_config_does_not_stop_siblings() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("pack");
        let source = tmp.path().join("assets");
        fs::create_dir_all(&folder).unwrap();
        fs::create_dir_all(&source).unwrap();
        fs::write(folder.join("vehicles.meta"), [0xffu8, 0xfe, 0xc3]).unwrap();
        fs::write(folder.join("vehiclelayouts.meta"), "<layoutName>LAYOUT_X</layoutName>")
            .unwrap();

        let report = run(&folder, &source);
        assert_eq!(report.names, vec!["LAYOUT_X"]);
        assert!(!report.used_fallback);
    }

    #[test]
    fn name_with_no_usable_characters_is_still_looked_up() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("pack");
        let source = tmp.path().join("assets");
        fs::create_dir_all(&folder).unwrap();
        fs::create_dir_all(&source).unwrap();
        fs::write(folder.join("vehicles.meta"), "<modelName>!!!</modelName>").unwrap();

        let report = run(&folder, &source);
        assert_eq!(report.names, vec![""]);
        assert_eq!(report.missing, 2);
        assert_eq!(report.copied, 0);
        assert!(folder.join("stream").is_dir());
    }

    #[test]
    fn special_characters_are_stripped_before_lookup() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("pack");
        let source = tmp.path().join("assets");
        fs::create_dir_all(&folder).unwrap();
        fs::create_dir_all(&source).unwrap();
        fs::write(folder.join("handling.meta"), "<handlingName>Banshee!!</handlingName>").unwrap();

        let report = run(&folder, &source);
        assert_eq!(report.names, vec!["Banshee"]);
        assert_eq!(report.missing, 2);
        assert_eq!(fs::read_dir(folder.join("stream")).unwrap().count(), 0);
    }
}
