use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Result, StreamError};

pub fn prepare_stream_dir(vehicle_folder: &Path, stream_dir: &str) -> Result<PathBuf> {
    let stream = vehicle_folder.join(stream_dir);
    fs::create_dir_all(&stream).map_err(|source| StreamError::CreateDir {
        path: stream.clone(),
        source,
    })?;
    Ok(stream)
}

/// Recognized configuration files directly inside `dir`, in rule-table
/// order. Names are compared case-insensitively and symlinks to files count
/// as files.
pub fn find_config_files(dir: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    let list_err = |source| StreamError::ListDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        let recognized = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| settings.is_config_file(name));
        if recognized && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut found: Vec<PathBuf> = Vec::with_capacity(files.len());
    for rule in &settings.config_files {
        for path in &files {
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.eq_ignore_ascii_case(&rule.file));
            if matches && !found.contains(path) {
                found.push(path.clone());
            }
        }
    }
    Ok(found)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    SameFile,
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copies `from` to `to`, carrying over permissions and timestamps. The
/// source is only ever read; copying a file onto itself is a no-op.
pub fn copy_asset(from: &Path, to: &Path) -> Result<CopyOutcome> {
    if is_same_file(from, to) {
        return Ok(CopyOutcome::SameFile);
    }
    let copy_err = |source| StreamError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    fs::copy(from, to).map_err(copy_err)?;

    let meta = fs::metadata(from).map_err(copy_err)?;
    let mut times = FileTimes::new();
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    // Read-only sources produce read-only copies.
    let dest = File::options()
        .write(true)
        .open(to)
        .or_else(|_| File::open(to))
        .map_err(copy_err)?;
    dest.set_times(times).map_err(copy_err)?;

    Ok(CopyOutcome::Copied)
}
