use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

const FILE_PREFIX: &str = "activities_";
const FILE_SUFFIX: &str = ".csv";

/// Matches `activities_<suffix>.csv` with a non-empty suffix.
pub fn is_source_file_name(name: &str) -> bool {
    name.strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
        .is_some_and(|suffix| !suffix.is_empty())
}

/// Lists source files in `directory`, sorted by name.
///
/// Dated file names make this chronological. A directory that cannot be read
/// yields no files.
pub fn discover_files(directory: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(error) => {
            warn!("Could not list source directory [{}]: {error}", directory.display());
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_source_file_name)
        })
        .collect();

    files.sort();
    files
}
