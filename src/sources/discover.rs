//! Locating coverage files and their indices

use crate::core::{CoverageError, CoverageResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default file pattern for per-base coverage files
pub const DEFAULT_PATTERN: &str = "*.per-base.bed.gz";

/// Index suffixes htslib can load next to a data file
pub const INDEX_SUFFIXES: [&str; 2] = ["tbi", "csi"];

/// Whether `<data>.tbi` or `<data>.csi` exists
///
/// htslib chooses which of the two to load when both are present.
pub fn has_index(data: &Path) -> bool {
    INDEX_SUFFIXES.iter().any(|suffix| {
        let mut name: OsString = data.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        Path::new(&name).is_file()
    })
}

/// List files in `dir` matching `pattern`, sorted by path
pub fn discover_sources(dir: &Path, pattern: &str) -> CoverageResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CoverageError::source_unavailable(
            dir.display().to_string(),
            "not a directory",
        ));
    }

    // Only `pattern` is a glob; the directory is matched literally
    let escaped = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()));
    let full = escaped.join(pattern);
    let full = full.to_string_lossy();
    let entries = glob::glob(&full)
        .map_err(|e| CoverageError::source_unavailable(full.to_string(), e.to_string()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            CoverageError::source_unavailable(e.path().display().to_string(), e.error().to_string())
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    log::debug!("{} files match {}", paths.len(), full);
    Ok(paths)
}
