use crate::conf::error::ConfigError;
use glob::glob;
use std::path::{Path, PathBuf};

/// Discovers files matching a glob pattern.
///
/// Searches the filesystem for all files that match the given glob pattern
/// and returns their paths in sorted order. Invalid paths are silently filtered out.
///
/// # Errors
///
/// Returns `ConfigError::Glob` if the pattern is malformed or cannot be parsed.
pub fn discover(root: &Path, glob_pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let pattern = &resolve_glob(root, glob_pattern);
    let mut paths: Vec<_> = glob(pattern)
        .map_err(|e| ConfigError::Glob {
            pattern: pattern.to_string(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

/// Returns the first regular file (by name) inside `dir`, if the directory exists
/// and holds any. Used to locate single-file resources such as the robot list.
pub fn first_file(dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    if !dir.is_dir() {
        return Ok(None);
    }

    Ok(discover(dir, "*")?.into_iter().next())
}

/// Joins the given `pattern` to the `root` path and returns it as a string.
pub fn resolve_glob(root: &Path, pattern: &str) -> String {
    root.join(pattern).to_string_lossy().into_owned()
}
