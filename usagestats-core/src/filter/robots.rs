use crate::conf::{ConfigError, first_file};
use regex::{Regex, RegexSet, RegexSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// COUNTER robot list: one case-insensitive user-agent pattern per line.
#[derive(Debug, Clone)]
pub struct RobotList {
    source: Option<PathBuf>,
    patterns: RegexSet,
}

impl RobotList {
    /// Loads the list from the first file inside `dir`.
    ///
    /// Returns `None` when the directory is missing or empty, which disables
    /// robot filtering.
    pub fn discover(dir: &Path) -> Result<Option<RobotList>, ConfigError> {
        match first_file(dir)? {
            Some(path) => Ok(Some(RobotList::load(&path)?)),
            None => Ok(None),
        }
    }

    pub fn load(path: &Path) -> Result<RobotList, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let mut list = RobotList::from_lines(text.lines())?;
        list.source = Some(path.to_path_buf());
        Ok(list)
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<RobotList, ConfigError> {
        let patterns: Vec<String> = lines
            .into_iter()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(normalize_pattern)
            .collect();

        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: "robot list".to_string(),
                source: e,
            })?;

        Ok(RobotList {
            source: None,
            patterns: set,
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_bot(&self, user_agent: &str) -> bool {
        !user_agent.is_empty() && self.patterns.is_match(user_agent)
    }
}

/// Lines that are not valid patterns are matched literally.
fn normalize_pattern(line: &str) -> String {
    match Regex::new(line) {
        Ok(_) => line.to_string(),
        Err(_) => regex::escape(line),
    }
}
