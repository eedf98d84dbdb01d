use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Discovery
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    //-------------------------------------------------------------------------
    // Parsing
    //-------------------------------------------------------------------------
    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Parser
    //-------------------------------------------------------------------------
    #[error("invalid access log parse pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("access log parse pattern '{pattern}' has {groups} capture groups, expected at least 5")]
    MissingCaptureGroups { pattern: String, groups: usize },

    //-------------------------------------------------------------------------
    // Geo / Catalog
    //-------------------------------------------------------------------------
    #[error("geoip is enabled but no city_db is configured")]
    MissingGeoipDb,

    #[error("failed to open geoip database {path}: {reason}")]
    InvalidGeoipDb { path: PathBuf, reason: String },

    #[error("duplicate journal path '{path}' in catalog")]
    DuplicateJournal { path: String },

    #[error("catalog entry {kind} {id} references unknown {parent} {parent_id}")]
    DanglingCatalogEntry {
        kind: &'static str,
        id: u64,
        parent: &'static str,
        parent_id: u64,
    },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
