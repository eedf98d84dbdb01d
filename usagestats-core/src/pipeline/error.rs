use crate::conf::ConfigError;
use crate::parse::InvalidEntry;
use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that reject a whole file.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to open {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path} at line {line}")]
    ReadLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid entry in {path} at line {line}: {reason}")]
    InvalidEntry {
        path: PathBuf,
        line: usize,
        reason: InvalidEntry,
    },
}

impl ProcessError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ProcessError::OpenFile { path, .. }
            | ProcessError::ReadLine { path, .. }
            | ProcessError::InvalidEntry { path, .. } => path,
        }
    }
}

/// Failures while assembling a pipeline from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
