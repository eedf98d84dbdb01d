use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read metrics store {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write metrics store {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in {path} at line {line}")]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode metric record")]
    Encode(#[from] serde_json::Error),

    #[error("metrics store is unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Write {
            path: path.into(),
            source,
        }
    }
}
