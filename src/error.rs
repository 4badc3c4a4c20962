use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Every way a generation run can fail. None of these are recovered from.
#[derive(Debug, Error)]
pub enum AckError {
    #[error("Could not find license for {name}")]
    NotFound { name: String },

    #[error("Timed out after {timeout:?} resolving license for {name}")]
    Timeout { name: String, timeout: Duration },

    #[error("Failed to access {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Formatting failed: {0}")]
    Formatting(String),

    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl AckError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AckError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AckError::Parse {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AckError>;
