use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to load account config {path}: {source}")]
    LoadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed account config {path} at line {line}: {reason}")]
    ParseError {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("No user data directory available and no config path given")]
    DataDirError,

    #[error("Invalid account {group} with no protocol specified")]
    MissingProtocolError { group: String },

    #[error("Account {group} uses unsupported protocol {protocol}")]
    UnsupportedProtocolError { group: String, protocol: String },

    #[error("Invalid account {group} with no {field} specified")]
    MissingRequiredFieldError { group: String, field: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ImportError {
    /// Per-group conditions are recovered by the orchestrator with a
    /// warning; anything else aborts the run.
    pub fn is_group_local(&self) -> bool {
        matches!(
            self,
            ImportError::MissingProtocolError { .. }
                | ImportError::UnsupportedProtocolError { .. }
                | ImportError::MissingRequiredFieldError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
