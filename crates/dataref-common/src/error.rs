use std::path::PathBuf;

use thiserror::Error;

use crate::source::TextSource;

#[derive(Debug, Error)]
pub enum DatarefError {
    #[error("Could not read {origin} source {}: {reason}", .path.display())]
    SourceRead {
        origin: TextSource,
        path: PathBuf,
        reason: String,
    },

    #[error("Invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DatarefError {
    pub fn source_read(origin: TextSource, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DatarefError::SourceRead {
            origin,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DatarefError>;
