//! Error types for tagdict-markup

use std::path::PathBuf;

/// Result type for tagdict-markup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading markup
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse markup from {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
