//! Error types for tagdict-core

use std::path::PathBuf;

/// Result type for tagdict-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a tag dictionary
///
/// Everything except [`Error::KeyNotFound`] and [`Error::LoginNotFound`] is
/// raised during construction and aborts it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Markup that parsed but does not have the expected element shape
    #[error("Malformed source {origin}: {message}")]
    MalformedSource { origin: String, message: String },

    /// A label group shares its name with a scalar tag
    #[error("Tag '{name}' is defined both as a property and as a label group")]
    NameCollision { name: String },

    /// A `{Name}` template token with no matching tag
    #[error("Tag '{key}' references unknown tag '{{{reference}}}'")]
    UnresolvedReference { key: String, reference: String },

    /// Template values that transitively reference themselves
    #[error("Substitution cycle: {}", .chain.join(" -> "))]
    SubstitutionCycle { chain: Vec<String> },

    /// Template expansion nested deeper than the configured limit
    #[error("Substitution of tag '{key}' exceeded the depth limit of {limit}")]
    SubstitutionTooDeep { key: String, limit: usize },

    /// Lookup of a tag absent from a built dictionary
    #[error("Tag not found: {key}")]
    KeyNotFound { key: String },

    /// Lookup of a database login absent from a built dictionary
    #[error("Database login not found: {name}")]
    LoginNotFound { name: String },

    #[error("Failed to parse {format} settings at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported settings format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Markup that could not be read or parsed at all
    #[error(transparent)]
    Markup(#[from] tagdict_markup::Error),
}

impl Error {
    pub fn malformed(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSource {
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

    /// True for the recoverable failures raised by lookups on a built dictionary.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::LoginNotFound { .. })
    }
}
