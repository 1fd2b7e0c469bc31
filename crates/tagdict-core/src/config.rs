//! Resolution settings
//!
//! Settings tune how a dictionary is built. They can be constructed in code or
//! loaded from a file whose format is detected from its extension:
//! - `.toml` -> TOML
//! - `.json` -> JSON
//! - `.yaml`, `.yml` -> YAML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Default bound on nested template expansion
pub const DEFAULT_MAX_SUBSTITUTION_DEPTH: usize = 64;

/// Settings applied while building a [`TagDictionary`](crate::TagDictionary)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Longest chain of `{Name}` references followed before giving up
    pub max_substitution_depth: usize,

    /// Trim surrounding whitespace from markup text values. When off, a
    /// whitespace-only value is kept as written.
    pub trim_text: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_substitution_depth: DEFAULT_MAX_SUBSTITUTION_DEPTH,
            trim_text: true,
        }
    }
}

impl Settings {
    /// Load settings from a file, detecting the format from its extension.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        let format = match extension.as_str() {
            "toml" | "json" | "yaml" | "yml" => extension.as_str(),
            _ => {
                return Err(Error::UnsupportedFormat {
                    extension: extension.clone(),
                });
            }
        };

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(?path, format, "Loading settings");

        match format {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string())),
            _ => serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.max_substitution_depth, DEFAULT_MAX_SUBSTITUTION_DEPTH);
        assert!(settings.trim_text);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.ini");
        std::fs::write(&path, "max_substitution_depth = 3").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
    }

    #[test]
    fn load_keeps_defaults_for_missing_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "trim_text = false\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(!settings.trim_text);
        assert_eq!(settings.max_substitution_depth, DEFAULT_MAX_SUBSTITUTION_DEPTH);
    }
}
