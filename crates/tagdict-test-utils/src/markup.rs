//! [`TempMarkup`] writes markup files into a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of markup files, removed on drop.
///
/// # Example
///
/// ```rust,no_run
/// use tagdict_test_utils::markup::TempMarkup;
///
/// let temp = TempMarkup::new();
/// let path = temp.write("override.xml", "<Structure><A>1</A></Structure>");
/// assert!(path.is_file());
/// ```
pub struct TempMarkup {
    temp_dir: TempDir,
}

impl Default for TempMarkup {
    fn default() -> Self {
        Self::new()
    }
}

impl TempMarkup {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` and return its absolute path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TempMarkup::write: {}: {e}", path.display()));
        path
    }
}
