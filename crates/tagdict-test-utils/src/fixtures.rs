//! Access to the shared markup fixtures in `test-fixtures/markup/`.

use std::fs;
use std::path::PathBuf;

/// Fixture with generic values, login records, and a single `GDS` group.
pub const STRUCTURE: &str = "structure.xml";

/// Fixture with `myId` overrides, two `GDS` instances and templated logins.
pub const WEBSERVICE_STRUCTURE: &str = "webservice-structure.xml";

/// Directory holding the markup fixtures.
pub fn markup_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test-fixtures")
        .join("markup")
}

/// Absolute path of a markup fixture.
pub fn markup_path(name: &str) -> PathBuf {
    markup_dir().join(name)
}

/// Contents of a markup fixture.
///
/// Panics if the fixture is missing.
pub fn markup_text(name: &str) -> String {
    let path = markup_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixtures::markup_text: cannot read {}: {e}", path.display()))
}
