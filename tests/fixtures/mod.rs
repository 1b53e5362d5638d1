//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the karabiner-emacs binary
pub fn karabiner_emacs_bin() -> &'static str {
    env!("CARGO_BIN_EXE_karabiner-emacs")
}

/// A minimal Karabiner configuration with the marker inside the rules array.
pub const TEMPLATE: &str = r#"{
    "profiles": [
        {
            "complex_modifications": {
                // generated rules start here
                "rules": [
                    // ::commands
                ]
            },
            "name": "Default profile",
            "selected": true
        }
    ]
}
"#;

/// Writes `content` to `name` inside a fresh temp dir.
///
/// The returned `TempDir` must be kept alive for the file to exist.
pub fn create_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    (path, temp_dir)
}

/// Writes the default template into a fresh temp dir.
pub fn create_temp_template() -> (PathBuf, TempDir) {
    create_temp_file("karabiner.jsonc", TEMPLATE)
}

/// Writes a config file next to other test files.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// Writes an empty config file, so tests never read the developer's own
/// configuration.
pub fn no_config(dir: &Path) -> PathBuf {
    let path = dir.join("empty.toml");
    fs::write(&path, "").expect("Failed to write empty config");
    path
}
