//! Configuration management for the application.
//!
//! This module handles loading and validating the optional TOML configuration
//! with platform-specific directory resolution. Every field has a default, so
//! running without a config file is the normal case.

use crate::constants::CONFIG_DIR_NAME;
use crate::export::blocks::{DEFAULT_BASE_INDENT, DEFAULT_JSON_INDENT};
use crate::export::template::DEFAULT_MARKER;
use crate::export::EmitOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest accepted `json_indent`.
const MAX_JSON_INDENT: usize = 16;

/// Largest accepted `base_indent`.
const MAX_BASE_INDENT: usize = 256;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Template with the marker line (e.g., "`karabiner/karabiner.jsonc`")
    pub template: PathBuf,
    /// Where to write the result; stdout when unset
    pub output: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("karabiner/karabiner.jsonc"),
            output: None,
        }
    }
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Spaces in front of every emitted line
    pub base_indent: usize,
    /// Spaces per JSON nesting level
    pub json_indent: usize,
    /// Comment line replaced by the generated rules
    pub marker: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            base_indent: DEFAULT_BASE_INDENT,
            json_indent: DEFAULT_JSON_INDENT,
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl EmitConfig {
    /// Indentation settings for the emitter.
    #[must_use]
    pub fn options(&self) -> EmitOptions {
        EmitOptions {
            base_indent: self.base_indent,
            json_indent: self.json_indent,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/KarabinerEmacs/config.toml`
/// - macOS: `~/Library/Application Support/KarabinerEmacs/config.toml`
/// - Windows: `%APPDATA%\KarabinerEmacs\config.toml`
///
/// # Validation
///
/// - `marker` must be a non-empty `//` comment
/// - `json_indent` must be between 1 and 16
/// - `base_indent` must be at most 256
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Output formatting
    pub emit: EmitConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        let config_path = match Self::config_file_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("no config directory ({e}), using defaults");
                return Ok(Self::new());
            }
        };

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .context(format!("Invalid config file: {}", path.display()))?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let marker = self.emit.marker.trim();
        if marker.is_empty() {
            anyhow::bail!("emit.marker must not be empty");
        }
        if !marker.starts_with("//") {
            anyhow::bail!("emit.marker must be a '//' comment, got '{marker}'");
        }
        if marker == "//" {
            anyhow::bail!("emit.marker must not be a bare '//', it would match every comment");
        }

        if self.emit.base_indent > MAX_BASE_INDENT {
            anyhow::bail!(
                "emit.base_indent must be at most {MAX_BASE_INDENT}, got {}",
                self.emit.base_indent
            );
        }

        if self.emit.json_indent == 0 || self.emit.json_indent > MAX_JSON_INDENT {
            anyhow::bail!(
                "emit.json_indent must be between 1 and {MAX_JSON_INDENT}, got {}",
                self.emit.json_indent
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.template, PathBuf::from("karabiner/karabiner.jsonc"));
        assert_eq!(config.paths.output, None);
        assert_eq!(config.emit.base_indent, 20);
        assert_eq!(config.emit.json_indent, 4);
        assert_eq!(config.emit.marker, "// ::commands");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[emit]\nbase_indent = 8\n").unwrap();

        let config = Config::load(Some(config_file.as_path())).unwrap();
        assert_eq!(config.emit.base_indent, 8);
        assert_eq!(config.emit.json_indent, 4);
        assert_eq!(config.paths, PathConfig::default());
    }

    #[test]
    fn test_paths_section() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(
            &config_file,
            "[paths]\ntemplate = \"in.jsonc\"\noutput = \"out.json\"\n",
        )
        .unwrap();

        let config = Config::load(Some(config_file.as_path())).unwrap();
        assert_eq!(config.paths.template, PathBuf::from("in.jsonc"));
        assert_eq!(config.paths.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(Some(temp_dir.path().join("missing.toml").as_path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[emit\n").unwrap();

        let error = Config::load(Some(config_file.as_path())).unwrap_err();
        assert!(format!("{error:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_validate_marker() {
        let mut config = Config::new();

        config.emit.marker = String::new();
        assert!(config.validate().is_err());

        config.emit.marker = "# rules".to_string();
        assert!(config.validate().is_err());

        config.emit.marker = "//".to_string();
        assert!(config.validate().is_err());

        config.emit.marker = "// @rules".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_json_indent() {
        let mut config = Config::new();

        config.emit.json_indent = 0;
        assert!(config.validate().is_err());

        config.emit.json_indent = 17;
        assert!(config.validate().is_err());

        config.emit.json_indent = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_indent() {
        let mut config = Config::new();

        config.emit.base_indent = 1_000_000_000;
        assert!(config.validate().is_err());

        config.emit.base_indent = 257;
        assert!(config.validate().is_err());

        config.emit.base_indent = 256;
        assert!(config.validate().is_ok());

        config.emit.base_indent = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_emit_options() {
        let mut config = Config::new();
        config.emit.base_indent = 0;
        config.emit.json_indent = 2;
        assert_eq!(
            config.emit.options(),
            EmitOptions {
                base_indent: 0,
                json_indent: 2
            }
        );
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::new();
        let content = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(loaded, config);
    }
}
