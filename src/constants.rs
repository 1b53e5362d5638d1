//! Application-wide constants.

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "karabiner-emacs";

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "KarabinerEmacs";
