//! CLI command handlers for karabiner-emacs.
//!
//! Each subcommand owns its clap arguments and an `execute` method returning
//! a [`CliResult`](common::CliResult).

pub mod common;
pub mod generate;
pub mod list;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
pub use list::ListArgs;

use crate::config::Config;
use std::path::Path;

/// Loads the config for a command, mapping failures to exit codes.
///
/// A file that cannot be read is an I/O error, anything else is a
/// validation error.
pub(crate) fn load_config(path: Option<&Path>) -> CliResult<Config> {
    Config::load(path).map_err(|e| {
        let message = format!("{e:#}");
        if e.downcast_ref::<std::io::Error>().is_some() {
            CliError::io(message)
        } else {
            CliError::validation(message)
        }
    })
}
