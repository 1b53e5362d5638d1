//! Generate command: builds the ruleset and renders it into the template.

use crate::cli::common::{CliError, CliResult};
use crate::cli::load_config;
use crate::export::{atomic_write, emit_blocks, render_template};
use crate::ruleset;
use clap::Args;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Generate the Karabiner configuration from a template
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Template containing the marker line (overrides `[paths] template`)
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Output file, written atomically (stdout if omitted and not configured)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;

        let template_path = self
            .template
            .clone()
            .unwrap_or_else(|| config.paths.template.clone());
        let output_path = self.output.clone().or_else(|| config.paths.output.clone());

        // Nothing is written unless the whole ruleset builds
        let rules = ruleset::build_ruleset()
            .map_err(|e| CliError::validation(format!("Failed to build ruleset: {e:#}")))?;

        let blocks = emit_blocks(&rules, &config.emit.options())
            .map_err(|e| CliError::validation(format!("Failed to emit rules: {e:#}")))?;

        let template = fs::read_to_string(&template_path).map_err(|e| {
            CliError::io(format!(
                "Failed to read template {}: {e}",
                template_path.display()
            ))
        })?;

        let rendered = render_template(&template, &blocks, config.emit.marker.trim())
            .map_err(|e| CliError::validation(format!("Invalid template {}: {e}", template_path.display())))?;

        match output_path {
            Some(path) => {
                atomic_write(&path, &rendered)
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                info!(
                    path = %path.display(),
                    modifications = rules.len(),
                    "wrote configuration"
                );
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(rendered.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|e| CliError::io(format!("Failed to write to stdout: {e}")))?;
            }
        }

        Ok(())
    }
}
