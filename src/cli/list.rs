//! List command: prints the registered modifications in emission order.

use crate::cli::common::{CliError, CliResult};
use crate::cli::load_config;
use crate::models::Modification;
use crate::ruleset;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// List every generated rule in emission order
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// JSON entry for one modification.
#[derive(Debug, Serialize)]
struct RuleEntry<'a> {
    description: &'a str,
    manipulators: usize,
    conditions: Vec<String>,
}

impl<'a> RuleEntry<'a> {
    fn new(modification: &'a Modification) -> Self {
        let conditions = modification
            .conditions
            .iter()
            .chain(modification.manipulators.iter().flat_map(|m| m.conditions.iter()))
            .map(|condition| format!("{} == {}", condition.name(), condition.value()))
            .collect();

        Self {
            description: &modification.description,
            manipulators: modification.manipulators.len(),
            conditions,
        }
    }
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        // Invalid configs fail here too, same as for generate
        load_config(self.config.as_deref())?;

        let rules = ruleset::build_ruleset()
            .map_err(|e| CliError::validation(format!("Failed to build ruleset: {e:#}")))?;

        if self.json {
            let entries: Vec<RuleEntry<'_>> = rules.iter().map(RuleEntry::new).collect();
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            for description in rules.descriptions() {
                println!("{description}");
            }
        }

        Ok(())
    }
}
