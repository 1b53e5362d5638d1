//! JSON block emission.
//!
//! Each modification becomes one pretty-printed JSON object, shifted right by
//! a fixed base indent so it lines up with the `rules` array of the template
//! it is pasted into.

use crate::models::Modification;
use crate::registry::Ruleset;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

/// Default indentation of the template's rules array.
pub const DEFAULT_BASE_INDENT: usize = 20;

/// Default indentation inside each JSON object.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Formatting of emitted blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces prefixed to every emitted line.
    pub base_indent: usize,
    /// Spaces per nesting level inside a block.
    pub json_indent: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            base_indent: DEFAULT_BASE_INDENT,
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

/// Serializes one modification without the base indent.
pub fn modification_json(modification: &Modification, json_indent: usize) -> Result<String> {
    let indent = " ".repeat(json_indent);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    modification
        .serialize(&mut serializer)
        .with_context(|| format!("Failed to serialize '{}'", modification.description))?;
    String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
}

/// Renders one indented block per modification, in ruleset order.
///
/// Blocks are joined by `,\n`; the last block ends with a plain newline so
/// the template's closing bracket follows directly.
pub fn emit_blocks(ruleset: &Ruleset, options: &EmitOptions) -> Result<String> {
    let prefix = " ".repeat(options.base_indent);
    let last = ruleset.len().saturating_sub(1);
    let mut output = String::new();

    for (idx, modification) in ruleset.iter().enumerate() {
        let json = modification_json(modification, options.json_indent)?;
        output.push_str(&prefix);
        output.push_str(&json.replace('\n', &format!("\n{prefix}")));
        output.push_str(if idx == last { "\n" } else { ",\n" });
    }

    Ok(output)
}
