//! Export of the frozen ruleset.
//!
//! This module turns a [`Ruleset`](crate::registry::Ruleset) into indented
//! JSON blocks and substitutes them into the marker line of a template file.

pub mod blocks;
pub mod template;

pub use blocks::{emit_blocks, modification_json, EmitOptions};
pub use template::{atomic_write, render_template, TemplateError};
