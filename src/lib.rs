//! Karabiner Emacs Library
//!
//! This library builds a Karabiner-Elements ruleset giving macOS Emacs-style
//! keybindings: typed key events and modifications, a registry that rejects
//! duplicates and derives select-mode variants, and an emitter that renders
//! the ruleset into a JSON template.

pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod registry;
pub mod ruleset;
