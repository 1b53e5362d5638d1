//! The Emacs ruleset.
//!
//! [`build`] registers every command in emission order: plain commands, the
//! two prefix modes with their commands, select mode and finally the select
//! mode variants of the movement commands.

pub mod bindings;
pub mod commands;

pub use bindings::{EmacsKeys, IdeKeys, MacosKeys};
pub use commands::Commands;

use crate::models::{EmacsMode, SelectMode, ToEvent};
use crate::registry::{KeybindingRegistry, Registry, Ruleset};
use anyhow::{Context, Result};
use tracing::info;

/// Commands that get a select mode variant.
pub const MOVEMENTS: [&str; 12] = [
    "Up",
    "Down",
    "Left",
    "Right",
    "Forward Word",
    "Backward Word",
    "Line Start",
    "Line End",
    "Page Down",
    "Page Up",
    "File Start",
    "File End",
];

/// Registers the whole ruleset into `registry`.
///
/// # Errors
///
/// Fails on the first duplicate description, reused keybinding or invalid
/// variant derivation.
pub fn build(registry: &mut Registry) -> Result<()> {
    let mut bindings = KeybindingRegistry::new();
    let macos = MacosKeys::register(&mut bindings).context("Failed to register macOS keys")?;
    let ide = IdeKeys::register(&mut bindings).context("Failed to register editor keys")?;
    let emacs = EmacsKeys::register(&mut bindings).context("Failed to register Emacs keys")?;

    let mut commands = Commands::new(registry);
    register_movement(&mut commands, &emacs, &macos).context("Failed to register movement")?;
    register_editing(&mut commands, &emacs, &macos, &ide).context("Failed to register editing")?;
    register_emacs_modes(&mut commands, &emacs, &macos, &ide)
        .context("Failed to register Emacs modes")?;
    register_select_mode(&mut commands, &emacs, &macos).context("Failed to register select mode")?;

    info!(
        modifications = registry.len(),
        keybindings = bindings.len(),
        "built ruleset"
    );
    Ok(())
}

/// Builds and freezes the ruleset.
pub fn build_ruleset() -> Result<Ruleset> {
    let mut registry = Registry::new();
    build(&mut registry)?;
    Ok(registry.freeze())
}

fn register_movement(commands: &mut Commands<'_>, emacs: &EmacsKeys, macos: &MacosKeys) -> Result<()> {
    // Arrow keys instead of the native Emacs bindings of text fields, since
    // arrows also work in lists and dropdowns.
    let moves = [
        ("Up", &emacs.up, &macos.up),
        ("Down", &emacs.down, &macos.down),
        ("Left", &emacs.left, &macos.left),
        ("Right", &emacs.right, &macos.right),
        ("Forward Word", &emacs.word_forward, &macos.word_forward),
        ("Backward Word", &emacs.word_backward, &macos.word_backward),
        ("Line Start", &emacs.line_start, &macos.line_start),
        ("Line End", &emacs.line_end, &macos.line_end),
        ("Page Down", &emacs.page_down, &macos.page_down),
        ("Page Up", &emacs.page_up, &macos.page_up),
        ("File Start", &emacs.file_start, &macos.file_start),
        ("File End", &emacs.file_end, &macos.file_end),
    ];
    for (description, from, to) in moves {
        commands.basic(description, from, [to.clone().into()])?;
    }
    Ok(())
}

fn register_editing(
    commands: &mut Commands<'_>,
    emacs: &EmacsKeys,
    macos: &MacosKeys,
    ide: &IdeKeys,
) -> Result<()> {
    // Copy then delete: command + x belongs to action search.
    commands.global(
        "Wipe",
        &emacs.wipe,
        [
            macos.copy.clone().into(),
            macos.backspace.clone().into(),
            SelectMode::Off.set().into(),
        ],
    )?;
    commands.global("Yank", &emacs.yank, [macos.paste.clone().into()])?;
    commands.global("Undo", &emacs.undo, [macos.undo.clone().into()])?;
    commands.global("Redo", &emacs.redo, [macos.redo.clone().into()])?;

    commands.basic(
        "Delete Word Backward",
        &emacs.delete_word_backward,
        [macos.delete_word_backward.clone().into()],
    )?;
    commands.basic("Delete", &emacs.delete, [macos.delete.clone().into()])?;
    commands.basic(
        "Delete Word Forward",
        &emacs.delete_word_forward,
        [macos.delete_word_forward.clone().into()],
    )?;

    commands.global(
        "Cancel",
        &emacs.cancel,
        [
            macos.escape.clone().into(),
            EmacsMode::clear().into(),
            SelectMode::Off.set().into(),
        ],
    )?;
    commands.basic(
        "Search",
        &emacs.find_in_view,
        [macos.find_in_view.clone().into(), EmacsMode::clear().into()],
    )?;

    commands.global(
        "Action search",
        &emacs.action_search,
        [
            EmacsMode::clear().into(),
            SelectMode::Off.set().into(),
            ide.action_search.clone().into(),
        ],
    )?;
    commands.basic(
        "Find references",
        &emacs.find_references,
        [ide.find_references.clone().into()],
    )?;
    commands.global("Go back", &emacs.go_back, [ide.go_back.clone().into()])?;
    commands.basic(
        "Toggle comment",
        &emacs.toggle_comment,
        [ide.toggle_comment.clone().into()],
    )?;
    Ok(())
}

fn register_emacs_modes(
    commands: &mut Commands<'_>,
    emacs: &EmacsKeys,
    macos: &MacosKeys,
    ide: &IdeKeys,
) -> Result<()> {
    let extend = EmacsMode::GeneralExtend;
    commands.switch_emacs_mode(extend, &emacs.general_extend)?;
    commands.in_emacs_mode(extend, "Select all", &emacs.select_all, [macos.select_all.clone().into()])?;
    commands.in_emacs_mode(extend, "Save", &emacs.save, [macos.save.clone().into()])?;
    commands.in_emacs_mode(
        extend,
        "Focus Next Window",
        &emacs.focus_next_window,
        [ide.focus_next_window.clone().into()],
    )?;
    commands.in_emacs_mode(extend, "Find File", &emacs.find_file, [ide.find_file.clone().into()])?;

    let specific = EmacsMode::ModeSpecific;
    commands.switch_emacs_mode(specific, &emacs.mode_specific)?;
    commands.in_emacs_mode(specific, "Rerun", &emacs.rerun, [ide.rerun.clone().into()])?;
    commands.in_emacs_mode(specific, "Format", &emacs.format_file, [ide.format_file.clone().into()])?;
    commands.in_emacs_mode(
        specific,
        "Find in Files",
        &emacs.find_in_files,
        [ide.find_in_files.clone().into()],
    )?;
    Ok(())
}

fn register_select_mode(commands: &mut Commands<'_>, emacs: &EmacsKeys, macos: &MacosKeys) -> Result<()> {
    commands.guarded(
        "Select Mode: On",
        &emacs.select_mode_toggle,
        [SelectMode::On.set().into()],
        [SelectMode::Off.is_active()],
    )?;
    // Escape drops the current selection.
    let off: [ToEvent; 2] = [SelectMode::Off.set().into(), macos.escape.clone().into()];
    commands.guarded(
        "Select Mode: Off",
        &emacs.select_mode_toggle,
        off,
        [SelectMode::On.is_active()],
    )?;

    commands.select_mode_variants(&MOVEMENTS)?;
    Ok(())
}
