//! Key catalogs.
//!
//! Three catalogs: what macOS understands, what the editor understands, and
//! what the user presses. All events pass through one [`KeybindingRegistry`]
//! so an accidental reuse fails at build time.
//!
//! Consumed chords use right modifiers (the keyboard sends only those).
//! Produced events use left modifiers so they never trigger another rule.

use crate::models::{ConsumableKeyEvent, KeyCode, Modifier, ProducibleKeyEvent};
use crate::registry::{KeybindingRegistry, RegistryError};

/// Standard macOS text editing shortcuts.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct MacosKeys {
    pub up: ProducibleKeyEvent,
    pub down: ProducibleKeyEvent,
    pub left: ProducibleKeyEvent,
    pub right: ProducibleKeyEvent,
    pub escape: ProducibleKeyEvent,
    pub backspace: ProducibleKeyEvent,
    pub delete: ProducibleKeyEvent,
    pub word_forward: ProducibleKeyEvent,
    pub word_backward: ProducibleKeyEvent,
    pub line_start: ProducibleKeyEvent,
    pub line_end: ProducibleKeyEvent,
    pub page_down: ProducibleKeyEvent,
    pub page_up: ProducibleKeyEvent,
    pub file_start: ProducibleKeyEvent,
    pub file_end: ProducibleKeyEvent,
    pub copy: ProducibleKeyEvent,
    pub paste: ProducibleKeyEvent,
    pub undo: ProducibleKeyEvent,
    pub redo: ProducibleKeyEvent,
    pub delete_word_backward: ProducibleKeyEvent,
    pub delete_word_forward: ProducibleKeyEvent,
    pub find_in_view: ProducibleKeyEvent,
    pub select_all: ProducibleKeyEvent,
    pub save: ProducibleKeyEvent,
}

impl MacosKeys {
    /// Registers the catalog.
    pub fn register(bindings: &mut KeybindingRegistry) -> Result<Self, RegistryError> {
        let command = || [Modifier::LEFT_COMMAND];
        let option = || [Modifier::LEFT_OPTION];

        Ok(Self {
            up: bindings.register(ProducibleKeyEvent::from_code(KeyCode::UP, []))?,
            down: bindings.register(ProducibleKeyEvent::from_code(KeyCode::DOWN, []))?,
            left: bindings.register(ProducibleKeyEvent::from_code(KeyCode::LEFT, []))?,
            right: bindings.register(ProducibleKeyEvent::from_code(KeyCode::RIGHT, []))?,
            escape: bindings.register(ProducibleKeyEvent::from_code(KeyCode::ESCAPE, []))?,
            backspace: bindings.register(ProducibleKeyEvent::from_code(KeyCode::BACKSPACE, []))?,
            delete: bindings.register(ProducibleKeyEvent::from_code(KeyCode::DELETE, []))?,
            word_forward: bindings.register(ProducibleKeyEvent::from_code(KeyCode::RIGHT, option()))?,
            word_backward: bindings.register(ProducibleKeyEvent::from_code(KeyCode::LEFT, option()))?,
            line_start: bindings.register(ProducibleKeyEvent::from_code(KeyCode::LEFT, command()))?,
            line_end: bindings.register(ProducibleKeyEvent::from_code(KeyCode::RIGHT, command()))?,
            page_down: bindings.register(ProducibleKeyEvent::from_code(KeyCode::DOWN, [Modifier::FN]))?,
            page_up: bindings.register(ProducibleKeyEvent::from_code(KeyCode::UP, [Modifier::FN]))?,
            file_start: bindings.register(ProducibleKeyEvent::from_code(KeyCode::UP, command()))?,
            file_end: bindings.register(ProducibleKeyEvent::from_code(KeyCode::DOWN, command()))?,
            copy: bindings.register(ProducibleKeyEvent::new("c", command()))?,
            paste: bindings.register(ProducibleKeyEvent::new("v", command()))?,
            undo: bindings.register(ProducibleKeyEvent::new("z", command()))?,
            redo: bindings.register(ProducibleKeyEvent::new(
                "z",
                [Modifier::LEFT_COMMAND, Modifier::LEFT_SHIFT],
            ))?,
            delete_word_backward: bindings
                .register(ProducibleKeyEvent::from_code(KeyCode::BACKSPACE, option()))?,
            delete_word_forward: bindings
                .register(ProducibleKeyEvent::from_code(KeyCode::DELETE, option()))?,
            find_in_view: bindings.register(ProducibleKeyEvent::new("f", command()))?,
            select_all: bindings.register(ProducibleKeyEvent::new("a", command()))?,
            save: bindings.register(ProducibleKeyEvent::new("s", command()))?,
        })
    }
}

/// Editor shortcuts (VS Code defaults on macOS).
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct IdeKeys {
    pub action_search: ProducibleKeyEvent,
    pub find_references: ProducibleKeyEvent,
    pub go_back: ProducibleKeyEvent,
    pub toggle_comment: ProducibleKeyEvent,
    pub focus_next_window: ProducibleKeyEvent,
    pub find_file: ProducibleKeyEvent,
    pub rerun: ProducibleKeyEvent,
    pub format_file: ProducibleKeyEvent,
    pub find_in_files: ProducibleKeyEvent,
}

impl IdeKeys {
    /// Registers the catalog.
    pub fn register(bindings: &mut KeybindingRegistry) -> Result<Self, RegistryError> {
        let command_shift = || [Modifier::LEFT_COMMAND, Modifier::LEFT_SHIFT];

        Ok(Self {
            action_search: bindings.register(ProducibleKeyEvent::new("p", command_shift()))?,
            find_references: bindings
                .register(ProducibleKeyEvent::from_code(KeyCode::F12, [Modifier::LEFT_SHIFT]))?,
            go_back: bindings.register(ProducibleKeyEvent::new("-", [Modifier::LEFT_CONTROL]))?,
            toggle_comment: bindings
                .register(ProducibleKeyEvent::from_code(KeyCode::SLASH, [Modifier::LEFT_COMMAND]))?,
            focus_next_window: bindings.register(ProducibleKeyEvent::from_code(KeyCode::F6, []))?,
            find_file: bindings.register(ProducibleKeyEvent::new("p", [Modifier::LEFT_COMMAND]))?,
            rerun: bindings.register(ProducibleKeyEvent::from_code(KeyCode::F5, command_shift()))?,
            format_file: bindings.register(ProducibleKeyEvent::new(
                "f",
                [Modifier::LEFT_SHIFT, Modifier::LEFT_OPTION],
            ))?,
            find_in_files: bindings.register(ProducibleKeyEvent::new("f", command_shift()))?,
        })
    }
}

/// What the user presses.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct EmacsKeys {
    pub up: ConsumableKeyEvent,
    pub down: ConsumableKeyEvent,
    pub left: ConsumableKeyEvent,
    pub right: ConsumableKeyEvent,
    pub word_forward: ConsumableKeyEvent,
    pub word_backward: ConsumableKeyEvent,
    pub line_start: ConsumableKeyEvent,
    pub line_end: ConsumableKeyEvent,
    pub page_down: ConsumableKeyEvent,
    pub page_up: ConsumableKeyEvent,
    pub file_start: ConsumableKeyEvent,
    pub file_end: ConsumableKeyEvent,
    pub wipe: ConsumableKeyEvent,
    pub yank: ConsumableKeyEvent,
    pub undo: ConsumableKeyEvent,
    pub redo: ConsumableKeyEvent,
    pub delete: ConsumableKeyEvent,
    pub delete_word_backward: ConsumableKeyEvent,
    pub delete_word_forward: ConsumableKeyEvent,
    pub cancel: ConsumableKeyEvent,
    pub find_in_view: ConsumableKeyEvent,
    pub action_search: ConsumableKeyEvent,
    pub find_references: ConsumableKeyEvent,
    pub go_back: ConsumableKeyEvent,
    pub toggle_comment: ConsumableKeyEvent,
    pub select_mode_toggle: ConsumableKeyEvent,

    pub general_extend: ConsumableKeyEvent,
    pub select_all: ConsumableKeyEvent,
    pub save: ConsumableKeyEvent,
    pub focus_next_window: ConsumableKeyEvent,
    pub find_file: ConsumableKeyEvent,

    pub mode_specific: ConsumableKeyEvent,
    pub rerun: ConsumableKeyEvent,
    pub format_file: ConsumableKeyEvent,
    pub find_in_files: ConsumableKeyEvent,
}

impl EmacsKeys {
    /// Registers the catalog.
    ///
    /// Keys behind a prefix may repeat a top-level chord; those are declared
    /// as overlaps.
    pub fn register(bindings: &mut KeybindingRegistry) -> Result<Self, RegistryError> {
        let control = |key: &str| ConsumableKeyEvent::chord(key, Modifier::CONTROL);
        let command = |key: &str| ConsumableKeyEvent::chord(key, Modifier::COMMAND);

        let right = bindings.register(control("f"))?;
        let find_in_view = bindings.register(control("s"))?;

        Ok(Self {
            up: bindings.register(control("p"))?,
            down: bindings.register(control("n"))?,
            left: bindings.register(control("b"))?,
            word_forward: bindings.register(command("f"))?,
            word_backward: bindings.register(command("b"))?,
            line_start: bindings.register(control("a"))?,
            line_end: bindings.register(control("e"))?,
            page_down: bindings.register(control("v"))?,
            page_up: bindings.register(command("v"))?,
            file_start: bindings.register(control("<"))?,
            file_end: bindings.register(control(">"))?,
            wipe: bindings.register(control("w"))?,
            yank: bindings.register(control("y"))?,
            undo: bindings.register(control("_"))?,
            redo: bindings.register(control("-"))?,
            delete: bindings.register(control("d"))?,
            delete_word_backward: bindings.register(ConsumableKeyEvent::new(
                KeyCode::BACKSPACE.as_str(),
                [Modifier::COMMAND],
                [],
            ))?,
            delete_word_forward: bindings.register(command("d"))?,
            cancel: bindings.register(control("g"))?,
            action_search: bindings.register(command("x"))?,
            find_references: bindings.register(control("."))?,
            go_back: bindings.register(control(","))?,
            toggle_comment: bindings.register(control(";"))?,
            select_mode_toggle: bindings.register(ConsumableKeyEvent::new(
                KeyCode::SPACEBAR.as_str(),
                [Modifier::CONTROL],
                [],
            ))?,

            general_extend: bindings.register(control("x"))?,
            select_all: bindings.register(ConsumableKeyEvent::key("h"))?,
            save: bindings.register_overlapping(control("s"), &find_in_view)?,
            focus_next_window: bindings.register(ConsumableKeyEvent::key("o"))?,
            find_file: bindings.register_overlapping(control("f"), &right)?,

            mode_specific: bindings.register(control("c"))?,
            rerun: bindings.register(ConsumableKeyEvent::key("r"))?,
            format_file: bindings.register(ConsumableKeyEvent::key("f"))?,
            find_in_files: bindings.register(ConsumableKeyEvent::key("s"))?,

            right,
            find_in_view,
        })
    }
}
