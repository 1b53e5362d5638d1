//! Key and modifier vocabulary.
//!
//! Key codes and modifiers are opaque Karabiner identifiers. The only rule
//! attached to them is symbol translation: a handful of printable symbols
//! have no key code of their own and are rewritten to a canonical key code
//! plus, for shifted symbols, an implied modifier.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Identifier of a physical key (e.g. `"up_arrow"`, `"escape"`, `"f"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KeyCode(Cow<'static, str>);

impl KeyCode {
    /// Escape key.
    pub const ESCAPE: Self = Self::from_static("escape");
    /// The key labelled "delete" on Mac keyboards (deletes backwards).
    pub const BACKSPACE: Self = Self::from_static("delete_or_backspace");
    /// Forward delete.
    pub const DELETE: Self = Self::from_static("delete_forward");
    /// Arrow up.
    pub const UP: Self = Self::from_static("up_arrow");
    /// Arrow down.
    pub const DOWN: Self = Self::from_static("down_arrow");
    /// Arrow left.
    pub const LEFT: Self = Self::from_static("left_arrow");
    /// Arrow right.
    pub const RIGHT: Self = Self::from_static("right_arrow");
    /// Space bar.
    pub const SPACEBAR: Self = Self::from_static("spacebar");
    /// Slash / question mark key.
    pub const SLASH: Self = Self::from_static("slash");
    /// Function key F5.
    pub const F5: Self = Self::from_static("f5");
    /// Function key F6.
    pub const F6: Self = Self::from_static("f6");
    /// Function key F12.
    pub const F12: Self = Self::from_static("f12");

    /// Creates a key code from a static identifier without translation.
    #[must_use]
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a modifier key.
///
/// The physical keyboard only has right-side modifiers. The left variants
/// exist in the virtual keyboard and are used for outputs aimed at OS default
/// bindings, so that e.g. `right_command + f` ("Forward Word") and
/// `left_command + f` (OS "Find") remain distinguishable and the remapper
/// never consumes its own output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Modifier(Cow<'static, str>);

impl Modifier {
    /// The `fn` key. It has no sides.
    pub const FN: Self = Self::from_static("fn");

    /// Right command, used for consumed chords.
    pub const COMMAND: Self = Self::from_static("right_command");
    /// Right control, used for consumed chords.
    pub const CONTROL: Self = Self::from_static("right_control");
    /// Right option, used for consumed chords.
    pub const OPTION: Self = Self::from_static("right_option");
    /// Right shift, used for consumed chords.
    pub const SHIFT: Self = Self::from_static("right_shift");

    /// Left command, only for outputs targeting OS or editor bindings.
    pub const LEFT_COMMAND: Self = Self::from_static("left_command");
    /// Left control, only for outputs targeting OS or editor bindings.
    pub const LEFT_CONTROL: Self = Self::from_static("left_control");
    /// Left option, only for outputs targeting OS or editor bindings.
    pub const LEFT_OPTION: Self = Self::from_static("left_option");
    /// Left shift, only for outputs targeting OS or editor bindings.
    pub const LEFT_SHIFT: Self = Self::from_static("left_shift");

    /// Creates a modifier from a static identifier.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a modifier from any identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translates a key or symbol into its Karabiner key code.
///
/// Shifted symbols also yield the modifier needed to type them. Anything not
/// in the symbol table, including already canonical key codes, is returned
/// unchanged with no modifier.
///
/// # Examples
///
/// ```
/// use karabiner_emacs::models::keys::{translate_symbol, KeyCode, Modifier};
///
/// assert_eq!(
///     translate_symbol("<"),
///     (KeyCode::from_static("comma"), Some(Modifier::LEFT_SHIFT))
/// );
/// assert_eq!(translate_symbol("comma"), (KeyCode::from_static("comma"), None));
/// ```
#[must_use]
pub fn translate_symbol(key: &str) -> (KeyCode, Option<Modifier>) {
    // Left shift: the right variant is not recognised for these on the
    // virtual keyboard.
    match key {
        "<" => (KeyCode::from_static("comma"), Some(Modifier::LEFT_SHIFT)),
        ">" => (KeyCode::from_static("period"), Some(Modifier::LEFT_SHIFT)),
        "-" => (KeyCode::from_static("hyphen"), None),
        "_" => (KeyCode::from_static("hyphen"), Some(Modifier::LEFT_SHIFT)),
        ":" => (KeyCode::from_static("semicolon"), Some(Modifier::LEFT_SHIFT)),
        ";" => (KeyCode::from_static("semicolon"), None),
        " " => (KeyCode::SPACEBAR, None),
        "." => (KeyCode::from_static("period"), None),
        "," => (KeyCode::from_static("comma"), None),
        other => (KeyCode(Cow::Owned(other.to_string())), None),
    }
}
