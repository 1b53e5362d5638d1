//! Mode variables and the conditions/assignments built from them.

use super::condition::{Condition, DelayedAction, SetVariable};

/// Variable holding the active Emacs prefix mode.
pub const EMACS_MODE_VARIABLE: &str = "emacs_mode";

/// Variable holding the select mode state.
pub const SELECT_MODE_VARIABLE: &str = "select_mode";

/// Emacs prefix modes entered through a prefix chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmacsMode {
    /// No prefix pending.
    None,
    /// After `C-x`.
    GeneralExtend,
    /// After `C-c`.
    ModeSpecific,
}

impl EmacsMode {
    /// Value stored in the `emacs_mode` variable.
    pub const fn value(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::GeneralExtend => "C-x",
            Self::ModeSpecific => "C-c",
        }
    }

    /// Prefix used in descriptions of commands living in this mode.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Emacs Mode",
            Self::GeneralExtend => "Emacs Mode: General Extend",
            Self::ModeSpecific => "Emacs Mode: Mode Specific",
        }
    }

    /// Condition that holds while this mode is active.
    pub fn is_active(self) -> Condition {
        Condition::variable_if(EMACS_MODE_VARIABLE, self.value())
    }

    /// Output event entering this mode.
    pub fn set(self) -> SetVariable {
        SetVariable::new(EMACS_MODE_VARIABLE, self.value())
    }

    /// Output event leaving any mode.
    pub fn clear() -> SetVariable {
        Self::None.set()
    }

    /// Delayed action clearing the mode when no follow-up key arrives.
    ///
    /// `to_if_canceled` is left empty: clearing on cancel fires before the
    /// follow-up key is matched, so commands clear the mode themselves.
    pub fn clear_after_timeout() -> DelayedAction {
        DelayedAction::on_invoked([Self::clear()])
    }
}

/// Select mode: while on, movements extend the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectMode {
    /// Movements extend the selection.
    On,
    /// Movements only move.
    Off,
}

impl SelectMode {
    /// Value stored in the `select_mode` variable.
    pub const fn value(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    /// Condition that holds in this state.
    pub fn is_active(self) -> Condition {
        Condition::variable_if(SELECT_MODE_VARIABLE, self.value())
    }

    /// Output event switching to this state.
    pub fn set(self) -> SetVariable {
        SetVariable::new(SELECT_MODE_VARIABLE, self.value())
    }
}
