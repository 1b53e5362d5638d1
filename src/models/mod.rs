//! Data model of the generated ruleset.
//!
//! This module contains the key vocabulary, the two key event shapes and the
//! records Karabiner consumes. Models are plain data: they know how to
//! serialize themselves and nothing about registration or derivation.

pub mod condition;
pub mod event;
pub mod keys;
pub mod mode;
pub mod modification;

// Re-export all model types
pub use condition::{Condition, DelayedAction, SetVariable};
pub use event::{ConsumableKeyEvent, FromModifiers, KeyEvent, ProducibleKeyEvent};
pub use keys::{translate_symbol, KeyCode, Modifier};
pub use mode::{EmacsMode, SelectMode};
pub use modification::{Manipulator, Modification, ToEvent};
