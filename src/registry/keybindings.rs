//! Keybinding-level duplicate detection.
//!
//! Every key event used by the ruleset is registered here once. Reusing an
//! event is almost always a copy-paste mistake, so it fails unless the
//! caller declares the overlap and spells out the expected event. The
//! declaration is checked against the real event, which catches stale
//! declarations once a binding changes. Keeping the overlapping commands
//! apart (different mode conditions) is up to the caller.

use super::RegistryError;
use crate::models::KeyEvent;
use indexmap::IndexSet;
use tracing::debug;

/// Set of registered key events, keyed by structural equality.
#[derive(Debug, Clone, Default)]
pub struct KeybindingRegistry {
    seen: IndexSet<KeyEvent>,
}

impl KeybindingRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new key event and hands it back.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateKeybinding`] if an equal event exists.
    pub fn register<E>(&mut self, event: E) -> Result<E, RegistryError>
    where
        E: Clone + Into<KeyEvent>,
    {
        let key_event: KeyEvent = event.clone().into();
        if self.seen.contains(&key_event) {
            return Err(RegistryError::DuplicateKeybinding(key_event.to_string()));
        }
        debug!(event = %key_event, "registered keybinding");
        self.seen.insert(key_event);
        Ok(event)
    }

    /// Registers a key event that deliberately repeats an existing one.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::OverlapMismatch`] if `intended_overlap` differs from `event`
    /// - [`RegistryError::UnusedOverlap`] if nothing registered equals `event`
    pub fn register_overlapping<E>(&mut self, event: E, intended_overlap: &E) -> Result<E, RegistryError>
    where
        E: Clone + Into<KeyEvent>,
    {
        let key_event: KeyEvent = event.clone().into();
        let declared: KeyEvent = intended_overlap.clone().into();

        if declared != key_event {
            return Err(RegistryError::OverlapMismatch {
                declared: declared.to_string(),
                actual: key_event.to_string(),
            });
        }
        if !self.seen.contains(&key_event) {
            return Err(RegistryError::UnusedOverlap(key_event.to_string()));
        }

        debug!(event = %key_event, "registered intended overlap");
        Ok(event)
    }

    /// Returns true if an equal event is registered.
    pub fn contains(&self, event: &KeyEvent) -> bool {
        self.seen.contains(event)
    }

    /// Number of distinct registered events.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
