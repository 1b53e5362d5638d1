//! Shorthands for declaring commands.
//!
//! Every command ends up in [`Registry::new_modification`]; these helpers
//! only fill in the conditions and side effects shared by a kind of command.

use crate::models::{Condition, ConsumableKeyEvent, EmacsMode, ToEvent};
use crate::registry::{Registry, RegistryError, VariantRule};
use tracing::debug;

/// Command declaration helpers over a registry.
pub struct Commands<'a> {
    registry: &'a mut Registry,
    select_mode: VariantRule,
}

impl<'a> Commands<'a> {
    /// Wraps a registry.
    pub fn new(registry: &'a mut Registry) -> Self {
        Self {
            registry,
            select_mode: VariantRule::select_mode(),
        }
    }

    /// A command only active while no Emacs prefix is pending.
    ///
    /// Most commands are of this kind.
    pub fn basic(
        &mut self,
        description: &str,
        from: &ConsumableKeyEvent,
        to: impl IntoIterator<Item = ToEvent>,
    ) -> Result<(), RegistryError> {
        self.registry.new_modification(
            description,
            from.clone(),
            to,
            [EmacsMode::None.is_active()],
            None,
        )
    }

    /// A command active in every mode (cancel, undo and the like).
    pub fn global(
        &mut self,
        description: &str,
        from: &ConsumableKeyEvent,
        to: impl IntoIterator<Item = ToEvent>,
    ) -> Result<(), RegistryError> {
        self.registry
            .new_modification(description, from.clone(), to, [], None)
    }

    /// A command with explicit conditions.
    pub fn guarded(
        &mut self,
        description: &str,
        from: &ConsumableKeyEvent,
        to: impl IntoIterator<Item = ToEvent>,
        conditions: impl IntoIterator<Item = Condition>,
    ) -> Result<(), RegistryError> {
        self.registry
            .new_modification(description, from.clone(), to, conditions, None)
    }

    /// The prefix chord entering `mode`.
    ///
    /// The mode clears itself if no follow-up key arrives in time.
    pub fn switch_emacs_mode(
        &mut self,
        mode: EmacsMode,
        from: &ConsumableKeyEvent,
    ) -> Result<(), RegistryError> {
        self.registry.new_modification(
            mode.label(),
            from.clone(),
            [mode.set().into()],
            [EmacsMode::None.is_active()],
            Some(EmacsMode::clear_after_timeout()),
        )
    }

    /// A command reachable after the prefix of `mode`.
    ///
    /// Clearing the mode is appended to the outputs, so each command leaves
    /// the prefix on its own.
    pub fn in_emacs_mode(
        &mut self,
        mode: EmacsMode,
        name: &str,
        from: &ConsumableKeyEvent,
        to: impl IntoIterator<Item = ToEvent>,
    ) -> Result<(), RegistryError> {
        let mut outputs: Vec<ToEvent> = to.into_iter().collect();
        outputs.push(EmacsMode::clear().into());
        self.registry.new_modification(
            format!("{}: {}", mode.label(), name),
            from.clone(),
            outputs,
            [mode.is_active()],
            None,
        )
    }

    /// Derives the select mode variant of each named command.
    pub fn select_mode_variants(&mut self, descriptions: &[&str]) -> Result<(), RegistryError> {
        for description in descriptions {
            self.registry.derive_variant(description, &self.select_mode)?;
        }
        debug!(count = descriptions.len(), "derived select mode variants");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Modifier, ProducibleKeyEvent, SelectMode};

    #[test]
    fn test_in_emacs_mode_appends_clear() {
        let mut registry = Registry::new();
        let mut commands = Commands::new(&mut registry);
        commands
            .in_emacs_mode(
                EmacsMode::GeneralExtend,
                "Save",
                &ConsumableKeyEvent::chord("s", Modifier::CONTROL),
                [ProducibleKeyEvent::new("s", [Modifier::LEFT_COMMAND]).into()],
            )
            .unwrap();

        let save = registry
            .find_by_description("Emacs Mode: General Extend: Save")
            .unwrap();
        let manipulator = &save.manipulators[0];
        assert_eq!(manipulator.conditions, vec![EmacsMode::GeneralExtend.is_active()]);
        assert_eq!(manipulator.to.len(), 2);
        assert_eq!(manipulator.to[1], EmacsMode::clear().into());
    }

    #[test]
    fn test_switch_emacs_mode_has_delayed_clear() {
        let mut registry = Registry::new();
        Commands::new(&mut registry)
            .switch_emacs_mode(
                EmacsMode::ModeSpecific,
                &ConsumableKeyEvent::chord("c", Modifier::CONTROL),
            )
            .unwrap();

        let switch = registry
            .find_by_description("Emacs Mode: Mode Specific")
            .unwrap();
        let manipulator = &switch.manipulators[0];
        assert_eq!(manipulator.to, vec![EmacsMode::ModeSpecific.set().into()]);
        assert_eq!(
            manipulator.to_delayed_action,
            Some(EmacsMode::clear_after_timeout())
        );
    }

    #[test]
    fn test_global_has_no_conditions() {
        let mut registry = Registry::new();
        Commands::new(&mut registry)
            .global(
                "Undo",
                &ConsumableKeyEvent::chord("_", Modifier::CONTROL),
                [ProducibleKeyEvent::new("z", [Modifier::LEFT_COMMAND]).into()],
            )
            .unwrap();
        let undo = registry.find_by_description("Undo").unwrap();
        assert!(undo.manipulators[0].conditions.is_empty());
    }

    #[test]
    fn test_select_mode_variants_stop_at_first_error() {
        let mut registry = Registry::new();
        let mut commands = Commands::new(&mut registry);
        commands
            .basic(
                "Up",
                &ConsumableKeyEvent::chord("p", Modifier::CONTROL),
                [ProducibleKeyEvent::key("up_arrow").into()],
            )
            .unwrap();

        let result = commands.select_mode_variants(&["Up", "Missing"]);
        assert_eq!(
            result,
            Err(RegistryError::VariantSourceNotFound("Missing".to_string()))
        );

        let up = registry.find_by_description("Up").unwrap();
        assert_eq!(up.manipulators[0].conditions[1], SelectMode::Off.is_active());
    }
}
