//! Registration and derivation of modifications.
//!
//! The [`Registry`] owns every modification in insertion order, which is also
//! the emission order. Variants are derived from registered records through
//! [`VariantRule`], and key events are checked for accidental reuse through
//! [`KeybindingRegistry`]. Once everything is registered the registry is
//! frozen into a read-only [`Ruleset`].

pub mod keybindings;
pub mod variant;

pub use keybindings::KeybindingRegistry;
pub use variant::{BasePatch, Derivation, VariantRule};

use crate::models::{Condition, ConsumableKeyEvent, DelayedAction, Manipulator, Modification, ToEvent};
use indexmap::map::Entry;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised while building the ruleset. All of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A modification with this description is already registered.
    #[error("duplicate modification description: {0}")]
    DuplicateDescription(String),

    /// A modification without manipulators.
    #[error("modification '{0}' has no manipulators")]
    EmptyModification(String),

    /// More than one manipulator of a modification carries a delayed action.
    #[error("modification '{description}' has {count} manipulators with a delayed action, at most 1 allowed")]
    MultipleDelayedActions {
        /// Description of the modification.
        description: String,
        /// Number of manipulators carrying a delayed action.
        count: usize,
    },

    /// The same key event was registered twice without declaring it.
    #[error("duplicate keybinding detected: {0}")]
    DuplicateKeybinding(String),

    /// A declared intended overlap differs from the event being registered.
    #[error("intended overlap does not match keybinding supplied:\n  declared: {declared}\n  actual:   {actual}")]
    OverlapMismatch {
        /// The event the caller declared.
        declared: String,
        /// The event actually being registered.
        actual: String,
    },

    /// An intended overlap was declared but nothing registered collides with it.
    #[error("intended overlap declared but no registered keybinding matches: {0}")]
    UnusedOverlap(String),

    /// No modification with this description exists.
    #[error("modification not found: {0}")]
    NotFound(String),

    /// A variant was requested for a description that isn't registered.
    #[error("cannot derive variant, modification not found: {0}")]
    VariantSourceNotFound(String),

    /// The base of a variant must have exactly one manipulator.
    #[error("cannot derive variant of '{description}': expected 1 manipulator, found {manipulators}")]
    AmbiguousVariantSource {
        /// Base description.
        description: String,
        /// Number of manipulators found.
        manipulators: usize,
    },

    /// The base manipulator must produce exactly one output event.
    #[error("cannot derive variant of '{description}': expected 1 output event, found {outputs}")]
    AmbiguousVariantTarget {
        /// Base description.
        description: String,
        /// Number of output events found.
        outputs: usize,
    },

    /// The sole output of the base is a variable assignment, not a key.
    #[error("cannot derive variant of '{0}': its output is not a key event")]
    VariantTargetNotKeyEvent(String),

    /// The base is already guarded on the variant's variable.
    #[error("variant of '{description}' already derived (base is guarded on '{variable}')")]
    VariantAlreadyDerived {
        /// Base description.
        description: String,
        /// Variable the base is already guarded on.
        variable: String,
    },
}

/// Insertion-ordered collection of modifications keyed by description.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    modifications: IndexMap<String, Modification>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a modification.
    ///
    /// Fails if the description is taken; existing entries are never replaced.
    /// The record needs at least one manipulator, and at most one of them may
    /// carry a delayed action.
    pub fn insert(&mut self, modification: Modification) -> Result<(), RegistryError> {
        check_shape(&modification)?;
        match self.modifications.entry(modification.description.clone()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateDescription(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(description = %entry.key(), "registered modification");
                entry.insert(modification);
                Ok(())
            }
        }
    }

    /// Builds a single-manipulator modification and registers it.
    pub fn new_modification(
        &mut self,
        description: impl Into<String>,
        from: ConsumableKeyEvent,
        to: impl IntoIterator<Item = ToEvent>,
        conditions: impl IntoIterator<Item = Condition>,
        delayed_action: Option<DelayedAction>,
    ) -> Result<(), RegistryError> {
        let manipulator = Manipulator::basic(from, to)
            .with_conditions(conditions)
            .with_delayed_action(delayed_action);
        self.insert(Modification::single(description, manipulator))
    }

    /// Looks up a modification by description.
    pub fn find_by_description(&self, description: &str) -> Result<&Modification, RegistryError> {
        self.modifications
            .get(description)
            .ok_or_else(|| RegistryError::NotFound(description.to_string()))
    }

    /// Returns true if the description is registered.
    pub fn contains(&self, description: &str) -> bool {
        self.modifications.contains_key(description)
    }

    /// Number of registered modifications.
    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    /// Iterates over modifications in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Modification> {
        self.modifications.values()
    }

    /// Derives and registers a variant of an existing modification.
    ///
    /// The base gets the rule's complementary guard, so base and variant
    /// are mutually exclusive afterwards. Derive only once the base's other
    /// conditions are final.
    pub fn derive_variant(&mut self, description: &str, rule: &VariantRule) -> Result<(), RegistryError> {
        let base = self
            .modifications
            .get(description)
            .ok_or_else(|| RegistryError::VariantSourceNotFound(description.to_string()))?;
        let derivation = rule.derive(base)?;
        self.apply_derivation(derivation)
    }

    /// Applies a derivation: patches the base, then registers the variant.
    ///
    /// Nothing is modified unless both steps can succeed.
    pub fn apply_derivation(&mut self, derivation: Derivation) -> Result<(), RegistryError> {
        let (variant, patch) = derivation.into_parts();

        if self.modifications.contains_key(&variant.description) {
            return Err(RegistryError::DuplicateDescription(variant.description));
        }

        let base = self
            .modifications
            .get_mut(patch.description())
            .ok_or_else(|| RegistryError::VariantSourceNotFound(patch.description().to_string()))?;
        patch.apply(base)?;

        debug!(
            base = %patch.description(),
            variant = %variant.description,
            "derived variant"
        );
        self.modifications.insert(variant.description.clone(), variant);
        Ok(())
    }

    /// Freezes the registry into its emission order.
    pub fn freeze(self) -> Ruleset {
        Ruleset {
            modifications: self.modifications.into_values().collect(),
        }
    }
}

fn check_shape(modification: &Modification) -> Result<(), RegistryError> {
    if modification.manipulators.is_empty() {
        return Err(RegistryError::EmptyModification(modification.description.clone()));
    }

    let count = modification
        .manipulators
        .iter()
        .filter(|m| m.to_delayed_action.is_some())
        .count();
    if count > 1 {
        return Err(RegistryError::MultipleDelayedActions {
            description: modification.description.clone(),
            count,
        });
    }

    Ok(())
}

/// Frozen, read-only ruleset in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ruleset {
    modifications: Vec<Modification>,
}

impl Ruleset {
    /// All modifications in emission order.
    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    /// Iterates over modifications in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Modification> {
        self.modifications.iter()
    }

    /// Descriptions in emission order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.modifications.iter().map(|m| m.description.as_str())
    }

    /// Number of modifications.
    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    /// Returns true if the ruleset is empty.
    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ruleset {
    type Item = &'a Modification;
    type IntoIter = std::slice::Iter<'a, Modification>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmacsMode, KeyCode, Modifier, ProducibleKeyEvent, SelectMode};

    fn add_movement(registry: &mut Registry, description: &str, key: &str, target: KeyCode) {
        registry
            .new_modification(
                description,
                ConsumableKeyEvent::chord(key, Modifier::CONTROL),
                [ProducibleKeyEvent::from_code(target, []).into()],
                [EmacsMode::None.is_active()],
                None,
            )
            .unwrap();
    }

    #[test]
    fn test_insert_rejects_duplicate_description() {
        let mut registry = Registry::new();
        add_movement(&mut registry, "Up", "p", KeyCode::UP);

        let result = registry.new_modification(
            "Up",
            ConsumableKeyEvent::chord("k", Modifier::CONTROL),
            [ProducibleKeyEvent::from_code(KeyCode::UP, []).into()],
            [],
            None,
        );
        assert_eq!(result, Err(RegistryError::DuplicateDescription("Up".to_string())));

        // Original entry untouched
        let up = registry.find_by_description("Up").unwrap();
        assert_eq!(up.manipulators[0].from.key_code().as_str(), "p");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_rejects_empty_modification() {
        let mut registry = Registry::new();
        let result = registry.insert(Modification::new("Nothing", vec![]));
        assert_eq!(result, Err(RegistryError::EmptyModification("Nothing".to_string())));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_rejects_multiple_delayed_actions() {
        let mut registry = Registry::new();
        let switch = Manipulator::basic(
            ConsumableKeyEvent::chord("x", Modifier::CONTROL),
            [EmacsMode::GeneralExtend.set().into()],
        )
        .with_delayed_action(Some(EmacsMode::clear_after_timeout()));

        let result = registry.insert(Modification::new(
            "Two Switches",
            vec![switch.clone(), switch.clone()],
        ));
        assert_eq!(
            result,
            Err(RegistryError::MultipleDelayedActions {
                description: "Two Switches".to_string(),
                count: 2,
            })
        );
        assert!(!registry.contains("Two Switches"));

        let plain = Manipulator::basic(
            ConsumableKeyEvent::chord("c", Modifier::CONTROL),
            [EmacsMode::ModeSpecific.set().into()],
        );
        registry
            .insert(Modification::new("One Switch", vec![switch, plain]))
            .unwrap();
    }

    #[test]
    fn test_find_by_description_not_found() {
        let registry = Registry::new();
        assert_eq!(
            registry.find_by_description("Nope"),
            Err(RegistryError::NotFound("Nope".to_string()))
        );
    }

    #[test]
    fn test_derive_select_mode_variant() {
        let mut registry = Registry::new();
        add_movement(&mut registry, "Up", "p", KeyCode::UP);

        registry
            .derive_variant("Up", &VariantRule::select_mode())
            .unwrap();

        let base = registry.find_by_description("Up").unwrap();
        assert_eq!(
            base.manipulators[0].conditions,
            vec![EmacsMode::None.is_active(), SelectMode::Off.is_active()]
        );
        let base_to = base.manipulators[0].to[0].as_key().unwrap();
        assert!(base_to.modifiers().is_empty());

        let variant = registry.find_by_description("Up (Select Mode)").unwrap();
        assert_eq!(
            variant.manipulators[0].conditions,
            vec![EmacsMode::None.is_active(), SelectMode::On.is_active()]
        );
        let variant_to = variant.manipulators[0].to[0].as_key().unwrap();
        assert_eq!(variant_to.modifiers(), &[Modifier::LEFT_SHIFT]);
        assert_eq!(variant.manipulators[0].from, base.manipulators[0].from);
    }

    #[test]
    fn test_derivation_is_single_use() {
        let mut registry = Registry::new();
        add_movement(&mut registry, "Up", "p", KeyCode::UP);
        let rule = VariantRule::select_mode();

        registry.derive_variant("Up", &rule).unwrap();
        let second = registry.derive_variant("Up", &rule);
        assert!(matches!(
            second,
            Err(RegistryError::VariantAlreadyDerived { .. })
        ));

        // Base was not patched twice
        let base = registry.find_by_description("Up").unwrap();
        assert_eq!(base.manipulators[0].conditions.len(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_derive_missing_source() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.derive_variant("Up", &VariantRule::select_mode()),
            Err(RegistryError::VariantSourceNotFound("Up".to_string()))
        );
    }

    #[test]
    fn test_apply_derivation_leaves_base_alone_on_description_clash() {
        let mut registry = Registry::new();
        add_movement(&mut registry, "Up", "p", KeyCode::UP);
        add_movement(&mut registry, "Up (Select Mode)", "k", KeyCode::UP);

        let result = registry.derive_variant("Up", &VariantRule::select_mode());
        assert_eq!(
            result,
            Err(RegistryError::DuplicateDescription("Up (Select Mode)".to_string()))
        );

        let base = registry.find_by_description("Up").unwrap();
        assert_eq!(base.manipulators[0].conditions, vec![EmacsMode::None.is_active()]);
    }

    #[test]
    fn test_freeze_keeps_insertion_order() {
        let mut registry = Registry::new();
        add_movement(&mut registry, "Up", "p", KeyCode::UP);
        add_movement(&mut registry, "Down", "n", KeyCode::DOWN);
        add_movement(&mut registry, "Left", "b", KeyCode::LEFT);
        registry.derive_variant("Down", &VariantRule::select_mode()).unwrap();

        let ruleset = registry.freeze();
        let descriptions: Vec<_> = ruleset.descriptions().collect();
        assert_eq!(
            descriptions,
            vec!["Up", "Down", "Left", "Down (Select Mode)"]
        );
    }
}
