//! Variant derivation.
//!
//! A variant is a copy of a registered modification that is only active in
//! some state (select mode, say) and sends its output with an extra
//! modifier. Deriving it also changes the base: the base gets the opposite
//! guard so the two never match at the same time. That change is returned
//! as a [`BasePatch`] and applied by [`Registry::apply_derivation`], never
//! written directly into the registered record.
//!
//! [`Registry::apply_derivation`]: super::Registry::apply_derivation

use super::RegistryError;
use crate::models::{Condition, Manipulator, Modification, Modifier, SelectMode, ToEvent};

/// How to turn a base modification into a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRule {
    label: String,
    variant_condition: Condition,
    base_condition: Condition,
    modifier: Modifier,
}

impl VariantRule {
    /// Creates a rule.
    ///
    /// `variant_condition` and `base_condition` should guard the same
    /// variable with different values.
    pub fn new(
        label: impl Into<String>,
        variant_condition: Condition,
        base_condition: Condition,
        modifier: Modifier,
    ) -> Self {
        Self {
            label: label.into(),
            variant_condition,
            base_condition,
            modifier,
        }
    }

    /// Select mode: movements become shift + movement while select mode is on.
    ///
    /// Left shift is used since the output targets OS bindings.
    pub fn select_mode() -> Self {
        Self::new(
            "Select Mode",
            SelectMode::On.is_active(),
            SelectMode::Off.is_active(),
            Modifier::LEFT_SHIFT,
        )
    }

    /// Description of the variant derived from `base`.
    pub fn variant_description(&self, base: &str) -> String {
        format!("{base} ({})", self.label)
    }

    /// Computes the variant of `base` and the patch for `base` itself.
    ///
    /// Requires exactly one manipulator with exactly one key output, and a
    /// base not yet guarded on the rule's variables.
    pub fn derive(&self, base: &Modification) -> Result<Derivation, RegistryError> {
        let manipulator = self.check_source(base)?;

        let outputs = manipulator.to.len();
        if outputs != 1 {
            return Err(RegistryError::AmbiguousVariantTarget {
                description: base.description.clone(),
                outputs,
            });
        }
        if manipulator.to[0].as_key().is_none() {
            return Err(RegistryError::VariantTargetNotKeyEvent(base.description.clone()));
        }

        let mut variant = base.clone();
        variant.description = self.variant_description(&base.description);
        let variant_manipulator = &mut variant.manipulators[0];
        variant_manipulator.conditions.push(self.variant_condition.clone());
        if let ToEvent::Key(event) = &mut variant_manipulator.to[0] {
            event.push_modifier(self.modifier.clone());
        }

        Ok(Derivation {
            variant,
            base_patch: BasePatch {
                description: base.description.clone(),
                condition: self.base_condition.clone(),
                guarded: self.guarded_variables(),
            },
        })
    }

    fn check_source<'a>(
        &self,
        base: &'a Modification,
    ) -> Result<&'a Manipulator, RegistryError> {
        let manipulator = base
            .sole_manipulator()
            .ok_or_else(|| RegistryError::AmbiguousVariantSource {
                description: base.description.clone(),
                manipulators: base.manipulators.len(),
            })?;
        check_unguarded(base, &self.guarded_variables())?;
        Ok(manipulator)
    }

    fn guarded_variables(&self) -> Vec<String> {
        let mut names = vec![self.base_condition.name().to_string()];
        if self.variant_condition.name() != self.base_condition.name() {
            names.push(self.variant_condition.name().to_string());
        }
        names
    }
}

/// Fails if the base already carries a guard on one of `variables`.
fn check_unguarded(base: &Modification, variables: &[String]) -> Result<(), RegistryError> {
    let existing = base
        .conditions
        .iter()
        .chain(base.manipulators.iter().flat_map(|m| m.conditions.iter()))
        .find(|condition| variables.iter().any(|v| v == condition.name()));

    match existing {
        Some(condition) => Err(RegistryError::VariantAlreadyDerived {
            description: base.description.clone(),
            variable: condition.name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Change to apply to the base of a derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePatch {
    description: String,
    condition: Condition,
    guarded: Vec<String>,
}

impl BasePatch {
    /// Description of the base to patch.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Condition appended to the base's manipulator.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Appends the guard, re-checking the base hasn't changed shape.
    pub(crate) fn apply(&self, base: &mut Modification) -> Result<(), RegistryError> {
        check_unguarded(base, &self.guarded)?;
        let manipulators = base.manipulators.len();
        match base.manipulators.as_mut_slice() {
            [manipulator] => {
                manipulator.conditions.push(self.condition.clone());
                Ok(())
            }
            _ => Err(RegistryError::AmbiguousVariantSource {
                description: base.description.clone(),
                manipulators,
            }),
        }
    }
}

/// Result of [`VariantRule::derive`]: the new record plus the base patch.
///
/// Only the rule can build one, and only the registry can apply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    variant: Modification,
    base_patch: BasePatch,
}

impl Derivation {
    /// The derived modification.
    pub fn variant(&self) -> &Modification {
        &self.variant
    }

    /// The patch for the base modification.
    pub fn base_patch(&self) -> &BasePatch {
        &self.base_patch
    }

    pub(crate) fn into_parts(self) -> (Modification, BasePatch) {
        (self.variant, self.base_patch)
    }
}
