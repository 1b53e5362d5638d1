//! Key events: what Karabiner consumes and what it produces.
//!
//! Karabiner will try to consume events it produced itself, so the two
//! shapes are kept apart at the type level. Both constructors run symbol
//! translation exactly once; the fields stay private so it can't be skipped.

use super::keys::{translate_symbol, KeyCode, Modifier};
use serde::Serialize;

/// A key event Karabiner sends to the OS.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProducibleKeyEvent {
    key_code: KeyCode,
    modifiers: Vec<Modifier>,
}

impl ProducibleKeyEvent {
    /// Creates a producible event, translating symbols like `<` or `_`.
    ///
    /// An implied modifier is appended after the given ones.
    pub fn new(key: &str, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let (key_code, implied) = translate_symbol(key);
        let mut event = Self {
            key_code,
            modifiers: Vec::new(),
        };
        for modifier in modifiers.into_iter().chain(implied) {
            event.push_modifier(modifier);
        }
        event
    }

    /// Creates an event for a plain key press.
    pub fn key(key: &str) -> Self {
        Self::new(key, [])
    }

    /// Creates an event from an already canonical key code.
    pub fn from_code(key_code: KeyCode, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        Self::new(key_code.as_str(), modifiers)
    }

    /// Returns the key code.
    pub fn key_code(&self) -> &KeyCode {
        &self.key_code
    }

    /// Returns the modifiers in emission order.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Appends a modifier after the existing ones, unless already held.
    pub fn push_modifier(&mut self, modifier: Modifier) {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
    }

    /// Returns a copy with an extra modifier appended.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.push_modifier(modifier);
        self
    }
}

/// Modifier requirements of a consumable event.
///
/// Both lists are sets: sorted, without repeats, and a modifier listed as
/// mandatory is never also optional. Equal requirements therefore compare
/// and hash equal however they were spelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FromModifiers {
    /// Modifiers that must be held.
    pub mandatory: Vec<Modifier>,
    /// Modifiers that may additionally be held.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<Modifier>,
}

impl FromModifiers {
    /// Creates normalized requirements.
    pub fn new(
        mandatory: impl IntoIterator<Item = Modifier>,
        optional: impl IntoIterator<Item = Modifier>,
    ) -> Self {
        let mut mandatory: Vec<Modifier> = mandatory.into_iter().collect();
        mandatory.sort();
        mandatory.dedup();

        let mut optional: Vec<Modifier> = optional
            .into_iter()
            .filter(|modifier| !mandatory.contains(modifier))
            .collect();
        optional.sort();
        optional.dedup();

        Self {
            mandatory,
            optional,
        }
    }

    /// Returns true when nothing is required or allowed.
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty()
    }
}

/// A key event Karabiner matches against incoming input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConsumableKeyEvent {
    key_code: KeyCode,
    #[serde(skip_serializing_if = "FromModifiers::is_empty")]
    modifiers: FromModifiers,
}

impl ConsumableKeyEvent {
    /// Creates a consumable event, translating symbols like `<` or `_`.
    ///
    /// An implied modifier joins the mandatory set.
    pub fn new(
        key: &str,
        mandatory: impl IntoIterator<Item = Modifier>,
        optional: impl IntoIterator<Item = Modifier>,
    ) -> Self {
        let (key_code, implied) = translate_symbol(key);
        Self {
            key_code,
            modifiers: FromModifiers::new(mandatory.into_iter().chain(implied), optional),
        }
    }

    /// Creates an event matching a key with one mandatory modifier.
    pub fn chord(key: &str, modifier: Modifier) -> Self {
        Self::new(key, [modifier], [])
    }

    /// Creates an event matching a bare key press.
    pub fn key(key: &str) -> Self {
        Self::new(key, [], [])
    }

    /// Returns the key code.
    pub fn key_code(&self) -> &KeyCode {
        &self.key_code
    }

    /// Returns the modifier requirements.
    pub fn modifiers(&self) -> &FromModifiers {
        &self.modifiers
    }
}

/// Either event shape, used where both are tracked together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum KeyEvent {
    /// An input pattern.
    Consumable(ConsumableKeyEvent),
    /// An output event.
    Producible(ProducibleKeyEvent),
}

impl From<ConsumableKeyEvent> for KeyEvent {
    fn from(event: ConsumableKeyEvent) -> Self {
        Self::Consumable(event)
    }
}

impl From<ProducibleKeyEvent> for KeyEvent {
    fn from(event: ProducibleKeyEvent) -> Self {
        Self::Producible(event)
    }
}

impl std::fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (kind, key_code) = match self {
            Self::Consumable(event) => ("from", event.key_code()),
            Self::Producible(event) => ("to", event.key_code()),
        };
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{kind} {key_code} {json}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_producible_symbol_appends_to_existing_modifiers() {
        let event = ProducibleKeyEvent::new("<", [Modifier::LEFT_COMMAND]);
        assert_eq!(event.key_code().as_str(), "comma");
        assert_eq!(
            event.modifiers(),
            &[Modifier::LEFT_COMMAND, Modifier::LEFT_SHIFT]
        );
    }

    #[test]
    fn test_consumable_symbol_goes_into_mandatory() {
        let event = ConsumableKeyEvent::new("_", [Modifier::CONTROL], [Modifier::FN]);
        assert_eq!(event.key_code().as_str(), "hyphen");
        assert_eq!(
            event.modifiers().mandatory,
            vec![Modifier::LEFT_SHIFT, Modifier::CONTROL]
        );
        assert_eq!(event.modifiers().optional, vec![Modifier::FN]);
    }

    #[test]
    fn test_consumable_modifier_order_does_not_matter() {
        let first = ConsumableKeyEvent::new("a", [Modifier::CONTROL, Modifier::COMMAND], []);
        let second = ConsumableKeyEvent::new("a", [Modifier::COMMAND, Modifier::CONTROL], []);
        assert_eq!(first, second);

        let canonical = ConsumableKeyEvent::new("comma", [Modifier::LEFT_SHIFT, Modifier::CONTROL], []);
        assert_eq!(canonical, ConsumableKeyEvent::chord("<", Modifier::CONTROL));
    }

    #[test]
    fn test_consumable_implied_modifier_not_repeated() {
        let event = ConsumableKeyEvent::new("<", [Modifier::LEFT_SHIFT], []);
        assert_eq!(event.modifiers().mandatory, vec![Modifier::LEFT_SHIFT]);

        let event = ConsumableKeyEvent::new("a", [Modifier::FN, Modifier::FN], [Modifier::FN]);
        assert_eq!(event.modifiers().mandatory, vec![Modifier::FN]);
        assert!(event.modifiers().optional.is_empty());
    }

    #[test]
    fn test_producible_modifiers_not_repeated() {
        let event = ProducibleKeyEvent::new("<", [Modifier::LEFT_SHIFT]);
        assert_eq!(event.modifiers(), &[Modifier::LEFT_SHIFT]);

        let event = ProducibleKeyEvent::key("z")
            .with_modifier(Modifier::LEFT_COMMAND)
            .with_modifier(Modifier::LEFT_COMMAND);
        assert_eq!(event.modifiers(), &[Modifier::LEFT_COMMAND]);
    }

    #[test]
    fn test_from_code_is_not_translated_twice() {
        let first = ProducibleKeyEvent::new(">", []);
        let again = ProducibleKeyEvent::from_code(first.key_code().clone(), first.modifiers().to_vec());
        assert_eq!(first, again);
    }

    #[test]
    fn test_producible_serializes_empty_modifier_list() {
        let value = serde_json::to_value(ProducibleKeyEvent::from_code(KeyCode::UP, [])).unwrap();
        assert_eq!(value, json!({"key_code": "up_arrow", "modifiers": []}));
    }

    #[test]
    fn test_consumable_omits_empty_modifiers() {
        let value = serde_json::to_value(ConsumableKeyEvent::key("h")).unwrap();
        assert_eq!(value, json!({"key_code": "h"}));

        let value = serde_json::to_value(ConsumableKeyEvent::chord("p", Modifier::CONTROL)).unwrap();
        assert_eq!(
            value,
            json!({"key_code": "p", "modifiers": {"mandatory": ["right_control"]}})
        );
    }

    #[test]
    fn test_event_shapes_are_never_equal() {
        let consumed: KeyEvent = ConsumableKeyEvent::key("a").into();
        let produced: KeyEvent = ProducibleKeyEvent::key("a").into();
        assert_ne!(consumed, produced);
    }
}
