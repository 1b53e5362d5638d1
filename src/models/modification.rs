//! Manipulators and modifications, the units of the emitted ruleset.

use super::condition::{Condition, DelayedAction, SetVariable};
use super::event::{ConsumableKeyEvent, ProducibleKeyEvent};
use serde::Serialize;

/// One entry in a manipulator's `to` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ToEvent {
    /// A key event sent to the OS.
    Key(ProducibleKeyEvent),
    /// A variable assignment.
    SetVariable(SetVariable),
}

impl ToEvent {
    /// Returns the key event, if this is one.
    pub fn as_key(&self) -> Option<&ProducibleKeyEvent> {
        match self {
            Self::Key(event) => Some(event),
            Self::SetVariable(_) => None,
        }
    }
}

impl From<ProducibleKeyEvent> for ToEvent {
    fn from(event: ProducibleKeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<SetVariable> for ToEvent {
    fn from(event: SetVariable) -> Self {
        Self::SetVariable(event)
    }
}

/// Manipulator type. Only basic manipulators are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulatorKind {
    /// `from` → `to` rule.
    #[default]
    Basic,
}

/// One input → output rule.
///
/// Field order matches the order Karabiner users expect to read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Manipulator {
    /// Always `basic`.
    #[serde(rename = "type")]
    pub kind: ManipulatorKind,
    /// Guards, ANDed together.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// Input pattern.
    pub from: ConsumableKeyEvent,
    /// Output events, in order.
    pub to: Vec<ToEvent>,
    /// Follow-up fired after a timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_delayed_action: Option<DelayedAction>,
}

impl Manipulator {
    /// Creates a basic manipulator without conditions.
    pub fn basic(from: ConsumableKeyEvent, to: impl IntoIterator<Item = ToEvent>) -> Self {
        Self {
            kind: ManipulatorKind::Basic,
            conditions: Vec::new(),
            from,
            to: to.into_iter().collect(),
            to_delayed_action: None,
        }
    }

    /// Sets the guards.
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions = conditions.into_iter().collect();
        self
    }

    /// Sets the delayed follow-up.
    pub fn with_delayed_action(mut self, action: Option<DelayedAction>) -> Self {
        self.to_delayed_action = action;
        self
    }
}

/// A named group of manipulators, the top-level record of the ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Modification {
    /// Unique description, shown in Karabiner's UI.
    pub description: String,
    /// Guards applying to the whole modification.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// Rules, in order.
    pub manipulators: Vec<Manipulator>,
}

impl Modification {
    /// Creates a modification with the given manipulators.
    pub fn new(description: impl Into<String>, manipulators: Vec<Manipulator>) -> Self {
        Self {
            description: description.into(),
            conditions: Vec::new(),
            manipulators,
        }
    }

    /// Creates a modification holding one manipulator.
    pub fn single(description: impl Into<String>, manipulator: Manipulator) -> Self {
        Self::new(description, vec![manipulator])
    }

    /// Returns the manipulator if there is exactly one.
    pub fn sole_manipulator(&self) -> Option<&Manipulator> {
        match self.manipulators.as_slice() {
            [manipulator] => Some(manipulator),
            _ => None,
        }
    }
}
