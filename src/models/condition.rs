//! Conditions and variable mutations.
//!
//! These describe behaviour Karabiner executes at runtime. Nothing here is
//! ever evaluated by the generator.

use serde::Serialize;

/// Kind of a condition. Only variable guards are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Matches when a variable equals a value.
    VariableIf,
}

/// Guard that only lets a manipulator match when `name == value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Condition {
    #[serde(rename = "type")]
    kind: ConditionKind,
    name: String,
    value: String,
}

impl Condition {
    /// Creates a `variable_if` condition.
    pub fn variable_if(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: ConditionKind::VariableIf,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the guarded variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expected value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A variable assignment inside a `set_variable` event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VariableAssignment {
    /// Variable name.
    pub name: String,
    /// New value.
    pub value: String,
}

/// Output event that sets a process-wide variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SetVariable {
    set_variable: VariableAssignment,
}

impl SetVariable {
    /// Creates a `set_variable` event.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            set_variable: VariableAssignment {
                name: name.into(),
                value: value.into(),
            },
        }
    }

    /// Returns the assigned variable name.
    pub fn name(&self) -> &str {
        &self.set_variable.name
    }

    /// Returns the assigned value.
    pub fn value(&self) -> &str {
        &self.set_variable.value
    }
}

/// Side effects fired after the triggering key press times out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DelayedAction {
    /// Fired when no other key arrives before the timeout.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_invoked: Vec<SetVariable>,
    /// Fired when another key arrives first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_canceled: Vec<SetVariable>,
}

impl DelayedAction {
    /// Creates a delayed action that only fires on timeout.
    pub fn on_invoked(events: impl IntoIterator<Item = SetVariable>) -> Self {
        Self {
            to_if_invoked: events.into_iter().collect(),
            to_if_canceled: Vec::new(),
        }
    }

    /// Adds events fired when another key cancels the timeout.
    pub fn with_canceled(mut self, events: impl IntoIterator<Item = SetVariable>) -> Self {
        self.to_if_canceled.extend(events);
        self
    }
}
