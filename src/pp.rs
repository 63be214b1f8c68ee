//! Picture producers: the concrete participants of an event.

use std::fmt;

use indexmap::IndexMap;

use crate::node::{ConceptualNode, PropertyValue};
use crate::state::{State, StateType};

/// What kind of participant a PP is. Open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Person,
    Object,
    Location,
    Vehicle,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Person => "person",
            Category::Object => "object",
            Category::Location => "location",
            Category::Vehicle => "vehicle",
            Category::Custom(name) => name,
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        match name {
            "person" => Category::Person,
            "object" => Category::Object,
            "location" => Category::Location,
            "vehicle" => Category::Vehicle,
            other => Category::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A participant that tracks its current state per state dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Pp {
    pub node: ConceptualNode,
    pub category: Category,
    current_states: IndexMap<StateType, String>,
}

impl Pp {
    pub fn new(name: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            node: ConceptualNode::new(name),
            category: category.into(),
            current_states: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.node.add_property(key, value);
        self
    }

    pub fn label(&self) -> &str {
        &self.node.label
    }

    /// Make `state` the current state of its dimension. Last write wins.
    pub fn update_state(&mut self, state: &State) {
        self.current_states
            .insert(state.state_type().clone(), state.label().to_string());
    }

    /// Label of the current state for `state_type`, if one was ever applied.
    pub fn get_state(&self, state_type: &StateType) -> Option<&str> {
        self.current_states.get(state_type).map(String::as_str)
    }

    /// Current states in the order their dimensions were first touched.
    pub fn current_states(&self) -> &IndexMap<StateType, String> {
        &self.current_states
    }
}
