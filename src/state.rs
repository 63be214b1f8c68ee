//! States: labeled values within one state dimension.
//!
//! A [`State`] such as `at_park` belongs to exactly one [`StateType`]
//! (`location`). ACTs record transitions between states; PPs remember the
//! label of the most recently applied state per dimension.

use std::fmt;

use crate::node::ConceptualNode;

/// The dimension a state belongs to.
///
/// The enumeration is open: anything outside the well-known dimensions is
/// carried as [`StateType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateType {
    Ownership,
    Location,
    Mental,
    Physical,
    Internal,
    Control,
    Custom(String),
}

impl StateType {
    pub fn as_str(&self) -> &str {
        match self {
            StateType::Ownership => "ownership",
            StateType::Location => "location",
            StateType::Mental => "mental",
            StateType::Physical => "physical",
            StateType::Internal => "internal",
            StateType::Control => "control",
            StateType::Custom(name) => name,
        }
    }
}

impl From<&str> for StateType {
    fn from(name: &str) -> Self {
        match name {
            "ownership" => StateType::Ownership,
            "location" => StateType::Location,
            "mental" => StateType::Mental,
            "physical" => StateType::Physical,
            "internal" => StateType::Internal,
            "control" => StateType::Control,
            other => StateType::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named value within a state dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub node: ConceptualNode,
    state_type: StateType,
}

impl State {
    pub fn new(label: impl Into<String>, state_type: impl Into<StateType>) -> Self {
        Self {
            node: ConceptualNode::new(label),
            state_type: state_type.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.node.label
    }

    /// Fixed at construction.
    pub fn state_type(&self) -> &StateType {
        &self.state_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_names_parse() {
        assert_eq!(StateType::from("control"), StateType::Control);
        assert_eq!(StateType::from("location"), StateType::Location);
        assert_eq!(
            StateType::from("progress"),
            StateType::Custom("progress".into())
        );
    }

    #[test]
    fn display_round_trips_custom_names() {
        assert_eq!(StateType::Custom("progress".into()).to_string(), "progress");
        assert_eq!(StateType::Mental.to_string(), "mental");
    }

    #[test]
    fn state_carries_label_and_type() {
        let state = State::new("at_park", StateType::Location);
        assert_eq!(state.label(), "at_park");
        assert_eq!(state.state_type(), &StateType::Location);
    }
}
