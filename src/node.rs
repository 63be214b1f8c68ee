//! Core node types shared by every conceptual structure.
//!
//! Every participant, state and action is a [`ConceptualNode`] at heart: a
//! display label, an open property map and an open slot map. Nodes live in a
//! [`ConceptualDependencyGraph`](crate::graph::ConceptualDependencyGraph)
//! arena and are referred to by [`NodeId`].

use std::fmt;

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;

/// Arbitrary metadata attached to nodes and relations.
pub type PropertyValue = serde_json::Value;

/// Handle to a node inside the graph arena that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NodeIndex);

impl NodeId {
    pub(crate) fn from_index(index: NodeIndex) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(self) -> NodeIndex {
        self.0
    }

    /// Position of the node in insertion order.
    pub fn get(self) -> usize {
        self.0.index()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// The value filling a slot: another node of the graph, or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filler {
    /// A PP, ACT or State held by the same graph.
    Node(NodeId),
    /// A literal value (typed by an operator or taken from a knowledge base).
    Text(String),
}

impl Filler {
    /// The node this filler refers to, if any.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Filler::Node(id) => Some(*id),
            Filler::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Filler::Text(text) => Some(text),
            Filler::Node(_) => None,
        }
    }
}

impl From<NodeId> for Filler {
    fn from(id: NodeId) -> Self {
        Filler::Node(id)
    }
}

impl From<&str> for Filler {
    fn from(text: &str) -> Self {
        Filler::Text(text.to_string())
    }
}

impl From<String> for Filler {
    fn from(text: String) -> Self {
        Filler::Text(text)
    }
}

impl fmt::Display for Filler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filler::Node(id) => write!(f, "{id}"),
            Filler::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Base entity: label, open properties and open role slots.
///
/// A slot whose value is `None` is registered but unfilled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConceptualNode {
    /// Display identity. Not required to be unique.
    pub label: String,
    properties: IndexMap<String, PropertyValue>,
    slots: IndexMap<String, Option<Filler>>,
}

impl ConceptualNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            properties: IndexMap::new(),
            slots: IndexMap::new(),
        }
    }

    /// Builder form of [`add_property`](Self::add_property).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.add_property(key, value);
        self
    }

    /// Set a property, replacing any previous value.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> &IndexMap<String, PropertyValue> {
        &self.properties
    }

    /// Fill (or overwrite) a slot.
    pub fn fill_slot(&mut self, name: impl Into<String>, value: impl Into<Filler>) {
        self.slots.insert(name.into(), Some(value.into()));
    }

    /// Register a slot as unfilled, clearing any previous value.
    pub fn clear_slot(&mut self, name: impl Into<String>) {
        self.slots.insert(name.into(), None);
    }

    pub fn is_slot_filled(&self, name: &str) -> bool {
        matches!(self.slots.get(name), Some(Some(_)))
    }

    pub fn slot(&self, name: &str) -> Option<&Filler> {
        self.slots.get(name).and_then(Option::as_ref)
    }

    /// Slots in insertion order, filled or not.
    pub fn slots(&self) -> &IndexMap<String, Option<Filler>> {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn properties_keep_insertion_order() {
        let node = ConceptualNode::new("Park")
            .with_property("size", "large")
            .with_property("open", true);
        let keys: Vec<_> = node.properties().keys().cloned().collect();
        assert_eq!(keys, vec!["size", "open"]);
        assert_eq!(node.property("open"), Some(&json!(true)));
    }

    #[test]
    fn cleared_slot_is_registered_but_unfilled() {
        let mut node = ConceptualNode::new("x");
        node.clear_slot("object");
        assert!(node.slots().contains_key("object"));
        assert!(!node.is_slot_filled("object"));
        assert!(!node.is_slot_filled("missing"));

        node.fill_slot("object", "luggage");
        assert!(node.is_slot_filled("object"));
        assert_eq!(node.slot("object").and_then(Filler::as_text), Some("luggage"));
    }

    #[test]
    fn filler_display() {
        assert_eq!(Filler::from("home").to_string(), "\"home\"");
        let id = NodeId::from_index(NodeIndex::new(3));
        assert_eq!(Filler::from(id).to_string(), "#3");
        assert_eq!(id.get(), 3);
    }
}
