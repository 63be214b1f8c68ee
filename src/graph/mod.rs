//! Conceptual dependency graph: an arena of nodes plus typed directed relations.
//!
//! The graph owns every PP, ACT and State of one parsed utterance. Nodes are
//! stored in a `petgraph` [`DiGraph`] and addressed by [`NodeId`]; relations are
//! the graph's edges. Nothing is ever removed, so ids stay valid and both nodes
//! and relations iterate in insertion order.
//!
//! - [`effects`]: nesting, state changes, instruments and state propagation
//! - [`render`]: human-readable dumps of nodes, relations and ACT trees

pub mod effects;
pub mod render;

pub use effects::{
    AppliedChange, add_control_state_change, add_internal_state_change, add_location_change,
    add_mental_state_change, add_ownership_change, add_physical_position_change,
    add_physical_state_change,
};

use indexmap::IndexMap;
use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

use crate::act::Act;
use crate::error::{ActError, GraphError};
use crate::node::{ConceptualNode, NodeId, PropertyValue};
use crate::pp::Pp;
use crate::state::State;

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Anything the graph can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Pp(Pp),
    Act(Act),
    State(State),
}

impl Node {
    pub fn conceptual(&self) -> &ConceptualNode {
        match self {
            Node::Pp(pp) => &pp.node,
            Node::Act(act) => &act.node,
            Node::State(state) => &state.node,
        }
    }

    pub fn label(&self) -> &str {
        &self.conceptual().label
    }

    /// Kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Pp(_) => "PP",
            Node::Act(_) => "ACT",
            Node::State(_) => "State",
        }
    }

    pub fn as_pp(&self) -> Option<&Pp> {
        match self {
            Node::Pp(pp) => Some(pp),
            _ => None,
        }
    }

    pub fn as_act(&self) -> Option<&Act> {
        match self {
            Node::Act(act) => Some(act),
            _ => None,
        }
    }

    pub fn as_state(&self) -> Option<&State> {
        match self {
            Node::State(state) => Some(state),
            _ => None,
        }
    }
}

impl From<Pp> for Node {
    fn from(pp: Pp) -> Self {
        Node::Pp(pp)
    }
}

impl From<Act> for Node {
    fn from(act: Act) -> Self {
        Node::Act(act)
    }
}

impl From<State> for Node {
    fn from(state: State) -> Self {
        Node::State(state)
    }
}

/// A directed, typed edge between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptualDependencyRelation {
    pub from: NodeId,
    pub to: NodeId,
    /// Free-form: "agent", "co-agent", "instrument", "to_location", ...
    pub relation_type: String,
    pub properties: IndexMap<String, PropertyValue>,
}

impl ConceptualDependencyRelation {
    pub fn new(from: NodeId, to: NodeId, relation_type: impl Into<String>) -> Self {
        Self {
            from,
            to,
            relation_type: relation_type.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// True when every criterion equals the property of the same key.
    pub fn matches(&self, criteria: &[(&str, PropertyValue)]) -> bool {
        criteria
            .iter()
            .all(|(key, value)| self.properties.get(*key) == Some(value))
    }
}

/// Append-only container of the nodes and relations of one utterance.
#[derive(Debug, Clone, Default)]
pub struct ConceptualDependencyGraph {
    graph: DiGraph<Node, ConceptualDependencyRelation>,
}

impl ConceptualDependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its handle.
    pub fn add_node(&mut self, node: impl Into<Node>) -> NodeId {
        let node = node.into();
        tracing::trace!(label = node.label(), kind = node.kind(), "adding node");
        NodeId::from_index(self.graph.add_node(node))
    }

    /// Add a relation. Both endpoints must already be nodes of this graph.
    pub fn add_relation(&mut self, relation: ConceptualDependencyRelation) -> GraphResult<()> {
        for (id, role) in [(relation.from, "source"), (relation.to, "target")] {
            if self.graph.node_weight(id.index()).is_none() {
                return Err(GraphError::DanglingEndpoint {
                    id: id.to_string(),
                    role,
                });
            }
        }
        self.graph
            .add_edge(relation.from.index(), relation.to.index(), relation);
        Ok(())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.node_weight(id.index()).is_some()
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.graph
            .node_weight(id.index())
            .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.graph
            .node_weight_mut(id.index())
            .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })
    }

    /// Label of a node, or its id when the node is unknown.
    pub fn label(&self, id: NodeId) -> String {
        self.node(id)
            .map(|node| node.label().to_string())
            .unwrap_or_else(|_| id.to_string())
    }

    pub fn pp(&self, id: NodeId) -> GraphResult<&Pp> {
        let node = self.node(id)?;
        node.as_pp().ok_or_else(|| wrong_kind(id, "PP", node))
    }

    pub fn pp_mut(&mut self, id: NodeId) -> GraphResult<&mut Pp> {
        match self.node_mut(id)? {
            Node::Pp(pp) => Ok(pp),
            other => Err(wrong_kind(id, "PP", other)),
        }
    }

    pub fn state(&self, id: NodeId) -> GraphResult<&State> {
        let node = self.node(id)?;
        node.as_state().ok_or_else(|| wrong_kind(id, "State", node))
    }

    /// Look up an ACT; anything else is reported as [`ActError::NotAnAct`].
    pub fn act(&self, id: NodeId) -> Result<&Act, ActError> {
        match self.node(id)? {
            Node::Act(act) => Ok(act),
            other => Err(not_an_act(other)),
        }
    }

    pub fn act_mut(&mut self, id: NodeId) -> Result<&mut Act, ActError> {
        match self.node_mut(id)? {
            Node::Act(act) => Ok(act),
            other => Err(not_an_act(other)),
        }
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.graph
            .node_indices()
            .map(|idx| (NodeId::from_index(idx), &self.graph[idx]))
    }

    /// ACT nodes in insertion order.
    pub fn acts(&self) -> impl Iterator<Item = (NodeId, &Act)> + '_ {
        self.nodes()
            .filter_map(|(id, node)| node.as_act().map(|act| (id, act)))
    }

    /// Relations in insertion order.
    pub fn relations(&self) -> impl Iterator<Item = &ConceptualDependencyRelation> + '_ {
        self.graph.edge_weights()
    }

    /// Relations whose properties match every `key = value` criterion.
    ///
    /// Only the open property map is consulted, never the relation type or
    /// the endpoints.
    pub fn find_relations(
        &self,
        criteria: &[(&str, PropertyValue)],
    ) -> Vec<&ConceptualDependencyRelation> {
        self.relations()
            .filter(|relation| relation.matches(criteria))
            .collect()
    }

    /// Relations of the given type, in insertion order.
    pub fn relations_of_type(&self, relation_type: &str) -> Vec<&ConceptualDependencyRelation> {
        self.relations()
            .filter(|relation| relation.relation_type == relation_type)
            .collect()
    }

    /// Outgoing relations of a node, in insertion order.
    pub fn relations_from(&self, id: NodeId) -> Vec<&ConceptualDependencyRelation> {
        if !self.contains(id) {
            return vec![];
        }
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(id.index(), Direction::Outgoing)
            .map(|edge| (edge.id(), edge.weight()))
            .collect();
        // petgraph walks adjacency lists newest-first.
        edges.sort_by_key(|(edge_id, _)| *edge_id);
        edges.into_iter().map(|(_, relation)| relation).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn wrong_kind(id: NodeId, expected: &'static str, node: &Node) -> GraphError {
    GraphError::WrongKind {
        id: id.to_string(),
        expected,
        actual: node.kind(),
    }
}

fn not_an_act(node: &Node) -> ActError {
    ActError::NotAnAct {
        label: node.label().to_string(),
        kind: node.kind(),
    }
}
