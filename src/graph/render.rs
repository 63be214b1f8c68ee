//! Human-readable dumps of a graph and its ACT trees.
//!
//! The wording is for people and logs; nothing parses it back.

use std::collections::HashSet;
use std::fmt::Write;

use crate::act::Act;
use crate::node::{Filler, NodeId};

use super::{ConceptualDependencyGraph, Node};

impl ConceptualDependencyGraph {
    /// `ConceptualDependencyGraph(nodes=N, relations=M)`.
    pub fn summary(&self) -> String {
        format!(
            "ConceptualDependencyGraph(nodes={}, relations={})",
            self.node_count(),
            self.relation_count()
        )
    }

    /// A filler as people read it: node labels instead of ids.
    pub fn describe_filler(&self, filler: &Filler) -> String {
        match filler {
            Filler::Node(id) => self.label(*id),
            Filler::Text(text) => text.clone(),
        }
    }

    /// One-line description of a node.
    pub fn describe_node(&self, id: NodeId) -> String {
        match self.node(id) {
            Ok(Node::Pp(pp)) => {
                let states: Vec<String> = pp
                    .current_states()
                    .iter()
                    .map(|(state_type, label)| format!("{state_type}: {label}"))
                    .collect();
                format!(
                    "PP({}, category={}, current_states={{{}}})",
                    pp.label(),
                    pp.category,
                    states.join(", ")
                )
            }
            Ok(Node::State(state)) => {
                format!("State({}, state_type={})", state.label(), state.state_type())
            }
            Ok(Node::Act(act)) => self.describe_act(act),
            Err(_) => format!("<missing {id}>"),
        }
    }

    fn describe_act(&self, act: &Act) -> String {
        let slots: Vec<String> = act
            .slot_entries()
            .map(|(name, value)| match value {
                Some(filler) => format!("{name}: {}", self.describe_filler(filler)),
                None => format!("{name}: None"),
            })
            .collect();
        let changes: Vec<String> = act
            .state_changes()
            .iter()
            .map(|change| {
                format!(
                    "{}: {} → {}",
                    change.state_type,
                    self.label(change.from_state),
                    self.label(change.to_state)
                )
            })
            .collect();
        let instruments: Vec<String> = act.instruments().iter().map(|&id| self.label(id)).collect();
        format!(
            "ACT({}, primitive={}, tense={}, modality={}, slots={{{}}}, state_changes=[{}], instruments=[{}])",
            act.label(),
            act.primitive().description(),
            act.tense,
            act.modality.as_deref().unwrap_or("None"),
            slots.join(", "),
            changes.join(", "),
            instruments.join(", ")
        )
    }

    /// An ACT and its nested actions, one per line, indented by depth.
    ///
    /// A node already printed on the current path is shown as a back
    /// reference instead of being expanded again.
    pub fn render_act_tree(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut on_path = HashSet::new();
        self.render_act_level(id, 0, &mut on_path, &mut out);
        out
    }

    fn render_act_level(
        &self,
        id: NodeId,
        level: usize,
        on_path: &mut HashSet<NodeId>,
        out: &mut String,
    ) {
        let indent = "  ".repeat(level);
        if !on_path.insert(id) {
            let _ = writeln!(out, "{indent}(cycle back to {})", self.label(id));
            return;
        }
        let _ = writeln!(out, "{indent}{}", self.describe_node(id));
        if let Ok(act) = self.act(id) {
            if !act.nested_actions().is_empty() {
                let _ = writeln!(out, "{indent}Nested Actions:");
                for &nested in act.nested_actions() {
                    self.render_act_level(nested, level + 1, on_path, out);
                }
            }
        }
        on_path.remove(&id);
    }

    /// Every node, one per line.
    pub fn render_nodes(&self) -> String {
        let mut out = String::new();
        for (id, _) in self.nodes() {
            let _ = writeln!(out, "{}", self.describe_node(id));
        }
        out
    }

    /// Every relation as `from -> to (Type: relation_type)`, one per line.
    pub fn render_relations(&self) -> String {
        let mut out = String::new();
        for relation in self.relations() {
            let _ = writeln!(
                out,
                "{} -> {} (Type: {})",
                self.label(relation.from),
                self.label(relation.to),
                relation.relation_type
            );
        }
        out
    }

    /// Tree of every top-level ACT, i.e. those not nested under another ACT.
    pub fn render_acts(&self) -> String {
        let nested: HashSet<NodeId> = self
            .acts()
            .flat_map(|(_, act)| act.nested_actions().iter().copied())
            .collect();
        self.acts()
            .filter(|(id, _)| !nested.contains(id))
            .map(|(id, _)| self.render_act_tree(id))
            .collect()
    }
}
