//! ACTs: events built from a primitive, its role slots and their effects.
//!
//! An [`Act`] carries the typed canonical slots of its [`Primitive`], an open
//! map of ad hoc slots (kept on its [`ConceptualNode`]), the ordered list of
//! sub-actions nested under it, the state changes it causes and the
//! instruments used to perform it.
//!
//! Operations that must validate other nodes (nesting, state changes,
//! instruments, propagation) live on the graph, see [`crate::graph::effects`].

pub mod primitive;

use crate::error::ActError;
use crate::node::{ConceptualNode, Filler, NodeId};
use crate::state::StateType;

pub use primitive::{Primitive, SlotRecord};

/// Reserved slot name. Instruments live in their own list, set through
/// [`ConceptualDependencyGraph::set_instruments`](crate::graph::ConceptualDependencyGraph::set_instruments).
pub const INSTRUMENTS_SLOT: &str = "instruments";

/// Result type for ACT construction and propagation.
pub type ActResult<T> = std::result::Result<T, ActError>;

/// One recorded transition caused by an ACT.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub state_type: StateType,
    /// Kept for audit only; never checked against the PP's current state.
    pub from_state: NodeId,
    pub to_state: NodeId,
}

/// A primitive ACT instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Act {
    /// Label, properties and ad hoc slots.
    pub node: ConceptualNode,
    pub tense: String,
    /// `None` means unspecified.
    pub modality: Option<String>,
    slots: SlotRecord,
    pub(crate) nested_actions: Vec<NodeId>,
    pub(crate) state_changes: Vec<StateChange>,
    pub(crate) instruments: Vec<NodeId>,
}

impl Act {
    /// A fresh ACT: present tense, no modality, every slot unfilled.
    pub fn new(primitive: Primitive) -> Self {
        Self {
            node: ConceptualNode::new(primitive.label()),
            tense: "present".into(),
            modality: None,
            slots: primitive.empty_slots(),
            nested_actions: Vec::new(),
            state_changes: Vec::new(),
            instruments: Vec::new(),
        }
    }

    pub fn with_tense(mut self, tense: impl Into<String>) -> Self {
        self.tense = tense.into();
        self
    }

    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = Some(modality.into());
        self
    }

    pub fn primitive(&self) -> Primitive {
        self.slots.primitive()
    }

    pub fn label(&self) -> &str {
        &self.node.label
    }

    /// Fill a slot. Names outside the primitive's schema become ad hoc slots.
    ///
    /// [`INSTRUMENTS_SLOT`] is not a slot; the call is ignored with a warning.
    pub fn fill_slot(&mut self, name: &str, value: impl Into<Filler>) {
        if self.rejects_instruments(name) {
            return;
        }
        match self.slots.get_mut(name) {
            Some(slot) => *slot = Some(value.into()),
            None => self.node.fill_slot(name, value),
        }
    }

    /// Mark a slot unfilled. Unknown names are registered as ad hoc slots.
    pub fn clear_slot(&mut self, name: &str) {
        if self.rejects_instruments(name) {
            return;
        }
        match self.slots.get_mut(name) {
            Some(slot) => *slot = None,
            None => self.node.clear_slot(name),
        }
    }

    fn rejects_instruments(&self, name: &str) -> bool {
        if name != INSTRUMENTS_SLOT {
            return false;
        }
        tracing::warn!(
            action = self.label(),
            "instruments are not a slot, use ConceptualDependencyGraph::set_instruments"
        );
        true
    }

    pub fn is_slot_filled(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    pub fn slot(&self, name: &str) -> Option<&Filler> {
        match self.slots.get(name) {
            Some(value) => value.as_ref(),
            None if name == INSTRUMENTS_SLOT => None,
            None => self.node.slot(name),
        }
    }

    /// The typed canonical slots.
    pub fn slots(&self) -> &SlotRecord {
        &self.slots
    }

    /// Every slot, canonical ones first in schema order, then ad hoc slots in
    /// insertion order. An `instruments` entry written straight onto
    /// [`node`](Self::node) is skipped.
    pub fn slot_entries(&self) -> impl Iterator<Item = (&str, Option<&Filler>)> + '_ {
        let canonical = self
            .primitive()
            .slot_names()
            .iter()
            .map(|&name| (name, self.slots.get(name).and_then(Option::as_ref)));
        let ad_hoc = self
            .node
            .slots()
            .iter()
            .filter(|(name, _)| name.as_str() != INSTRUMENTS_SLOT)
            .map(|(name, value)| (name.as_str(), value.as_ref()));
        canonical.chain(ad_hoc)
    }

    /// Names of all slots in resolution order.
    pub fn slot_names(&self) -> Vec<String> {
        self.slot_entries().map(|(name, _)| name.to_string()).collect()
    }

    /// The node filling the `object` slot, if the filler is a node.
    pub fn object(&self) -> Option<NodeId> {
        self.slot("object").and_then(Filler::as_node)
    }

    pub fn nested_actions(&self) -> &[NodeId] {
        &self.nested_actions
    }

    pub fn state_changes(&self) -> &[StateChange] {
        &self.state_changes
    }

    /// Tools used to perform the action, in order. Empty by default.
    pub fn instruments(&self) -> &[NodeId] {
        &self.instruments
    }
}
