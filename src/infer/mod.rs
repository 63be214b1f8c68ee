//! Slot-filling inference.
//!
//! The [`InferenceEngine`] resolves every unfilled slot of its queued ACTs
//! through a fixed chain, first match wins:
//!
//! 1. the engine's context,
//! 2. a knowledge base rule for the ACT's label,
//! 3. a knowledge base default for the slot name,
//! 4. for `from`/`to` slots, the knowledge base's default state of the
//!    dimension the ACT moves (location for PTRANS and MOVE, ownership
//!    otherwise),
//! 5. the engine's [`SlotProvider`] (an operator prompt by default).

pub mod engine;
pub mod provider;

use std::fmt;
use std::fmt::Write;

use crate::graph::ConceptualDependencyGraph;
use crate::node::{Filler, NodeId};

pub use engine::{InferResult, InferenceEngine};
pub use provider::{FailUnresolved, PromptProvider, SlotProvider, SlotRequest};

/// Which step of the chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSource {
    Context,
    Rule,
    Default,
    StateHint,
    Elicited,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionSource::Context => "context",
            ResolutionSource::Rule => "rule",
            ResolutionSource::Default => "default",
            ResolutionSource::StateHint => "state hint",
            ResolutionSource::Elicited => "elicited",
        };
        f.write_str(name)
    }
}

/// A slot that was unfilled and now holds `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub action: NodeId,
    pub action_label: String,
    pub slot: String,
    pub value: Filler,
    pub source: ResolutionSource,
}

/// Outcome of one inference run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceReport {
    /// The queued top-level ACTs, in processing order.
    pub actions: Vec<NodeId>,
    /// Every slot filled during the run, in resolution order.
    pub resolutions: Vec<Resolution>,
}

impl InferenceReport {
    pub fn from_source(&self, source: ResolutionSource) -> impl Iterator<Item = &Resolution> + '_ {
        self.resolutions
            .iter()
            .filter(move |resolution| resolution.source == source)
    }

    /// The resolution for `slot` of `action`, if the run filled it.
    pub fn resolution(&self, action: NodeId, slot: &str) -> Option<&Resolution> {
        self.resolutions
            .iter()
            .find(|resolution| resolution.action == action && resolution.slot == slot)
    }

    /// The resolved slots followed by the final ACT trees.
    pub fn render(&self, graph: &ConceptualDependencyGraph) -> String {
        let mut out = String::new();
        if !self.resolutions.is_empty() {
            let _ = writeln!(out, "Resolved Slots:");
            for resolution in &self.resolutions {
                let _ = writeln!(
                    out,
                    "  {}.{} = {} ({})",
                    resolution.action_label,
                    resolution.slot,
                    graph.describe_filler(&resolution.value),
                    resolution.source
                );
            }
        }
        let _ = writeln!(out, "Final Actions:");
        for &action in &self.actions {
            out.push_str(&graph.render_act_tree(action));
        }
        out
    }
}
