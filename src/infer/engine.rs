//! Inference engine: resolves unfilled slots of queued ACTs.

use indexmap::IndexMap;

use crate::act::Primitive;
use crate::error::InferError;
use crate::graph::ConceptualDependencyGraph;
use crate::knowledge::KnowledgeBase;
use crate::node::{Filler, NodeId};
use crate::state::StateType;

use super::provider::{PromptProvider, SlotProvider, SlotRequest};
use super::{InferenceReport, Resolution, ResolutionSource};

/// Result type for inference operations.
pub type InferResult<T> = std::result::Result<T, InferError>;

/// Orchestrates slot resolution over a queue of ACTs.
///
/// The engine only holds node ids; the ACTs themselves live in the graph
/// passed to [`run`](Self::run) and are mutated in place.
pub struct InferenceEngine {
    actions: Vec<NodeId>,
    context: IndexMap<String, Filler>,
    knowledge_base: Option<KnowledgeBase>,
    provider: Box<dyn SlotProvider>,
}

impl InferenceEngine {
    /// Create an engine that prompts on stdin/stdout as its last resort.
    pub fn new(knowledge_base: Option<KnowledgeBase>) -> Self {
        Self {
            actions: Vec::new(),
            context: IndexMap::new(),
            knowledge_base,
            provider: Box::new(PromptProvider::stdio()),
        }
    }

    /// Replace the slot provider.
    pub fn with_provider(mut self, provider: impl SlotProvider + 'static) -> Self {
        self.set_provider(provider);
        self
    }

    pub fn set_provider(&mut self, provider: impl SlotProvider + 'static) {
        self.provider = Box::new(provider);
    }

    /// Set or replace the knowledge base.
    pub fn set_knowledge_base(&mut self, knowledge_base: KnowledgeBase) {
        self.knowledge_base = Some(knowledge_base);
    }

    pub fn knowledge_base(&self) -> Option<&KnowledgeBase> {
        self.knowledge_base.as_ref()
    }

    /// Queue a top-level ACT. Actions are processed in insertion order.
    pub fn add_action(&mut self, action: NodeId) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[NodeId] {
        &self.actions
    }

    /// Replace the whole context.
    pub fn set_context<K, V>(&mut self, context: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Filler>,
    {
        self.context = context
            .into_iter()
            .map(|(slot, value)| (slot.into(), value.into()))
            .collect();
    }

    pub fn context(&self) -> &IndexMap<String, Filler> {
        &self.context
    }

    /// Process every queued ACT, then log the final ACT trees.
    pub fn run(&mut self, graph: &mut ConceptualDependencyGraph) -> InferResult<InferenceReport> {
        let report = self.process_actions(graph)?;
        for &action in &report.actions {
            tracing::info!("final action:\n{}", graph.render_act_tree(action));
        }
        Ok(report)
    }

    /// Resolve the slots of every queued ACT and of its immediate sub-actions.
    ///
    /// Sub-actions of sub-actions are not visited.
    pub fn process_actions(
        &mut self,
        graph: &mut ConceptualDependencyGraph,
    ) -> InferResult<InferenceReport> {
        let mut report = InferenceReport {
            actions: self.actions.clone(),
            resolutions: Vec::new(),
        };

        for action in self.actions.clone() {
            tracing::info!(action = %graph.label(action), "processing action");
            report.resolutions.extend(self.fill_slots(graph, action)?);

            let nested = graph.act(action)?.nested_actions().to_vec();
            for sub_action in nested {
                tracing::info!(action = %graph.label(sub_action), "processing nested action");
                report.resolutions.extend(self.fill_slots(graph, sub_action)?);
            }
        }

        let processed: Vec<String> = report
            .actions
            .iter()
            .map(|&action| graph.describe_node(action))
            .collect();
        tracing::info!(
            actions = report.actions.len(),
            resolved = report.resolutions.len(),
            "processed actions: [{}]",
            processed.join(", ")
        );
        Ok(report)
    }

    /// Resolve every unfilled slot of one ACT, in slot order.
    pub fn fill_slots(
        &mut self,
        graph: &mut ConceptualDependencyGraph,
        action: NodeId,
    ) -> InferResult<Vec<Resolution>> {
        let names = graph.act(action)?.slot_names();
        let mut resolutions = Vec::new();
        for slot in names {
            if let Some(resolution) = self.resolve_slot(graph, action, &slot)? {
                resolutions.push(resolution);
            }
        }
        Ok(resolutions)
    }

    /// Resolve one slot. A slot that is already filled is left alone and
    /// yields `None` without consulting any resolver.
    pub fn resolve_slot(
        &mut self,
        graph: &mut ConceptualDependencyGraph,
        action: NodeId,
        slot: &str,
    ) -> InferResult<Option<Resolution>> {
        let act = graph.act(action)?;
        if act.is_slot_filled(slot) {
            return Ok(None);
        }
        let action_label = act.label().to_string();
        let primitive = act.primitive();

        let (value, source) = self.infer_value(&action_label, primitive, slot)?;
        graph.act_mut(action)?.fill_slot(slot, value.clone());

        tracing::debug!(
            action = %action_label,
            slot,
            value = %graph.describe_filler(&value),
            %source,
            "slot resolved"
        );

        Ok(Some(Resolution {
            action,
            action_label,
            slot: slot.to_string(),
            value,
            source,
        }))
    }

    fn infer_value(
        &mut self,
        action: &str,
        primitive: Primitive,
        slot: &str,
    ) -> InferResult<(Filler, ResolutionSource)> {
        if let Some(value) = self.context.get(slot) {
            return Ok((value.clone(), ResolutionSource::Context));
        }

        if let Some(kb) = &self.knowledge_base {
            if let Some(value) = kb.get_rule(action, slot) {
                return Ok((value.clone(), ResolutionSource::Rule));
            }
            if let Some(value) = kb.get_default(slot) {
                return Ok((value.clone(), ResolutionSource::Default));
            }
            if let Some(state) = transition_hint(primitive, slot).and_then(|ty| kb.state_for(&ty)) {
                return Ok((
                    Filler::Text(state.label().to_string()),
                    ResolutionSource::StateHint,
                ));
            }
        }

        let value = self.provider.provide(&SlotRequest { action, slot })?;
        Ok((value, ResolutionSource::Elicited))
    }
}

/// Dimension a `from`/`to` slot of `primitive` most likely refers to.
fn transition_hint(primitive: Primitive, slot: &str) -> Option<StateType> {
    if !slot.eq_ignore_ascii_case("from") && !slot.eq_ignore_ascii_case("to") {
        return None;
    }
    match primitive {
        Primitive::Ptrans | Primitive::Move => Some(StateType::Location),
        _ => Some(StateType::Ownership),
    }
}
