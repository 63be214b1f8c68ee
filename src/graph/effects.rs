//! Structural edits of ACTs and propagation of their state changes.
//!
//! These operations validate the nodes they are handed (a nested action must
//! be an ACT, state change endpoints must be States, instruments must be PPs)
//! and leave the ACT untouched when validation fails.

use std::collections::HashSet;

use crate::act::{ActResult, StateChange};
use crate::error::ActError;
use crate::node::NodeId;
use crate::state::{State, StateType};

use super::{ConceptualDependencyGraph, Node};

/// One state update performed by [`ConceptualDependencyGraph::process_state_changes`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedChange {
    /// The PP whose state table changed.
    pub target: NodeId,
    /// The recorded dimension of the change.
    pub state_type: StateType,
    pub from_label: String,
    pub to_label: String,
    /// True when the target is one of the ACT's instruments.
    pub via_instrument: bool,
}

impl ConceptualDependencyGraph {
    /// Nest `child` under `parent` as a subordinate sub-event.
    ///
    /// Rejects non-ACT children and any nesting that would make an ACT its own
    /// descendant.
    pub fn add_nested_action(&mut self, parent: NodeId, child: NodeId) -> ActResult<()> {
        self.act(parent)?;
        let child_node = self.node(child)?;
        if child_node.as_act().is_none() {
            return Err(ActError::InvalidNestedAction {
                label: child_node.label().to_string(),
                kind: child_node.kind(),
            });
        }
        if self.reaches(child, parent) {
            return Err(ActError::NestingCycle {
                parent: self.label(parent),
                child: self.label(child),
            });
        }
        self.act_mut(parent)?.nested_actions.push(child);
        Ok(())
    }

    /// True when `target` is `start` or nested (transitively) under it.
    fn reaches(&self, start: NodeId, target: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if !visited.insert(id) {
                continue;
            }
            if let Ok(act) = self.act(id) {
                stack.extend(act.nested_actions.iter().copied());
            }
        }
        false
    }

    /// Record that `act` moves a participant from one state to another.
    ///
    /// Changes accumulate in order; duplicates and contradictions are kept.
    pub fn add_state_change(
        &mut self,
        act: NodeId,
        state_type: impl Into<StateType>,
        from_state: NodeId,
        to_state: NodeId,
    ) -> ActResult<()> {
        let action = self.act(act)?.label().to_string();
        for id in [from_state, to_state] {
            let node = self.node(id)?;
            if node.as_state().is_none() {
                return Err(ActError::InvalidStateChange {
                    action,
                    label: node.label().to_string(),
                    kind: node.kind(),
                });
            }
        }
        self.act_mut(act)?.state_changes.push(StateChange {
            state_type: state_type.into(),
            from_state,
            to_state,
        });
        Ok(())
    }

    /// Replace the instrument list of `act`. Every element must be a PP.
    pub fn set_instruments(&mut self, act: NodeId, instruments: &[NodeId]) -> ActResult<()> {
        let action = self.act(act)?.label().to_string();
        for &id in instruments {
            let node = self.node(id)?;
            if node.as_pp().is_none() {
                return Err(ActError::InvalidInstrument {
                    action,
                    label: node.label().to_string(),
                    kind: node.kind(),
                });
            }
        }
        self.act_mut(act)?.instruments = instruments.to_vec();
        Ok(())
    }

    /// Apply the recorded state changes of `act`.
    ///
    /// Every change, in order, updates the PP in the `object` slot (if the slot
    /// holds a PP). Instruments only receive `control` changes. `from_state` is
    /// reported but never checked against the PP's current state.
    pub fn process_state_changes(&mut self, act: NodeId) -> ActResult<Vec<AppliedChange>> {
        let (changes, object, instruments) = {
            let act = self.act(act)?;
            (
                act.state_changes.clone(),
                act.object(),
                act.instruments.clone(),
            )
        };

        let mut resolved: Vec<(StateType, State, State)> = Vec::with_capacity(changes.len());
        for change in &changes {
            resolved.push((
                change.state_type.clone(),
                self.state(change.from_state)?.clone(),
                self.state(change.to_state)?.clone(),
            ));
        }

        let mut applied = Vec::new();

        if let Some(id) = object {
            let node = self.node(id)?;
            let (is_pp, kind) = (matches!(node, Node::Pp(_)), node.kind());
            if is_pp {
                for (state_type, from, to) in &resolved {
                    applied.push(self.apply_change(id, state_type, from, to, false)?);
                }
            } else {
                tracing::warn!(
                    action = %self.label(act),
                    object = %id,
                    kind,
                    "object is not a PP, skipping state changes"
                );
            }
        }

        for &instrument in &instruments {
            for (state_type, from, to) in resolved
                .iter()
                .filter(|(state_type, _, _)| *state_type == StateType::Control)
            {
                applied.push(self.apply_change(instrument, state_type, from, to, true)?);
            }
        }

        Ok(applied)
    }

    fn apply_change(
        &mut self,
        target: NodeId,
        state_type: &StateType,
        from: &State,
        to: &State,
        via_instrument: bool,
    ) -> ActResult<AppliedChange> {
        let pp = self.pp_mut(target)?;
        pp.update_state(to);
        tracing::info!(
            target: "cd::state",
            pp = pp.label(),
            %state_type,
            from = from.label(),
            to = to.label(),
            instrument = via_instrument,
            "state change processed"
        );
        Ok(AppliedChange {
            target,
            state_type: state_type.clone(),
            from_label: from.label().to_string(),
            to_label: to.label().to_string(),
            via_instrument,
        })
    }
}

macro_rules! state_change_recorders {
    ($($(#[$meta:meta])* $name:ident => $state_type:expr;)+) => {
        $(
            $(#[$meta])*
            pub fn $name(
                graph: &mut ConceptualDependencyGraph,
                act: NodeId,
                from_state: NodeId,
                to_state: NodeId,
            ) -> ActResult<()> {
                graph.add_state_change(act, $state_type, from_state, to_state)
            }
        )+
    };
}

state_change_recorders! {
    /// Ownership change, typical of ATRANS.
    add_ownership_change => StateType::Ownership;
    /// Location change, typical of PTRANS and EXPEL.
    add_location_change => StateType::Location;
    /// Physical change, typical of PROPEL.
    add_physical_state_change => StateType::Physical;
    /// Physical change of a body part, typical of MOVE.
    add_physical_position_change => StateType::Physical;
    /// Mental change, typical of MTRANS and MBUILD.
    add_mental_state_change => StateType::Mental;
    /// Internal change, typical of INGEST.
    add_internal_state_change => StateType::Internal;
    /// Control change, typical of GRASP.
    add_control_state_change => StateType::Control;
}
