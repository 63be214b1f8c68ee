//! Knowledge base: default states, default slot values and per-ACT rules.
//!
//! Consulted by the [`InferenceEngine`](crate::infer::InferenceEngine) when a
//! slot is still unfilled after the context lookup. A rule
//! (`rules[action][slot]`) is more specific than a default (`defaults[slot]`).
//!
//! Knowledge bases can be written by hand as TOML:
//!
//! ```toml
//! [states]
//! location = "home"
//!
//! [defaults]
//! recipient = "Mary"
//!
//! [rules.PTRANS]
//! object = "luggage"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::act::Primitive;
use crate::error::KnowledgeError;
use crate::node::Filler;
use crate::state::{State, StateType};

/// Result type for knowledge base operations.
pub type KnowledgeResult<T> = std::result::Result<T, KnowledgeError>;

/// Store of default states, default slot values and action-specific rules.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    states: HashMap<StateType, State>,
    defaults: HashMap<String, Filler>,
    rules: HashMap<String, HashMap<String, Filler>>,
}

/// On-disk shape of a knowledge base.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeFile {
    #[serde(default)]
    states: HashMap<String, String>,
    #[serde(default)]
    defaults: HashMap<String, String>,
    #[serde(default)]
    rules: HashMap<String, HashMap<String, String>>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `state` as the default for its own state type.
    pub fn add_state(&mut self, state: State) {
        self.states.insert(state.state_type().clone(), state);
    }

    /// The registered default state for `state_type`, if any.
    pub fn state_for(&self, state_type: &StateType) -> Option<&State> {
        self.states.get(state_type)
    }

    /// The default state for `state_type`, or an `Unknown` state of that type.
    pub fn get_state(&self, state_type: &StateType) -> State {
        self.state_for(state_type)
            .cloned()
            .unwrap_or_else(|| State::new("Unknown", state_type.clone()))
    }

    pub fn add_default(&mut self, slot: impl Into<String>, value: impl Into<Filler>) {
        self.defaults.insert(slot.into(), value.into());
    }

    pub fn get_default(&self, slot: &str) -> Option<&Filler> {
        self.defaults.get(slot)
    }

    /// Add a rule filling `slot` of every ACT labeled `action`.
    pub fn add_rule(
        &mut self,
        action: impl Into<String>,
        slot: impl Into<String>,
        value: impl Into<Filler>,
    ) {
        self.rules
            .entry(action.into())
            .or_default()
            .insert(slot.into(), value.into());
    }

    pub fn get_rule(&self, action: &str, slot: &str) -> Option<&Filler> {
        self.rules.get(action).and_then(|slots| slots.get(slot))
    }

    /// Action labels carrying at least one rule, sorted.
    pub fn rule_actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    /// Rule keys that equal no primitive ACT label. Lookup is exact, so
    /// these rules never fire.
    pub fn unmatched_rule_actions(&self) -> Vec<&str> {
        self.rule_actions()
            .into_iter()
            .filter(|action| !Primitive::ALL.iter().any(|p| p.label() == *action))
            .collect()
    }

    /// Number of (states, defaults, rules) entries.
    pub fn counts(&self) -> (usize, usize, usize) {
        let rules = self.rules.values().map(HashMap::len).sum();
        (self.states.len(), self.defaults.len(), rules)
    }

    pub fn is_empty(&self) -> bool {
        self.counts() == (0, 0, 0)
    }

    /// Parse a knowledge base from TOML text.
    pub fn from_toml_str(content: &str) -> KnowledgeResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Load a knowledge base from a TOML file.
    pub fn load(path: &Path) -> KnowledgeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let kb = Self::parse(&content, &path.display().to_string())?;
        let (states, defaults, rules) = kb.counts();
        tracing::debug!(path = %path.display(), states, defaults, rules, "loaded knowledge base");
        Ok(kb)
    }

    fn parse(content: &str, origin: &str) -> KnowledgeResult<Self> {
        let file: KnowledgeFile = toml::from_str(content).map_err(|e| KnowledgeError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut kb = Self::new();
        for (state_type, label) in file.states {
            kb.add_state(State::new(label, state_type.as_str()));
        }
        for (slot, value) in file.defaults {
            kb.add_default(slot, value);
        }
        for (action, slots) in file.rules {
            for (slot, value) in slots {
                kb.add_rule(action.clone(), slot, value);
            }
        }
        Ok(kb)
    }
}
