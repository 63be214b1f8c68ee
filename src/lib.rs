// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # conceptual-dependency
//!
//! Conceptual Dependency structures: sentences as language-independent events
//! built from primitive ACTs, the participants they involve, and the state
//! transitions those participants undergo.
//!
//! ## Architecture
//!
//! - **Nodes** (`node`, `state`, `pp`): labeled entities with open properties
//! - **ACTs** (`act`): the fourteen primitives with typed slot schemas
//! - **Graph** (`graph`): petgraph arena of nodes and typed relations, plus
//!   nesting, state-change propagation and rendering
//! - **Knowledge base** (`knowledge`): default states, defaults and per-ACT rules
//! - **Inference** (`infer`): context → rule → default → provider slot filling
//!
//! ## Library usage
//!
//! ```no_run
//! use conceptual_dependency::act::{Act, Primitive};
//! use conceptual_dependency::graph::ConceptualDependencyGraph;
//! use conceptual_dependency::infer::{FailUnresolved, InferenceEngine};
//! use conceptual_dependency::knowledge::KnowledgeBase;
//! use conceptual_dependency::pp::Pp;
//!
//! let mut graph = ConceptualDependencyGraph::new();
//! let john = graph.add_node(Pp::new("John", "person"));
//! let mut went = Act::new(Primitive::Ptrans);
//! went.fill_slot("agent", john);
//! let went = graph.add_node(went);
//!
//! let mut kb = KnowledgeBase::new();
//! kb.add_rule("PTRANS", "object", "luggage");
//! let mut engine = InferenceEngine::new(Some(kb)).with_provider(FailUnresolved);
//! engine.add_action(went);
//! engine.run(&mut graph).unwrap();
//! ```

pub mod act;
pub mod config;
pub mod error;
pub mod graph;
pub mod infer;
pub mod knowledge;
pub mod node;
pub mod pp;
pub mod sample;
pub mod state;
