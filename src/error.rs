//! Rich diagnostic error types for the conceptual dependency engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so producers know exactly
//! which structure they built incorrectly.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the crate.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum CdError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Act(#[from] ActError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Knowledge(#[from] KnowledgeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Infer(#[from] InferError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("node not found: {id}")]
    #[diagnostic(
        code(cd::graph::node_not_found),
        help(
            "The id does not refer to a node of this graph. \
             Node ids are only meaningful inside the graph that issued them."
        )
    )]
    NodeNotFound { id: String },

    #[error("relation {role} endpoint {id} is not a member of this graph")]
    #[diagnostic(
        code(cd::graph::dangling_endpoint),
        help("Add both endpoint nodes to the graph before relating them.")
    )]
    DanglingEndpoint { id: String, role: &'static str },

    #[error("node {id} is a {actual}, expected a {expected}")]
    #[diagnostic(
        code(cd::graph::wrong_kind),
        help("Look the node up with the accessor matching its kind (pp, act, state).")
    )]
    WrongKind {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
}

// ---------------------------------------------------------------------------
// ACT construction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ActError {
    #[error("nested actions must be ACTs: {label} is a {kind}")]
    #[diagnostic(
        code(cd::act::invalid_nested_action),
        help("Only ACT nodes can be nested under another ACT.")
    )]
    InvalidNestedAction { label: String, kind: &'static str },

    #[error("nesting {child} under {parent} would create a cycle")]
    #[diagnostic(
        code(cd::act::nesting_cycle),
        help(
            "An ACT cannot be nested inside itself or inside one of its own \
             sub-actions. Build the sub-event tree top-down."
        )
    )]
    NestingCycle { parent: String, child: String },

    #[error("state change on {action} needs State endpoints: {label} is a {kind}")]
    #[diagnostic(
        code(cd::act::invalid_state_change),
        help("Both from_state and to_state must be State nodes of the same graph.")
    )]
    InvalidStateChange {
        action: String,
        label: String,
        kind: &'static str,
    },

    #[error("instruments of {action} must be PPs: {label} is a {kind}")]
    #[diagnostic(
        code(cd::act::invalid_instrument),
        help("Pass picture producers (people, objects, vehicles) as instruments.")
    )]
    InvalidInstrument {
        action: String,
        label: String,
        kind: &'static str,
    },

    #[error("{label} is a {kind}, not an ACT")]
    #[diagnostic(
        code(cd::act::not_an_act),
        help("Slot filling, nesting and state changes only apply to ACT nodes.")
    )]
    NotAnAct { label: String, kind: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// Knowledge base errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum KnowledgeError {
    #[error("failed to read knowledge base: {path}")]
    #[diagnostic(
        code(cd::knowledge::read),
        help("Ensure the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse knowledge base {path}: {message}")]
    #[diagnostic(
        code(cd::knowledge::parse),
        help(
            "A knowledge base file has optional [states], [defaults] and \
             [rules.<ACT>] tables whose values are strings."
        )
    )]
    Parse { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Inference errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum InferError {
    #[error("slot '{slot}' of {action} could not be resolved")]
    #[diagnostic(
        code(cd::infer::unresolved_slot),
        help(
            "No context entry, rule or default covers this slot and the slot \
             provider supplied no value. Add a rule or default to the knowledge \
             base, set it in the context, or run with interactive elicitation."
        )
    )]
    UnresolvedSlot { action: String, slot: String },

    #[error("failed to elicit a slot value")]
    #[diagnostic(
        code(cd::infer::elicitation),
        help("The prompt could not be written or the answer could not be read.")
    )]
    Elicitation {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Act(#[from] ActError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(cd::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(cd::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(cd::config::write),
        help("Check that the target directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown elicitation policy: {value}")]
    #[diagnostic(
        code(cd::config::invalid_elicitation),
        help("Valid policies are \"prompt\" and \"fail\".")
    )]
    InvalidElicitation { value: String },
}

/// Convenience alias for functions returning crate-level results.
pub type CdResult<T> = std::result::Result<T, CdError>;
