//! Graph construction and compilation error types.

use crate::kind::StreamKind;
use thiserror::Error;

/// Errors raised while building or compiling a filter graph.
///
/// Every variant is a construction-time caller error: a malformed graph
/// fails fast with full context and is never silently coerced or rendered.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A stream of the wrong kind was wired into an input pad.
    #[error("filter '{filter}' input pad {pad}: expected {expected} stream, got {actual}")]
    TypeMismatch {
        filter: String,
        pad: usize,
        expected: StreamKind,
        actual: StreamKind,
    },

    /// Declared input pad count does not match the supplied streams.
    #[error("filter '{filter}' declares {declared} input pads but was given {supplied} streams")]
    PadCount {
        filter: String,
        declared: usize,
        supplied: usize,
    },

    /// A stream handle refers to an output pad its node does not declare.
    #[error("filter '{filter}' has {arity} output pads; pad {index} does not exist")]
    DanglingPort {
        filter: String,
        index: usize,
        arity: usize,
    },

    /// A cycle was found during compilation. Normal construction cannot
    /// create one, so this indicates an invariant violation upstream.
    #[error("cycle detected through filter '{filter}'")]
    GraphCycle { filter: String },

    /// A string could not be unescaped.
    #[error("cannot unescape '{input}': {message}")]
    Escaping { input: String, message: String },

    /// An empty filter name was supplied.
    #[error("filter name must not be empty")]
    EmptyName,

    /// Compilation was requested with no terminal streams.
    #[error("cannot compile a graph with no terminal streams")]
    EmptyGraph,
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
