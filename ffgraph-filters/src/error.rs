//! Filter layer error types.

use ffgraph_core::GraphError;
use thiserror::Error;

/// Errors raised by the typed filter factories.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Structural graph error from the core.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// An `extractplanes` plane token outside the catalog.
    #[error("unknown plane token '{token}' for extractplanes")]
    UnknownPlane { token: String },

    /// `extractplanes` was given an empty plane list.
    #[error("extractplanes requires at least one plane token")]
    NoPlanes,

    /// A variable-output filter was asked for zero outputs.
    #[error("filter '{filter}' requires at least one output")]
    ZeroOutputs { filter: String },

    /// `concat` was given a stream count that does not match its layout.
    #[error("concat expects {expected} input streams for its declared layout, got {supplied}")]
    ConcatArity { expected: usize, supplied: usize },
}

/// Result type for filter construction.
pub type Result<T> = std::result::Result<T, FilterError>;
