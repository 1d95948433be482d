//! # ffgraph
//!
//! A strongly-typed builder for ffmpeg filtergraphs.
//!
//! Filter methods chain on typed stream handles; each call allocates a new
//! immutable node downstream and never mutates its inputs, so one stream can
//! fan out into several filters. Compiling a set of terminal streams yields
//! the exact textual syntax ffmpeg's `-filter_complex` argument consumes,
//! with deterministic labels and metacharacter escaping.
//!
//! ## Quick Start
//!
//! ```rust
//! use ffgraph::prelude::*;
//!
//! fn main() -> ffgraph::Result<()> {
//!     let out = input(0).video().scale(Scale::new().w("640").h("480"))?.hflip()?;
//!     let fc = FilterComplex::assemble(&[out.into_stream()])?;
//!     assert_eq!(fc.description, "[0:v]scale=w=640:h=480[s0];[s0]hflip[s1]");
//!     assert_eq!(fc.maps, vec!["[s1]"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into three crates:
//! - `ffgraph-core`: node/stream graph model, escaping, and the compiler
//! - `ffgraph-filters`: typed per-filter construction layer
//! - `ffgraph` (this crate): source inputs, assembly helpers, re-exports
//!
//! Running ffmpeg itself is the caller's business; this library only ever
//! produces strings.

mod filter_complex;
mod input;
pub mod prelude;

// Re-export core types
pub use ffgraph_core::{
    compile, escape, unescape, Args, Compiled, GraphError, Node, Param, Stream, StreamKind, Value,
};

// Re-export the typed filter layer
pub use ffgraph_filters::{
    concat, Acrossfade, Adelay, Aecho, Aformat, Amix, Atrim, AudioStream, Blend, Crop, DrawText,
    FilterError, Fps, Highpass, Loudnorm, Lowpass, Overlay, Pad, Scale, Transpose, Trim,
    VideoStream, Volume, PLANE_TOKENS,
};

pub use filter_complex::FilterComplex;
pub use input::{input, Input};

/// Result type using the filter layer's error, which structural graph errors
/// convert into.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string.
pub fn version() -> &'static str {
    VERSION
}
