//! Prelude module for convenient imports.
//!
//! ```rust
//! use ffgraph::prelude::*;
//! ```

// Construction entry points
pub use crate::{input, FilterComplex, Input};

// Core graph types
pub use crate::{compile, Args, Compiled, GraphError, Node, Param, Stream, StreamKind, Value};

// Typed streams and the filter catalog
pub use crate::{
    concat, Acrossfade, Adelay, Aecho, Aformat, Amix, Atrim, AudioStream, Blend, Crop, DrawText,
    FilterError, Fps, Highpass, Loudnorm, Lowpass, Overlay, Pad, Scale, Transpose, Trim,
    VideoStream, Volume,
};

// Result type
pub use crate::Result;
