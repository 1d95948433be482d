//! # ffgraph-filters
//!
//! Typed per-filter construction layer on top of `ffgraph-core`.
//!
//! Each filter method is a thin factory: it assembles an argument map where
//! every documented option starts out default-tagged and flips to explicit
//! when the caller sets it, spawns a node through the core's validated
//! constructor, and returns typed stream handles for the node's output pads.
//! Option builders carry a free-form `arg` overlay for options the builder
//! does not name; overlaid entries are always explicit and always win.
//!
//! The catalog here is a representative hand-written subset of ffmpeg's
//! filter set. Enumerated value sets that affect graph structure (the
//! `extractplanes` plane tokens) live in this crate as catalog data; the
//! core never validates filter-specific option semantics.
//!
//! ## Quick Start
//!
//! ```rust
//! use ffgraph_core::{compile, Stream, StreamKind};
//! use ffgraph_filters::{Scale, VideoStream};
//!
//! fn main() -> ffgraph_filters::Result<()> {
//!     let src = VideoStream::new(Stream::source(0, Some(StreamKind::Video)));
//!     let out = src.scale(Scale::new().w("640").h("480"))?.hflip()?;
//!     let compiled = compile(&[out.into_stream()])?;
//!     assert_eq!(compiled.graph, "[0:v]scale=w=640:h=480[s0];[s0]hflip[s1]");
//!     Ok(())
//! }
//! ```

mod audio;
mod error;
mod multi;
mod video;

pub use audio::{
    Acrossfade, Adelay, Aecho, Aformat, Amix, Atrim, AudioStream, Highpass, Loudnorm, Lowpass,
    Volume,
};
pub use error::{FilterError, Result};
pub use multi::concat;
pub use video::{
    Blend, Crop, DrawText, Fps, Overlay, Pad, Scale, Transpose, Trim, VideoStream, PLANE_TOKENS,
};

use ffgraph_core::{Param, Value};

/// Explicit when the caller set the option, otherwise the documented
/// default, which the renderer suppresses.
pub(crate) fn explicit_or(value: Option<Value>, default: Value) -> Param {
    match value {
        Some(v) => Param::Explicit(v),
        None => Param::Default(default),
    }
}
