//! # ffgraph-core
//!
//! Graph model and compiler for building ffmpeg filtergraph descriptions.
//!
//! This crate provides the construction core that the typed per-filter
//! layer (`ffgraph-filters`) is built on:
//! - Tagged parameter values that distinguish documented defaults from
//!   caller-supplied options
//! - Stream kind tagging and pad validation
//! - The immutable [`Node`] / [`Stream`] graph model
//! - The [`compile`] function that linearizes a graph into the textual
//!   syntax consumed by ffmpeg's `-filter_complex` argument
//!
//! ## Quick Start
//!
//! ```rust
//! use ffgraph_core::{compile, Args, Node, Param, Stream, StreamKind, Value};
//!
//! fn main() -> ffgraph_core::Result<()> {
//!     let src = Stream::source(0, Some(StreamKind::Video));
//!
//!     let mut args = Args::new();
//!     args.insert("w", Param::Explicit(Value::from("640")));
//!     args.insert("h", Param::Explicit(Value::from("480")));
//!     let scaled = Node::spawn(
//!         "scale",
//!         &[StreamKind::Video],
//!         vec![StreamKind::Video],
//!         vec![src],
//!         args,
//!     )?;
//!
//!     let compiled = compile(&[scaled.output(0)])?;
//!     assert_eq!(compiled.graph, "[0:v]scale=w=640:h=480[s0]");
//!     assert_eq!(compiled.terminal_labels, vec!["s0"]);
//!     Ok(())
//! }
//! ```
//!
//! Graph construction is purely in-memory and synchronous; the compiled
//! string is handed to an external ffmpeg process by the caller. This crate
//! performs no I/O.

pub mod compile;
pub mod error;
pub mod escape;
pub mod kind;
pub mod node;
pub mod param;

pub use compile::{compile, Compiled};
pub use error::{GraphError, Result};
pub use escape::{escape, unescape};
pub use kind::StreamKind;
pub use node::{Node, Stream};
pub use param::{Args, Param, Value};
