//! The node/stream graph model.
//!
//! A [`Node`] is one instantiation of a named filter: its input streams, its
//! declared output pad kinds, and its argument map. Nodes are immutable once
//! constructed and identified by reference, never by structure; two
//! structurally identical nodes are distinct filters in the graph.
//!
//! A [`Stream`] is a lightweight handle to one output pad of one node, or to
//! an original graph input such as `[0:v]`. Streams share ownership of their
//! node through `Arc`: a node stays alive as long as any handle references
//! it, and the input edges never point back downstream, so no cycle of
//! ownership can form.

use std::sync::Arc;

use crate::error::{GraphError, Result};
use crate::kind::StreamKind;
use crate::param::Args;

/// One instantiation of a named filter in a graph under construction.
#[derive(Debug)]
pub struct Node {
    name: String,
    inputs: Vec<Stream>,
    output_kinds: Vec<StreamKind>,
    args: Args,
}

impl Node {
    /// Create a node, validating its input wiring.
    ///
    /// `input_kinds` declares the kind each input pad expects, positionally;
    /// `inputs` supplies the streams wired into those pads. The declared
    /// count must match the supplied count, and each supplied stream's kind
    /// must match its pad. A selector-less source stream (`[0]` rather than
    /// `[0:v]`) carries no kind and is accepted by any pad.
    ///
    /// `output_kinds` declares this node's output pads. Filters whose output
    /// arity depends on an argument (`split`, `extractplanes`, `segment`,
    /// ...) compute this list in the calling layer before the node is
    /// created; the node stores whatever it is given.
    pub fn spawn(
        name: impl Into<String>,
        input_kinds: &[StreamKind],
        output_kinds: Vec<StreamKind>,
        inputs: Vec<Stream>,
        args: Args,
    ) -> Result<Arc<Self>> {
        let name = name.into();
        if name.is_empty() {
            return Err(GraphError::EmptyName);
        }
        if input_kinds.len() != inputs.len() {
            return Err(GraphError::PadCount {
                filter: name,
                declared: input_kinds.len(),
                supplied: inputs.len(),
            });
        }
        for (pad, (expected, stream)) in input_kinds.iter().zip(&inputs).enumerate() {
            if let Some(actual) = stream.kind()? {
                if actual != *expected {
                    return Err(GraphError::TypeMismatch {
                        filter: name,
                        pad,
                        expected: *expected,
                        actual,
                    });
                }
            }
        }
        Ok(Arc::new(Self {
            name,
            inputs,
            output_kinds,
            args,
        }))
    }

    /// Filter name, e.g. `scale`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Streams wired into this node's input pads, in pad order.
    pub fn inputs(&self) -> &[Stream] {
        &self.inputs
    }

    /// Declared output pad kinds, in pad order.
    pub fn output_kinds(&self) -> &[StreamKind] {
        &self.output_kinds
    }

    /// Argument map.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Handle to output pad `index`.
    ///
    /// Unchecked: an out-of-range index surfaces as
    /// [`GraphError::DanglingPort`] when the handle is wired into a filter
    /// or compiled, never as a malformed label.
    pub fn output(self: &Arc<Self>, index: usize) -> Stream {
        Stream {
            inner: StreamInner::Port {
                node: Arc::clone(self),
                index,
            },
        }
    }

    /// Handles for all declared output pads, in pad order.
    pub fn outputs(self: &Arc<Self>) -> Vec<Stream> {
        (0..self.output_kinds.len())
            .map(|index| self.output(index))
            .collect()
    }
}

/// A handle to one output pad of a node, or to a graph source input.
///
/// Handles are cheap to clone and purely functional: feeding one into a
/// filter never mutates it or its node, which is what allows the same
/// stream to fan out into several downstream filters.
#[derive(Debug, Clone)]
pub struct Stream {
    pub(crate) inner: StreamInner,
}

#[derive(Debug, Clone)]
pub(crate) enum StreamInner {
    /// Original input to the graph, labeled `[input]` or `[input:selector]`.
    Source {
        input: usize,
        selector: Option<StreamKind>,
    },
    /// Output pad `index` of `node`.
    Port { node: Arc<Node>, index: usize },
}

impl Stream {
    /// Handle to original input `input`, optionally narrowed to its video or
    /// audio component (`[0:v]`, `[1:a]`); without a selector the label is
    /// the bare index (`[0]`).
    pub fn source(input: usize, selector: Option<StreamKind>) -> Self {
        Stream {
            inner: StreamInner::Source { input, selector },
        }
    }

    /// The kind this stream carries, or `None` for a selector-less source.
    ///
    /// Fails with [`GraphError::DanglingPort`] if the handle points past its
    /// node's declared output arity.
    pub fn kind(&self) -> Result<Option<StreamKind>> {
        match &self.inner {
            StreamInner::Source { selector, .. } => Ok(*selector),
            StreamInner::Port { node, index } => match node.output_kinds().get(*index) {
                Some(kind) => Ok(Some(*kind)),
                None => Err(GraphError::DanglingPort {
                    filter: node.name().to_string(),
                    index: *index,
                    arity: node.output_kinds().len(),
                }),
            },
        }
    }

    /// The node producing this stream, if it is not a source input.
    pub fn node(&self) -> Option<&Arc<Node>> {
        match &self.inner {
            StreamInner::Source { .. } => None,
            StreamInner::Port { node, .. } => Some(node),
        }
    }

    /// The output pad index on the producing node, if any.
    pub fn index(&self) -> Option<usize> {
        match &self.inner {
            StreamInner::Source { .. } => None,
            StreamInner::Port { index, .. } => Some(*index),
        }
    }
}
