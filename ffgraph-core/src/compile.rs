//! Filtergraph compilation: discovery, labeling, ordering, rendering.
//!
//! [`compile`] turns a set of terminal streams into the textual syntax
//! consumed by ffmpeg's `-filter_complex` argument:
//!
//! ```text
//! [0:v]scale=w=640:h=480[s0];[s0]hflip[s1]
//! ```
//!
//! The graph is not a materialized object; it is the transitive closure of
//! nodes reachable by following input edges backward from the terminals,
//! reconstructed here at render time. Compilation is deterministic: the same
//! graph always renders to the same bytes, with the same labels in the same
//! order.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::node::{Node, Stream, StreamInner};

/// Output of [`compile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compiled {
    /// The filtergraph description string.
    pub graph: String,
    /// The label assigned to each requested terminal stream, in request
    /// order and without brackets (e.g. `s7`, or `0:v` for a source
    /// terminal), ready for `-map` mapping by the caller.
    pub terminal_labels: Vec<String>,
}

/// Compile the graph reachable from `terminals` into filtergraph syntax.
///
/// Nodes are discovered by depth-first traversal from the terminals,
/// emitted in topological order (ties broken by discovery order), and every
/// (node, output pad) pair is assigned a synthetic `s{n}` label in emission
/// order. Source streams keep their caller-given labels. A stream consumed
/// by several downstream nodes is rendered once and referenced by label
/// from each consumer.
pub fn compile(terminals: &[Stream]) -> Result<Compiled> {
    if terminals.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let order = discover(terminals)?;
    debug!(nodes = order.len(), "discovered filter graph");

    // Label every declared output pad in emission order, consumed or not.
    let mut labels: HashMap<(usize, usize), String> = HashMap::new();
    let mut next = 0usize;
    for node in &order {
        let key = Arc::as_ptr(node) as usize;
        for pad in 0..node.output_kinds().len() {
            labels.insert((key, pad), format!("s{next}"));
            next += 1;
        }
    }

    let mut segments = Vec::with_capacity(order.len());
    for node in &order {
        let mut segment = String::new();
        for input in node.inputs() {
            segment.push('[');
            segment.push_str(&stream_label(input, &labels)?);
            segment.push(']');
        }
        segment.push_str(node.name());
        let rendered = node.args().render();
        if !rendered.is_empty() {
            segment.push('=');
            segment.push_str(&rendered);
        }
        let key = Arc::as_ptr(node) as usize;
        for pad in 0..node.output_kinds().len() {
            segment.push('[');
            segment.push_str(&labels[&(key, pad)]);
            segment.push(']');
        }
        trace!(filter = node.name(), segment = segment.as_str(), "rendered");
        segments.push(segment);
    }

    let terminal_labels = terminals
        .iter()
        .map(|terminal| stream_label(terminal, &labels))
        .collect::<Result<Vec<_>>>()?;

    Ok(Compiled {
        graph: segments.join(";"),
        terminal_labels,
    })
}

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    InProgress,
    Done,
}

/// Depth-first discovery from the terminals. The returned postorder is a
/// topological order: every node appears after all producers of its inputs.
///
/// A node encountered while still in progress means a cycle. `Arc`-owned
/// immutable nodes cannot form one, so this is a defensive check against
/// invariant violations elsewhere rather than a designed failure path.
fn discover(terminals: &[Stream]) -> Result<Vec<Arc<Node>>> {
    let mut order = Vec::new();
    let mut state: HashMap<usize, VisitState> = HashMap::new();

    for terminal in terminals {
        let Some(root) = terminal.node() else {
            continue;
        };
        let root_key = Arc::as_ptr(root) as usize;
        if state.contains_key(&root_key) {
            continue;
        }
        state.insert(root_key, VisitState::InProgress);

        // Iterative DFS; each stack entry is a node plus the index of the
        // next input pad to follow.
        let mut stack: Vec<(Arc<Node>, usize)> = vec![(Arc::clone(root), 0)];
        while let Some(top) = stack.last_mut() {
            if top.1 == top.0.inputs().len() {
                let finished = Arc::clone(&top.0);
                stack.pop();
                state.insert(Arc::as_ptr(&finished) as usize, VisitState::Done);
                order.push(finished);
                continue;
            }
            let input = top.0.inputs()[top.1].clone();
            top.1 += 1;
            let Some(child) = input.node() else {
                continue;
            };
            let child_key = Arc::as_ptr(child) as usize;
            match state.get(&child_key) {
                Some(VisitState::Done) => {}
                Some(VisitState::InProgress) => {
                    return Err(GraphError::GraphCycle {
                        filter: child.name().to_string(),
                    });
                }
                None => {
                    state.insert(child_key, VisitState::InProgress);
                    stack.push((Arc::clone(child), 0));
                }
            }
        }
    }

    Ok(order)
}

/// Label for one stream: the caller-given label of a source, or the
/// synthetic label of a node output pad. Missing pads surface as dangling.
fn stream_label(stream: &Stream, labels: &HashMap<(usize, usize), String>) -> Result<String> {
    match &stream.inner {
        StreamInner::Source { input, selector } => Ok(match selector {
            Some(kind) => format!("{input}:{}", kind.selector()),
            None => input.to_string(),
        }),
        StreamInner::Port { node, index } => {
            let key = (Arc::as_ptr(node) as usize, *index);
            labels
                .get(&key)
                .cloned()
                .ok_or_else(|| GraphError::DanglingPort {
                    filter: node.name().to_string(),
                    index: *index,
                    arity: node.output_kinds().len(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::StreamKind;
    use crate::param::{Args, Param, Value};

    fn vnode(name: &str, inputs: Vec<Stream>, args: Args) -> Arc<Node> {
        let kinds = vec![StreamKind::Video; inputs.len()];
        Node::spawn(name, &kinds, vec![StreamKind::Video], inputs, args).unwrap()
    }

    #[test]
    fn single_filter_chain() {
        let src = Stream::source(0, Some(StreamKind::Video));
        let mut args = Args::new();
        args.insert("w", Param::Explicit(Value::from("640")));
        args.insert("h", Param::Explicit(Value::from("480")));
        let scale = vnode("scale", vec![src], args);
        let flip = vnode("hflip", vec![scale.output(0)], Args::new());

        let compiled = compile(&[flip.output(0)]).unwrap();
        assert_eq!(
            compiled.graph,
            "[0:v]scale=w=640:h=480[s0];[s0]hflip[s1]"
        );
        assert_eq!(compiled.terminal_labels, vec!["s1"]);
    }

    #[test]
    fn bare_name_when_no_explicit_args() {
        let src = Stream::source(0, Some(StreamKind::Video));
        let mut args = Args::new();
        args.insert("h", Param::Default(Value::from("ih")));
        let node = vnode("scale", vec![src], args);
        let compiled = compile(&[node.output(0)]).unwrap();
        assert_eq!(compiled.graph, "[0:v]scale[s0]");
    }

    #[test]
    fn fan_out_renders_producer_once() {
        let src = Stream::source(0, Some(StreamKind::Video));
        let flip = vnode("hflip", vec![src], Args::new());
        let a = vnode("vflip", vec![flip.output(0)], Args::new());
        let b = vnode("negate", vec![flip.output(0)], Args::new());

        let compiled = compile(&[a.output(0), b.output(0)]).unwrap();
        assert_eq!(
            compiled.graph,
            "[0:v]hflip[s0];[s0]vflip[s1];[s0]negate[s2]"
        );
        assert_eq!(compiled.terminal_labels, vec!["s1", "s2"]);
    }

    #[test]
    fn source_terminal_keeps_its_own_label() {
        let compiled = compile(&[Stream::source(1, Some(StreamKind::Audio))]).unwrap();
        assert_eq!(compiled.graph, "");
        assert_eq!(compiled.terminal_labels, vec!["1:a"]);
    }

    #[test]
    fn selectorless_source_label_is_bare_index() {
        let src = Stream::source(2, None);
        let node = vnode("setpts", vec![src], Args::new());
        let compiled = compile(&[node.output(0)]).unwrap();
        assert_eq!(compiled.graph, "[2]setpts[s0]");
    }

    #[test]
    fn empty_terminal_set_is_rejected() {
        assert!(matches!(compile(&[]), Err(GraphError::EmptyGraph)));
    }

    #[test]
    fn dangling_terminal_is_rejected() {
        let src = Stream::source(0, Some(StreamKind::Video));
        let node = vnode("hflip", vec![src], Args::new());
        let err = compile(&[node.output(3)]).unwrap_err();
        assert!(matches!(err, GraphError::DanglingPort { index: 3, .. }));
    }

    #[test]
    fn multi_output_node_labels_every_pad() {
        let src = Stream::source(0, Some(StreamKind::Video));
        let mut args = Args::new();
        args.insert("outputs", Param::Explicit(Value::Int(2)));
        let split = Node::spawn(
            "split",
            &[StreamKind::Video],
            vec![StreamKind::Video, StreamKind::Video],
            vec![src],
            args,
        )
        .unwrap();
        let compiled = compile(&[split.output(0), split.output(1)]).unwrap();
        assert_eq!(compiled.graph, "[0:v]split=outputs=2[s0][s1]");
        assert_eq!(compiled.terminal_labels, vec!["s0", "s1"]);
    }

    #[test]
    fn recompilation_is_byte_identical() {
        let src = Stream::source(0, Some(StreamKind::Video));
        let flip = vnode("hflip", vec![src], Args::new());
        let a = vnode("vflip", vec![flip.output(0)], Args::new());
        let b = vnode("negate", vec![flip.output(0)], Args::new());
        let terminals = [a.output(0), b.output(0)];

        let first = compile(&terminals).unwrap();
        let second = compile(&terminals).unwrap();
        assert_eq!(first, second);
    }
}
