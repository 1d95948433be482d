//! Filters spanning both stream kinds.

use ffgraph_core::{Args, Node, Param, Stream, StreamKind, Value};

use crate::audio::AudioStream;
use crate::error::{FilterError, Result};
use crate::video::VideoStream;

/// Concatenate `n` segments with the `concat` filter.
///
/// Each segment supplies `v` video streams followed by `a` audio streams, so
/// `streams` must hold exactly `n * (v + a)` handles in that interleaved
/// order. The filter emits `v` video outputs followed by `a` audio outputs;
/// both the input pad kinds and the output arity are computed here before
/// the node is created.
pub fn concat(
    streams: &[Stream],
    n: usize,
    v: usize,
    a: usize,
) -> Result<(Vec<VideoStream>, Vec<AudioStream>)> {
    if n == 0 {
        return Err(FilterError::ZeroOutputs {
            filter: "concat".to_string(),
        });
    }
    let expected = n * (v + a);
    if streams.len() != expected {
        return Err(FilterError::ConcatArity {
            expected,
            supplied: streams.len(),
        });
    }

    let mut input_kinds = Vec::with_capacity(expected);
    for _ in 0..n {
        input_kinds.extend(std::iter::repeat(StreamKind::Video).take(v));
        input_kinds.extend(std::iter::repeat(StreamKind::Audio).take(a));
    }
    let mut output_kinds = Vec::with_capacity(v + a);
    output_kinds.extend(std::iter::repeat(StreamKind::Video).take(v));
    output_kinds.extend(std::iter::repeat(StreamKind::Audio).take(a));

    let mut args = Args::new();
    args.insert("n", Param::Explicit(Value::from(n)));
    args.insert("v", Param::Explicit(Value::from(v)));
    args.insert("a", Param::Explicit(Value::from(a)));

    let node = Node::spawn("concat", &input_kinds, output_kinds, streams.to_vec(), args)?;
    let videos = (0..v).map(|i| VideoStream::new(node.output(i))).collect();
    let audios = (v..v + a)
        .map(|i| AudioStream::new(node.output(i)))
        .collect();
    Ok((videos, audios))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffgraph_core::compile;

    fn vsrc(input: usize) -> Stream {
        Stream::source(input, Some(StreamKind::Video))
    }

    fn asrc(input: usize) -> Stream {
        Stream::source(input, Some(StreamKind::Audio))
    }

    #[test]
    fn concat_two_av_segments() {
        let streams = vec![vsrc(0), asrc(0), vsrc(1), asrc(1)];
        let (videos, audios) = concat(&streams, 2, 1, 1).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(audios.len(), 1);

        let compiled = compile(&[
            videos[0].clone().into_stream(),
            audios[0].clone().into_stream(),
        ])
        .unwrap();
        assert_eq!(
            compiled.graph,
            "[0:v][0:a][1:v][1:a]concat=n=2:v=1:a=1[s0][s1]"
        );
        assert_eq!(compiled.terminal_labels, vec!["s0", "s1"]);
    }

    #[test]
    fn concat_video_only() {
        let streams = vec![vsrc(0), vsrc(1), vsrc(2)];
        let (videos, audios) = concat(&streams, 3, 1, 0).unwrap();
        assert_eq!(videos.len(), 1);
        assert!(audios.is_empty());

        let compiled = compile(&[videos[0].clone().into_stream()]).unwrap();
        assert_eq!(compiled.graph, "[0:v][1:v][2:v]concat=n=3:v=1:a=0[s0]");
    }

    #[test]
    fn concat_stream_count_must_match_layout() {
        let streams = vec![vsrc(0), vsrc(1)];
        match concat(&streams, 2, 1, 1).unwrap_err() {
            FilterError::ConcatArity { expected, supplied } => {
                assert_eq!(expected, 4);
                assert_eq!(supplied, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn concat_misordered_kinds_are_rejected() {
        // Audio where the layout declares video.
        let streams = vec![asrc(0), vsrc(0), asrc(1), vsrc(1)];
        assert!(matches!(
            concat(&streams, 2, 1, 1),
            Err(FilterError::Graph(
                ffgraph_core::GraphError::TypeMismatch { pad: 0, .. }
            ))
        ));
    }

    #[test]
    fn concat_rejects_zero_segments() {
        assert!(matches!(
            concat(&[], 0, 1, 0),
            Err(FilterError::ZeroOutputs { .. })
        ));
    }
}
