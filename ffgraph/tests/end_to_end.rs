//! End-to-end tests: typed filter chains compiled to filtergraph strings.

use ffgraph::prelude::*;

// =============================================================================
// Chaining
// =============================================================================

#[test]
fn scale_then_hflip() {
    let out = input(0)
        .video()
        .scale(Scale::new().w("640").h("480"))
        .unwrap()
        .hflip()
        .unwrap();
    let compiled = compile(&[out.into_stream()]).unwrap();
    assert_eq!(compiled.graph, "[0:v]scale=w=640:h=480[s0];[s0]hflip[s1]");
    assert_eq!(compiled.terminal_labels, vec!["s1"]);
}

#[test]
fn chaining_never_mutates_upstream() {
    let base = input(0).video().hflip().unwrap();
    // The same handle feeds two chains; the producer renders once.
    let left = base.vflip().unwrap();
    let right = base.negate().unwrap();
    let compiled = compile(&[left.into_stream(), right.into_stream()]).unwrap();
    assert_eq!(
        compiled.graph,
        "[0:v]hflip[s0];[s0]vflip[s1];[s0]negate[s2]"
    );
}

#[test]
fn default_height_is_never_emitted() {
    let out = input(0).video().scale(Scale::new().w("640")).unwrap();
    let compiled = compile(&[out.into_stream()]).unwrap();
    assert_eq!(compiled.graph, "[0:v]scale=w=640[s0]");
}

// =============================================================================
// Multi-input and multi-output graphs
// =============================================================================

#[test]
fn split_feeds_two_downstream_chains() {
    let halves = input(0).video().split(2).unwrap();
    let top = halves[0].hflip().unwrap();
    let bottom = halves[1].vflip().unwrap();
    let compiled = compile(&[top.into_stream(), bottom.into_stream()]).unwrap();
    assert_eq!(
        compiled.graph,
        "[0:v]split=outputs=2[s0][s1];[s0]hflip[s2];[s1]vflip[s3]"
    );
    assert_eq!(compiled.graph.matches("split").count(), 1);
}

#[test]
fn overlay_two_inputs() {
    let logo = input(1).video();
    let out = input(0)
        .video()
        .overlay(&logo, Overlay::new().x(10).y(10))
        .unwrap();
    let compiled = compile(&[out.into_stream()]).unwrap();
    assert_eq!(compiled.graph, "[0:v][1:v]overlay=x=10:y=10[s0]");
}

#[test]
fn picture_in_picture_with_audio_mix() {
    let pip = input(1)
        .video()
        .scale(Scale::new().w("iw/4").h("ih/4"))
        .unwrap();
    let video = input(0)
        .video()
        .overlay(&pip, Overlay::new().x("W-w-10").y("H-h-10"))
        .unwrap();
    let music = input(1).audio();
    let audio = input(0).audio().amix(&[&music], Amix::new()).unwrap();

    let fc = FilterComplex::assemble(&[video.into_stream(), audio.into_stream()]).unwrap();
    assert_eq!(
        fc.description,
        "[1:v]scale=w=iw/4:h=ih/4[s0];[0:v][s0]overlay=x=W-w-10:y=H-h-10[s1];\
         [0:a][1:a]amix=inputs=2[s2]"
    );
    assert_eq!(fc.maps, vec!["[s1]", "[s2]"]);
}

#[test]
fn concat_two_clips_with_audio() {
    let streams = vec![
        input(0).video().into_stream(),
        input(0).audio().into_stream(),
        input(1).video().into_stream(),
        input(1).audio().into_stream(),
    ];
    let (videos, audios) = concat(&streams, 2, 1, 1).unwrap();
    let fc = FilterComplex::assemble(&[
        videos[0].clone().into_stream(),
        audios[0].clone().into_stream(),
    ])
    .unwrap();
    assert_eq!(
        fc.description,
        "[0:v][0:a][1:v][1:a]concat=n=2:v=1:a=1[s0][s1]"
    );
    assert_eq!(fc.maps, vec!["[s0]", "[s1]"]);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn audio_stream_into_video_pad_is_rejected() {
    let audio_as_video = VideoStream::new(input(1).audio().into_stream());
    let err = input(0)
        .video()
        .blend(&audio_as_video, Blend::new())
        .unwrap_err();
    match err {
        FilterError::Graph(GraphError::TypeMismatch {
            filter,
            pad,
            expected,
            actual,
        }) => {
            assert_eq!(filter, "blend");
            assert_eq!(pad, 1);
            assert_eq!(expected, StreamKind::Video);
            assert_eq!(actual, StreamKind::Audio);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dangling_pad_is_reported_at_compile() {
    let halves = input(0).video().split(2).unwrap();
    let node = halves[0].stream().node().unwrap().clone();
    let err = compile(&[node.output(9)]).unwrap_err();
    assert!(matches!(err, GraphError::DanglingPort { index: 9, .. }));
}

// =============================================================================
// Escaping and determinism
// =============================================================================

#[test]
fn drawtext_with_metacharacters() {
    let out = input(0)
        .video()
        .drawtext(DrawText::new().text("time: 12,5; [ok]"))
        .unwrap();
    let compiled = compile(&[out.into_stream()]).unwrap();
    assert_eq!(
        compiled.graph,
        "[0:v]drawtext=text=time\\: 12\\,5\\; \\[ok\\][s0]"
    );
    // The escaped value reparses to the original.
    let rendered = compiled
        .graph
        .split("drawtext=text=")
        .nth(1)
        .unwrap()
        .strip_suffix("[s0]")
        .unwrap();
    assert_eq!(ffgraph::unescape(rendered).unwrap(), "time: 12,5; [ok]");
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn compiled_graph_snapshots_through_json() {
    let out = input(0)
        .video()
        .scale(Scale::new().w("640").h("480"))
        .unwrap();
    let compiled = compile(&[out.into_stream()]).unwrap();

    let json = serde_json::to_string(&compiled).unwrap();
    assert_eq!(
        json,
        r#"{"graph":"[0:v]scale=w=640:h=480[s0]","terminal_labels":["s0"]}"#
    );
    let restored: Compiled = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, compiled);
}

#[test]
fn repeated_compilation_is_stable() {
    let halves = input(0).video().split(2).unwrap();
    let top = halves[0].fps(Fps::new().fps("30")).unwrap();
    let bottom = halves[1].transpose(Transpose::new().dir("clock")).unwrap();
    let terminals = [top.into_stream(), bottom.into_stream()];

    let reference = compile(&terminals).unwrap();
    for _ in 0..8 {
        assert_eq!(compile(&terminals).unwrap(), reference);
    }
}
