//! Typed audio stream handle and its filter factories.

use std::sync::Arc;

use ffgraph_core::{Args, Node, Param, Stream, StreamKind, Value};

use crate::error::{FilterError, Result};
use crate::explicit_or;

/// A handle to an audio stream: one audio output pad of a node, or a source
/// input's audio component.
#[derive(Debug, Clone)]
pub struct AudioStream(pub(crate) Stream);

impl AudioStream {
    /// Wrap a raw stream handle carrying audio.
    pub fn new(stream: Stream) -> Self {
        Self(stream)
    }

    /// The underlying stream handle.
    pub fn stream(&self) -> &Stream {
        &self.0
    }

    /// Unwrap into the raw handle, e.g. for [`ffgraph_core::compile`].
    pub fn into_stream(self) -> Stream {
        self.0
    }

    /// Adjust gain with the `volume` filter.
    pub fn volume(&self, opts: Volume) -> Result<AudioStream> {
        unary(self, "volume", opts.build())
    }

    /// Change playback speed with the `atempo` filter.
    pub fn atempo(&self, tempo: f64) -> Result<AudioStream> {
        let mut args = Args::new();
        args.insert("tempo", Param::Explicit(Value::Float(tempo)));
        unary(self, "atempo", args)
    }

    /// Keep a time range with the `atrim` filter.
    pub fn atrim(&self, opts: Atrim) -> Result<AudioStream> {
        unary(self, "atrim", opts.build())
    }

    /// Rewrite presentation timestamps with the `asetpts` filter.
    pub fn asetpts(&self, expr: impl Into<Value>) -> Result<AudioStream> {
        let mut args = Args::new();
        args.insert("expr", Param::Explicit(expr.into()));
        unary(self, "asetpts", args)
    }

    /// Constrain sample formats, rates, and layouts with `aformat`.
    pub fn aformat(&self, opts: Aformat) -> Result<AudioStream> {
        unary(self, "aformat", opts.build())
    }

    /// Add echoes with the `aecho` filter.
    pub fn aecho(&self, opts: Aecho) -> Result<AudioStream> {
        unary(self, "aecho", opts.build())
    }

    /// Delay channels with the `adelay` filter.
    pub fn adelay(&self, opts: Adelay) -> Result<AudioStream> {
        unary(self, "adelay", opts.build())
    }

    /// Attenuate below a cutoff with the `highpass` filter.
    pub fn highpass(&self, opts: Highpass) -> Result<AudioStream> {
        unary(self, "highpass", opts.build())
    }

    /// Attenuate above a cutoff with the `lowpass` filter.
    pub fn lowpass(&self, opts: Lowpass) -> Result<AudioStream> {
        unary(self, "lowpass", opts.build())
    }

    /// EBU R128 loudness normalization with the `loudnorm` filter.
    pub fn loudnorm(&self, opts: Loudnorm) -> Result<AudioStream> {
        unary(self, "loudnorm", opts.build())
    }

    /// Mix this stream with `others` using the `amix` filter. The `inputs`
    /// option is computed from the call and always rendered.
    pub fn amix(&self, others: &[&AudioStream], opts: Amix) -> Result<AudioStream> {
        let mut inputs = vec![self.0.clone()];
        inputs.extend(others.iter().map(|s| s.0.clone()));
        // `inputs` renders first; a caller override through `arg` still wins
        // via the ordered overwrite-in-place semantics.
        let mut args = Args::new();
        args.insert("inputs", Param::Explicit(Value::from(inputs.len())));
        for (key, param) in opts.build().iter() {
            args.insert(key, param.clone());
        }
        let node = spawn("amix", inputs, vec![StreamKind::Audio], args)?;
        Ok(AudioStream(node.output(0)))
    }

    /// Duplicate into `outputs` identical streams with the `asplit` filter.
    pub fn asplit(&self, outputs: usize) -> Result<Vec<AudioStream>> {
        if outputs == 0 {
            return Err(FilterError::ZeroOutputs {
                filter: "asplit".to_string(),
            });
        }
        let mut args = Args::new();
        args.insert("outputs", Param::Explicit(Value::from(outputs)));
        let node = spawn(
            "asplit",
            vec![self.0.clone()],
            vec![StreamKind::Audio; outputs],
            args,
        )?;
        Ok(node.outputs().into_iter().map(AudioStream).collect())
    }

    /// Cross-fade into `next` with the `acrossfade` filter.
    pub fn acrossfade(&self, next: &AudioStream, opts: Acrossfade) -> Result<AudioStream> {
        let node = spawn(
            "acrossfade",
            vec![self.0.clone(), next.0.clone()],
            vec![StreamKind::Audio],
            opts.build(),
        )?;
        Ok(AudioStream(node.output(0)))
    }
}

fn spawn(
    name: &str,
    inputs: Vec<Stream>,
    output_kinds: Vec<StreamKind>,
    args: Args,
) -> Result<Arc<Node>> {
    let input_kinds = vec![StreamKind::Audio; inputs.len()];
    Ok(Node::spawn(name, &input_kinds, output_kinds, inputs, args)?)
}

fn unary(stream: &AudioStream, name: &str, args: Args) -> Result<AudioStream> {
    let node = spawn(name, vec![stream.0.clone()], vec![StreamKind::Audio], args)?;
    Ok(AudioStream(node.output(0)))
}

/// Options for the `volume` filter.
#[derive(Debug, Clone, Default)]
pub struct Volume {
    volume: Option<Value>,
    precision: Option<Value>,
    extra: Args,
}

impl Volume {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gain factor or expression, e.g. `0.5` or `"-6dB"`.
    #[must_use]
    pub fn volume(mut self, volume: impl Into<Value>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    /// Mixing precision: `fixed`, `float`, or `double`.
    #[must_use]
    pub fn precision(mut self, precision: impl Into<Value>) -> Self {
        self.precision = Some(precision.into());
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("volume", explicit_or(self.volume, Value::Float(1.0)));
        args.insert(
            "precision",
            explicit_or(self.precision, Value::Symbol("float".into())),
        );
        args.overlay(self.extra);
        args
    }
}

/// Options for the `atrim` filter.
#[derive(Debug, Clone, Default)]
pub struct Atrim {
    start: Option<Value>,
    end: Option<Value>,
    duration: Option<Value>,
    extra: Args,
}

impl Atrim {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of the kept range.
    #[must_use]
    pub fn start(mut self, start: impl Into<Value>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// End of the kept range.
    #[must_use]
    pub fn end(mut self, end: impl Into<Value>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Maximum duration of the kept range.
    #[must_use]
    pub fn duration(mut self, duration: impl Into<Value>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("start", explicit_or(self.start, Value::from("0")));
        args.insert("end", explicit_or(self.end, Value::from("0")));
        args.insert("duration", explicit_or(self.duration, Value::from("0")));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `aformat` filter.
#[derive(Debug, Clone, Default)]
pub struct Aformat {
    sample_fmts: Option<Value>,
    sample_rates: Option<Value>,
    channel_layouts: Option<Value>,
    extra: Args,
}

impl Aformat {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `|`-separated sample formats.
    #[must_use]
    pub fn sample_fmts(mut self, fmts: impl Into<Value>) -> Self {
        self.sample_fmts = Some(fmts.into());
        self
    }

    /// `|`-separated sample rates.
    #[must_use]
    pub fn sample_rates(mut self, rates: impl Into<Value>) -> Self {
        self.sample_rates = Some(rates.into());
        self
    }

    /// `|`-separated channel layouts.
    #[must_use]
    pub fn channel_layouts(mut self, layouts: impl Into<Value>) -> Self {
        self.channel_layouts = Some(layouts.into());
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("sample_fmts", explicit_or(self.sample_fmts, Value::from("")));
        args.insert("sample_rates", explicit_or(self.sample_rates, Value::from("")));
        args.insert(
            "channel_layouts",
            explicit_or(self.channel_layouts, Value::from("")),
        );
        args.overlay(self.extra);
        args
    }
}

/// Options for the `aecho` filter.
#[derive(Debug, Clone, Default)]
pub struct Aecho {
    in_gain: Option<Value>,
    out_gain: Option<Value>,
    delays: Option<Value>,
    decays: Option<Value>,
    extra: Args,
}

impl Aecho {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Input gain of the reflected signal.
    #[must_use]
    pub fn in_gain(mut self, gain: f64) -> Self {
        self.in_gain = Some(Value::Float(gain));
        self
    }

    /// Output gain of the reflected signal.
    #[must_use]
    pub fn out_gain(mut self, gain: f64) -> Self {
        self.out_gain = Some(Value::Float(gain));
        self
    }

    /// `|`-separated delays in milliseconds.
    #[must_use]
    pub fn delays(mut self, delays: impl Into<Value>) -> Self {
        self.delays = Some(delays.into());
        self
    }

    /// `|`-separated decay factors.
    #[must_use]
    pub fn decays(mut self, decays: impl Into<Value>) -> Self {
        self.decays = Some(decays.into());
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("in_gain", explicit_or(self.in_gain, Value::Float(0.6)));
        args.insert("out_gain", explicit_or(self.out_gain, Value::Float(0.3)));
        args.insert("delays", explicit_or(self.delays, Value::from("1000")));
        args.insert("decays", explicit_or(self.decays, Value::from("0.5")));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `adelay` filter.
#[derive(Debug, Clone, Default)]
pub struct Adelay {
    delays: Option<Value>,
    all: Option<Value>,
    extra: Args,
}

impl Adelay {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `|`-separated per-channel delays in milliseconds.
    #[must_use]
    pub fn delays(mut self, delays: impl Into<Value>) -> Self {
        self.delays = Some(delays.into());
        self
    }

    /// Apply the last delay to all remaining channels.
    #[must_use]
    pub fn all(mut self, all: bool) -> Self {
        self.all = Some(Value::Bool(all));
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("delays", explicit_or(self.delays, Value::from("")));
        args.insert("all", explicit_or(self.all, Value::Bool(false)));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `highpass` filter.
#[derive(Debug, Clone, Default)]
pub struct Highpass {
    frequency: Option<Value>,
    poles: Option<Value>,
    width: Option<Value>,
    extra: Args,
}

impl Highpass {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cutoff frequency in Hz.
    #[must_use]
    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(Value::Float(frequency));
        self
    }

    /// Number of filter poles.
    #[must_use]
    pub fn poles(mut self, poles: i64) -> Self {
        self.poles = Some(Value::Int(poles));
        self
    }

    /// Band width.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(Value::Float(width));
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("frequency", explicit_or(self.frequency, Value::Float(3000.0)));
        args.insert("poles", explicit_or(self.poles, Value::Int(2)));
        args.insert("width", explicit_or(self.width, Value::Float(0.707)));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `lowpass` filter.
#[derive(Debug, Clone, Default)]
pub struct Lowpass {
    frequency: Option<Value>,
    poles: Option<Value>,
    width: Option<Value>,
    extra: Args,
}

impl Lowpass {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cutoff frequency in Hz.
    #[must_use]
    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(Value::Float(frequency));
        self
    }

    /// Number of filter poles.
    #[must_use]
    pub fn poles(mut self, poles: i64) -> Self {
        self.poles = Some(Value::Int(poles));
        self
    }

    /// Band width.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(Value::Float(width));
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("frequency", explicit_or(self.frequency, Value::Float(500.0)));
        args.insert("poles", explicit_or(self.poles, Value::Int(2)));
        args.insert("width", explicit_or(self.width, Value::Float(0.707)));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `loudnorm` filter.
#[derive(Debug, Clone, Default)]
pub struct Loudnorm {
    i: Option<Value>,
    lra: Option<Value>,
    tp: Option<Value>,
    extra: Args,
}

impl Loudnorm {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrated loudness target in LUFS.
    #[must_use]
    pub fn i(mut self, i: f64) -> Self {
        self.i = Some(Value::Float(i));
        self
    }

    /// Loudness range target in LU.
    #[must_use]
    pub fn lra(mut self, lra: f64) -> Self {
        self.lra = Some(Value::Float(lra));
        self
    }

    /// Maximum true peak in dBTP.
    #[must_use]
    pub fn tp(mut self, tp: f64) -> Self {
        self.tp = Some(Value::Float(tp));
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("i", explicit_or(self.i, Value::Float(-24.0)));
        args.insert("lra", explicit_or(self.lra, Value::Float(7.0)));
        args.insert("tp", explicit_or(self.tp, Value::Float(-2.0)));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `amix` filter. The `inputs` option is computed by
/// [`AudioStream::amix`] from the supplied streams.
#[derive(Debug, Clone, Default)]
pub struct Amix {
    duration: Option<Value>,
    dropout_transition: Option<Value>,
    weights: Option<Value>,
    extra: Args,
}

impl Amix {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How stream end is decided: `longest`, `shortest`, or `first`.
    #[must_use]
    pub fn duration(mut self, duration: impl Into<Value>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Volume renormalization time when an input ends, in seconds.
    #[must_use]
    pub fn dropout_transition(mut self, seconds: f64) -> Self {
        self.dropout_transition = Some(Value::Float(seconds));
        self
    }

    /// Space-separated per-input weights.
    #[must_use]
    pub fn weights(mut self, weights: impl Into<Value>) -> Self {
        self.weights = Some(weights.into());
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert(
            "duration",
            explicit_or(self.duration, Value::Symbol("longest".into())),
        );
        args.insert(
            "dropout_transition",
            explicit_or(self.dropout_transition, Value::Float(2.0)),
        );
        args.insert("weights", explicit_or(self.weights, Value::from("")));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `acrossfade` filter.
#[derive(Debug, Clone, Default)]
pub struct Acrossfade {
    duration: Option<Value>,
    curve1: Option<Value>,
    curve2: Option<Value>,
    extra: Args,
}

impl Acrossfade {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cross-fade duration in seconds.
    #[must_use]
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(Value::Float(seconds));
        self
    }

    /// Fade-out curve of the first stream.
    #[must_use]
    pub fn curve1(mut self, curve: impl Into<Value>) -> Self {
        self.curve1 = Some(curve.into());
        self
    }

    /// Fade-in curve of the second stream.
    #[must_use]
    pub fn curve2(mut self, curve: impl Into<Value>) -> Self {
        self.curve2 = Some(curve.into());
        self
    }

    /// Pass an option the builder does not name.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("duration", explicit_or(self.duration, Value::Float(0.0)));
        args.insert("curve1", explicit_or(self.curve1, Value::Symbol("tri".into())));
        args.insert("curve2", explicit_or(self.curve2, Value::Symbol("tri".into())));
        args.overlay(self.extra);
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffgraph_core::compile;

    fn src(input: usize) -> AudioStream {
        AudioStream::new(Stream::source(input, Some(StreamKind::Audio)))
    }

    #[test]
    fn volume_renders_float_shortest_form() {
        let out = src(0).volume(Volume::new().volume(0.5)).unwrap();
        let compiled = compile(&[out.into_stream()]).unwrap();
        assert_eq!(compiled.graph, "[0:a]volume=volume=0.5[s0]");
    }

    #[test]
    fn atempo_is_always_explicit() {
        let out = src(0).atempo(2.0).unwrap();
        let compiled = compile(&[out.into_stream()]).unwrap();
        assert_eq!(compiled.graph, "[0:a]atempo=tempo=2[s0]");
    }

    #[test]
    fn amix_computes_input_count() {
        let second = src(1);
        let third = src(2);
        let out = src(0).amix(&[&second, &third], Amix::new()).unwrap();
        let compiled = compile(&[out.into_stream()]).unwrap();
        assert_eq!(compiled.graph, "[0:a][1:a][2:a]amix=inputs=3[s0]");
    }

    #[test]
    fn amix_named_options_follow_inputs() {
        let second = src(1);
        let out = src(0)
            .amix(&[&second], Amix::new().duration("shortest"))
            .unwrap();
        let compiled = compile(&[out.into_stream()]).unwrap();
        assert_eq!(
            compiled.graph,
            "[0:a][1:a]amix=inputs=2:duration=shortest[s0]"
        );
    }

    #[test]
    fn asplit_fans_out() {
        let halves = src(0).asplit(2).unwrap();
        let processed = halves[0].atempo(1.5).unwrap();
        let compiled = compile(&[
            processed.into_stream(),
            halves[1].clone().into_stream(),
        ])
        .unwrap();
        assert_eq!(
            compiled.graph,
            "[0:a]asplit=outputs=2[s0][s1];[s0]atempo=tempo=1.5[s2]"
        );
        assert_eq!(compiled.terminal_labels, vec!["s2", "s1"]);
    }

    #[test]
    fn acrossfade_joins_two_streams() {
        let next = src(1);
        let out = src(0)
            .acrossfade(&next, Acrossfade::new().duration(3.0))
            .unwrap();
        let compiled = compile(&[out.into_stream()]).unwrap();
        assert_eq!(compiled.graph, "[0:a][1:a]acrossfade=duration=3[s0]");
    }

    #[test]
    fn video_source_into_audio_filter_is_rejected() {
        let video = AudioStream::new(Stream::source(0, Some(StreamKind::Video)));
        let err = video.atempo(1.0).unwrap_err();
        assert!(matches!(
            err,
            FilterError::Graph(ffgraph_core::GraphError::TypeMismatch { .. })
        ));
    }
}
