//! Typed video stream handle and its filter factories.

use std::sync::Arc;

use ffgraph_core::{Args, Node, Param, Stream, StreamKind, Value};

use crate::error::{FilterError, Result};
use crate::explicit_or;

/// Plane tokens `extractplanes` accepts, one output pad per token.
pub const PLANE_TOKENS: &[&str] = &["y", "u", "v", "a", "r", "g", "b"];

/// A handle to a video stream: one video output pad of a node, or a source
/// input's video component.
#[derive(Debug, Clone)]
pub struct VideoStream(pub(crate) Stream);

impl VideoStream {
    /// Wrap a raw stream handle carrying video.
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

    /// Resize with the `scale` filter.
    pub fn scale(&self, opts: Scale) -> Result<VideoStream> {
        unary(self, "scale", opts.build())
    }

    /// Crop a rectangle with the `crop` filter.
    pub fn crop(&self, opts: Crop) -> Result<VideoStream> {
        unary(self, "crop", opts.build())
    }

    /// Add borders with the `pad` filter.
    pub fn pad(&self, opts: Pad) -> Result<VideoStream> {
        unary(self, "pad", opts.build())
    }

    /// Mirror horizontally.
    pub fn hflip(&self) -> Result<VideoStream> {
        unary(self, "hflip", Args::new())
    }

    /// Mirror vertically.
    pub fn vflip(&self) -> Result<VideoStream> {
        unary(self, "vflip", Args::new())
    }

    /// Invert colors.
    pub fn negate(&self) -> Result<VideoStream> {
        unary(self, "negate", Args::new())
    }

    /// Rotate/flip by 90-degree steps with the `transpose` filter.
    pub fn transpose(&self, opts: Transpose) -> Result<VideoStream> {
        unary(self, "transpose", opts.build())
    }

    /// Convert the frame rate with the `fps` filter.
    pub fn fps(&self, opts: Fps) -> Result<VideoStream> {
        unary(self, "fps", opts.build())
    }

    /// Constrain pixel formats with the `format` filter.
    pub fn format(&self, pix_fmts: impl Into<Value>) -> Result<VideoStream> {
        let mut args = Args::new();
        args.insert("pix_fmts", Param::Explicit(pix_fmts.into()));
        unary(self, "format", args)
    }

    /// Rewrite presentation timestamps with the `setpts` filter.
    pub fn setpts(&self, expr: impl Into<Value>) -> Result<VideoStream> {
        let mut args = Args::new();
        args.insert("expr", Param::Explicit(expr.into()));
        unary(self, "setpts", args)
    }

    /// Keep a time range with the `trim` filter.
    pub fn trim(&self, opts: Trim) -> Result<VideoStream> {
        unary(self, "trim", opts.build())
    }

    /// Draw text with the `drawtext` filter.
    pub fn drawtext(&self, opts: DrawText) -> Result<VideoStream> {
        unary(self, "drawtext", opts.build())
    }

    /// Overlay `top` onto this stream.
    pub fn overlay(&self, top: &VideoStream, opts: Overlay) -> Result<VideoStream> {
        binary(self, top, "overlay", opts.build())
    }

    /// Blend with `other` per-pixel.
    pub fn blend(&self, other: &VideoStream, opts: Blend) -> Result<VideoStream> {
        binary(self, other, "blend", opts.build())
    }

    /// Duplicate into `outputs` identical streams with the `split` filter.
    pub fn split(&self, outputs: usize) -> Result<Vec<VideoStream>> {
        if outputs == 0 {
            return Err(FilterError::ZeroOutputs {
                filter: "split".to_string(),
            });
        }
        let mut args = Args::new();
        args.insert("outputs", Param::Explicit(Value::from(outputs)));
        let node = spawn(
            "split",
            vec![self.0.clone()],
            vec![StreamKind::Video; outputs],
            args,
        )?;
        Ok(node.outputs().into_iter().map(VideoStream).collect())
    }

    /// Extract one grayscale stream per requested plane token
    /// (`"y+u+v"`-style) with the `extractplanes` filter. The output arity
    /// is computed from the token list before the node is created.
    pub fn extractplanes(&self, planes: &str) -> Result<Vec<VideoStream>> {
        let tokens: Vec<&str> = planes.split('+').filter(|t| !t.is_empty()).collect();
        if tokens.is_empty() {
            return Err(FilterError::NoPlanes);
        }
        for token in &tokens {
            if !PLANE_TOKENS.contains(token) {
                return Err(FilterError::UnknownPlane {
                    token: token.to_string(),
                });
            }
        }
        let mut args = Args::new();
        args.insert("planes", Param::Explicit(Value::Symbol(planes.to_string())));
        let node = spawn(
            "extractplanes",
            vec![self.0.clone()],
            vec![StreamKind::Video; tokens.len()],
            args,
        )?;
        Ok(node.outputs().into_iter().map(VideoStream).collect())
    }

    /// Cut into consecutive segments at `|`-separated timestamps with the
    /// `segment` filter. One output per segment: the split points plus one.
    pub fn segment(&self, timestamps: &str) -> Result<Vec<VideoStream>> {
        let splits = timestamps.split('|').filter(|t| !t.is_empty()).count();
        if splits == 0 {
            return Err(FilterError::ZeroOutputs {
                filter: "segment".to_string(),
            });
        }
        let mut args = Args::new();
        args.insert(
            "timestamps",
            Param::Explicit(Value::Str(timestamps.to_string())),
        );
        let node = spawn(
            "segment",
            vec![self.0.clone()],
            vec![StreamKind::Video; splits + 1],
            args,
        )?;
        Ok(node.outputs().into_iter().map(VideoStream).collect())
    }

    /// Route frames matching `expr` across `outputs` pads with the `select`
    /// filter.
    pub fn select(&self, expr: impl Into<Value>, outputs: usize) -> Result<Vec<VideoStream>> {
        if outputs == 0 {
            return Err(FilterError::ZeroOutputs {
                filter: "select".to_string(),
            });
        }
        let mut args = Args::new();
        args.insert("expr", Param::Explicit(expr.into()));
        args.insert("outputs", Param::Explicit(Value::from(outputs)));
        let node = spawn(
            "select",
            vec![self.0.clone()],
            vec![StreamKind::Video; outputs],
            args,
        )?;
        Ok(node.outputs().into_iter().map(VideoStream).collect())
    }

    /// Scale to the dimensions of `reference` with the `scale2ref` filter.
    /// Returns the scaled stream and the passed-through reference.
    pub fn scale2ref(
        &self,
        reference: &VideoStream,
        opts: Scale,
    ) -> Result<(VideoStream, VideoStream)> {
        let node = spawn(
            "scale2ref",
            vec![self.0.clone(), reference.0.clone()],
            vec![StreamKind::Video, StreamKind::Video],
            opts.build(),
        )?;
        Ok((VideoStream(node.output(0)), VideoStream(node.output(1))))
    }
}

fn spawn(
    name: &str,
    inputs: Vec<Stream>,
    output_kinds: Vec<StreamKind>,
    args: Args,
) -> Result<Arc<Node>> {
    let input_kinds = vec![StreamKind::Video; inputs.len()];
    Ok(Node::spawn(name, &input_kinds, output_kinds, inputs, args)?)
}

fn unary(stream: &VideoStream, name: &str, args: Args) -> Result<VideoStream> {
    let node = spawn(name, vec![stream.0.clone()], vec![StreamKind::Video], args)?;
    Ok(VideoStream(node.output(0)))
}

fn binary(a: &VideoStream, b: &VideoStream, name: &str, args: Args) -> Result<VideoStream> {
    let node = spawn(
        name,
        vec![a.0.clone(), b.0.clone()],
        vec![StreamKind::Video],
        args,
    )?;
    Ok(VideoStream(node.output(0)))
}

/// Options for the `scale` filter (also used by `scale2ref`).
#[derive(Debug, Clone, Default)]
pub struct Scale {
    w: Option<Value>,
    h: Option<Value>,
    flags: Option<Value>,
    force_original_aspect_ratio: Option<Value>,
    extra: Args,
}

impl Scale {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Output width expression.
    #[must_use]
    pub fn w(mut self, w: impl Into<Value>) -> Self {
        self.w = Some(w.into());
        self
    }

    /// Output height expression.
    #[must_use]
    pub fn h(mut self, h: impl Into<Value>) -> Self {
        self.h = Some(h.into());
        self
    }

    /// Scaler flags, e.g. `lanczos`.
    #[must_use]
    pub fn flags(mut self, flags: impl Into<Value>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// `disable`, `decrease`, or `increase`.
    #[must_use]
    pub fn force_original_aspect_ratio(mut self, mode: impl Into<Value>) -> Self {
        self.force_original_aspect_ratio = Some(mode.into());
        self
    }

    /// Pass an option the builder does not name. Always explicit; overrides
    /// a named option on collision.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, Param::Explicit(value.into()));
        self
    }

    fn build(self) -> Args {
        let mut args = Args::new();
        args.insert("w", explicit_or(self.w, Value::from("iw")));
        args.insert("h", explicit_or(self.h, Value::from("ih")));
        args.insert("flags", explicit_or(self.flags, Value::Symbol("bilinear".into())));
        args.insert(
            "force_original_aspect_ratio",
            explicit_or(
                self.force_original_aspect_ratio,
                Value::Symbol("disable".into()),
            ),
        );
        args.overlay(self.extra);
        args
    }
}

/// Options for the `crop` filter.
#[derive(Debug, Clone, Default)]
pub struct Crop {
    w: Option<Value>,
    h: Option<Value>,
    x: Option<Value>,
    y: Option<Value>,
    extra: Args,
}

impl Crop {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Output width expression.
    #[must_use]
    pub fn w(mut self, w: impl Into<Value>) -> Self {
        self.w = Some(w.into());
        self
    }

    /// Output height expression.
    #[must_use]
    pub fn h(mut self, h: impl Into<Value>) -> Self {
        self.h = Some(h.into());
        self
    }

    /// Horizontal offset expression.
    #[must_use]
    pub fn x(mut self, x: impl Into<Value>) -> Self {
        self.x = Some(x.into());
        self
    }

    /// Vertical offset expression.
    #[must_use]
    pub fn y(mut self, y: impl Into<Value>) -> Self {
        self.y = Some(y.into());
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
        args.insert("w", explicit_or(self.w, Value::from("iw")));
        args.insert("h", explicit_or(self.h, Value::from("ih")));
        args.insert("x", explicit_or(self.x, Value::from("(in_w-out_w)/2")));
        args.insert("y", explicit_or(self.y, Value::from("(in_h-out_h)/2")));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `pad` filter.
#[derive(Debug, Clone, Default)]
pub struct Pad {
    width: Option<Value>,
    height: Option<Value>,
    x: Option<Value>,
    y: Option<Value>,
    color: Option<Value>,
    extra: Args,
}

impl Pad {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Padded width expression.
    #[must_use]
    pub fn width(mut self, width: impl Into<Value>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Padded height expression.
    #[must_use]
    pub fn height(mut self, height: impl Into<Value>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Input placement, horizontal.
    #[must_use]
    pub fn x(mut self, x: impl Into<Value>) -> Self {
        self.x = Some(x.into());
        self
    }

    /// Input placement, vertical.
    #[must_use]
    pub fn y(mut self, y: impl Into<Value>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Border color.
    #[must_use]
    pub fn color(mut self, color: impl Into<Value>) -> Self {
        self.color = Some(color.into());
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
        args.insert("width", explicit_or(self.width, Value::from("iw")));
        args.insert("height", explicit_or(self.height, Value::from("ih")));
        args.insert("x", explicit_or(self.x, Value::from("0")));
        args.insert("y", explicit_or(self.y, Value::from("0")));
        args.insert("color", explicit_or(self.color, Value::from("black")));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `transpose` filter.
#[derive(Debug, Clone, Default)]
pub struct Transpose {
    dir: Option<Value>,
    passthrough: Option<Value>,
    extra: Args,
}

impl Transpose {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction: `cclock_flip`, `clock`, `cclock`, or `clock_flip`.
    #[must_use]
    pub fn dir(mut self, dir: impl Into<Value>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Pass through frames already in the target orientation.
    #[must_use]
    pub fn passthrough(mut self, mode: impl Into<Value>) -> Self {
        self.passthrough = Some(mode.into());
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
        args.insert("dir", explicit_or(self.dir, Value::Symbol("cclock_flip".into())));
        args.insert(
            "passthrough",
            explicit_or(self.passthrough, Value::Symbol("none".into())),
        );
        args.overlay(self.extra);
        args
    }
}

/// Options for the `fps` filter.
#[derive(Debug, Clone, Default)]
pub struct Fps {
    fps: Option<Value>,
    round: Option<Value>,
    eof_action: Option<Value>,
    extra: Args,
}

impl Fps {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target frame rate.
    #[must_use]
    pub fn fps(mut self, fps: impl Into<Value>) -> Self {
        self.fps = Some(fps.into());
        self
    }

    /// Timestamp rounding mode.
    #[must_use]
    pub fn round(mut self, round: impl Into<Value>) -> Self {
        self.round = Some(round.into());
        self
    }

    /// Action at end of input.
    #[must_use]
    pub fn eof_action(mut self, action: impl Into<Value>) -> Self {
        self.eof_action = Some(action.into());
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
        args.insert("fps", explicit_or(self.fps, Value::from("25")));
        args.insert("round", explicit_or(self.round, Value::Symbol("near".into())));
        args.insert(
            "eof_action",
            explicit_or(self.eof_action, Value::Symbol("round".into())),
        );
        args.overlay(self.extra);
        args
    }
}

/// Options for the `trim` filter.
#[derive(Debug, Clone, Default)]
pub struct Trim {
    start: Option<Value>,
    end: Option<Value>,
    duration: Option<Value>,
    extra: Args,
}

impl Trim {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of the kept range, in seconds or as a timestamp.
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

/// Options for the `drawtext` filter.
#[derive(Debug, Clone, Default)]
pub struct DrawText {
    text: Option<Value>,
    fontfile: Option<Value>,
    x: Option<Value>,
    y: Option<Value>,
    fontsize: Option<Value>,
    fontcolor: Option<Value>,
    extra: Args,
}

impl DrawText {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to draw. Metacharacters are escaped on render.
    #[must_use]
    pub fn text(mut self, text: impl Into<Value>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Font file path.
    #[must_use]
    pub fn fontfile(mut self, fontfile: impl Into<Value>) -> Self {
        self.fontfile = Some(fontfile.into());
        self
    }

    /// Horizontal position expression.
    #[must_use]
    pub fn x(mut self, x: impl Into<Value>) -> Self {
        self.x = Some(x.into());
        self
    }

    /// Vertical position expression.
    #[must_use]
    pub fn y(mut self, y: impl Into<Value>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Font size in points.
    #[must_use]
    pub fn fontsize(mut self, fontsize: impl Into<Value>) -> Self {
        self.fontsize = Some(fontsize.into());
        self
    }

    /// Font color.
    #[must_use]
    pub fn fontcolor(mut self, fontcolor: impl Into<Value>) -> Self {
        self.fontcolor = Some(fontcolor.into());
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
        args.insert("text", explicit_or(self.text, Value::from("")));
        args.insert("fontfile", explicit_or(self.fontfile, Value::from("")));
        args.insert("x", explicit_or(self.x, Value::from("0")));
        args.insert("y", explicit_or(self.y, Value::from("0")));
        args.insert("fontsize", explicit_or(self.fontsize, Value::Int(16)));
        args.insert("fontcolor", explicit_or(self.fontcolor, Value::from("black")));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `overlay` filter.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    x: Option<Value>,
    y: Option<Value>,
    eof_action: Option<Value>,
    shortest: Option<Value>,
    extra: Args,
}

impl Overlay {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal position of the top layer.
    #[must_use]
    pub fn x(mut self, x: impl Into<Value>) -> Self {
        self.x = Some(x.into());
        self
    }

    /// Vertical position of the top layer.
    #[must_use]
    pub fn y(mut self, y: impl Into<Value>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Action when the top layer ends: `repeat`, `endall`, or `pass`.
    #[must_use]
    pub fn eof_action(mut self, action: impl Into<Value>) -> Self {
        self.eof_action = Some(action.into());
        self
    }

    /// End with the shortest input.
    #[must_use]
    pub fn shortest(mut self, shortest: bool) -> Self {
        self.shortest = Some(Value::Bool(shortest));
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
        args.insert("x", explicit_or(self.x, Value::from("0")));
        args.insert("y", explicit_or(self.y, Value::from("0")));
        args.insert(
            "eof_action",
            explicit_or(self.eof_action, Value::Symbol("repeat".into())),
        );
        args.insert("shortest", explicit_or(self.shortest, Value::Bool(false)));
        args.overlay(self.extra);
        args
    }
}

/// Options for the `blend` filter.
#[derive(Debug, Clone, Default)]
pub struct Blend {
    all_mode: Option<Value>,
    all_opacity: Option<Value>,
    all_expr: Option<Value>,
    extra: Args,
}

impl Blend {
    /// Create with every option at its documented default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blend mode applied to all planes.
    #[must_use]
    pub fn all_mode(mut self, mode: impl Into<Value>) -> Self {
        self.all_mode = Some(mode.into());
        self
    }

    /// Opacity applied to all planes.
    #[must_use]
    pub fn all_opacity(mut self, opacity: f64) -> Self {
        self.all_opacity = Some(Value::Float(opacity));
        self
    }

    /// Blend expression applied to all planes.
    #[must_use]
    pub fn all_expr(mut self, expr: impl Into<Value>) -> Self {
        self.all_expr = Some(expr.into());
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
            "all_mode",
            explicit_or(self.all_mode, Value::Symbol("normal".into())),
        );
        args.insert("all_opacity", explicit_or(self.all_opacity, Value::Float(1.0)));
        args.insert("all_expr", explicit_or(self.all_expr, Value::from("")));
        args.overlay(self.extra);
        args
    }
}
