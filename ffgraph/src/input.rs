//! Source input construction.

use ffgraph_core::{Stream, StreamKind};
use ffgraph_filters::{AudioStream, VideoStream};

/// Handle to one input file position on the eventual ffmpeg command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    index: usize,
}

/// The `index`-th `-i` input of the command line being assembled.
pub fn input(index: usize) -> Input {
    Input { index }
}

impl Input {
    /// Input position.
    pub fn index(self) -> usize {
        self.index
    }

    /// The input's video component, labeled `[N:v]`.
    pub fn video(self) -> VideoStream {
        VideoStream::new(Stream::source(self.index, Some(StreamKind::Video)))
    }

    /// The input's audio component, labeled `[N:a]`.
    pub fn audio(self) -> AudioStream {
        AudioStream::new(Stream::source(self.index, Some(StreamKind::Audio)))
    }

    /// The whole input without a selector, labeled `[N]`. Carries no kind,
    /// so any pad accepts it.
    pub fn stream(self) -> Stream {
        Stream::source(self.index, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffgraph_core::compile;

    #[test]
    fn source_labels() {
        let video = input(0).video();
        let audio = input(1).audio();
        let compiled = compile(&[video.into_stream(), audio.into_stream()]).unwrap();
        assert_eq!(compiled.terminal_labels, vec!["0:v", "1:a"]);
    }

    #[test]
    fn selectorless_stream_has_no_kind() {
        assert!(input(2).stream().kind().unwrap().is_none());
    }
}
