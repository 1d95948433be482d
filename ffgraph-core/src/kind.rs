//! Stream kind tagging for filter pads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of data a stream carries.
///
/// Used to validate that a filter's declared input pads receive streams of
/// the matching kind before any graph text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    /// Video stream.
    Video,
    /// Audio stream.
    Audio,
}

impl StreamKind {
    /// Selector letter used in source labels such as `[0:v]`.
    pub fn selector(self) -> char {
        match self {
            StreamKind::Video => 'v',
            StreamKind::Audio => 'a',
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_letters() {
        assert_eq!(StreamKind::Video.selector(), 'v');
        assert_eq!(StreamKind::Audio.selector(), 'a');
    }

    #[test]
    fn display_names() {
        assert_eq!(StreamKind::Video.to_string(), "video");
        assert_eq!(StreamKind::Audio.to_string(), "audio");
    }
}
