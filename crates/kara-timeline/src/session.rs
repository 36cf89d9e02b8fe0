//! Immutable render session
//!
//! One value carries everything a batch pass needs. There is no global
//! mutable session state anywhere in the pipeline: re-analysis or a user
//! edit builds a *new* session via the `with_*` methods, so an in-flight
//! render never observes a change to its inputs.

use crate::background::BackgroundDescriptor;
use kara_core::SegmentList;
use kara_render::RenderStyle;
use std::path::PathBuf;

/// Inputs to one batch render pass.
#[derive(Debug, Clone)]
pub struct RenderSession {
    /// Timed lyric lines, in arrival order; read-only for the pass
    pub segments: SegmentList,
    /// Display styling
    pub style: RenderStyle,
    /// Background medium
    pub background: BackgroundDescriptor,
    /// The authoritative audio track
    pub audio: PathBuf,
}

impl RenderSession {
    /// Assemble a session
    pub fn new(
        segments: SegmentList,
        style: RenderStyle,
        background: BackgroundDescriptor,
        audio: impl Into<PathBuf>,
    ) -> Self {
        Self {
            segments,
            style,
            background,
            audio: audio.into(),
        }
    }

    /// A new session with edited lines, replacing the list wholesale
    pub fn with_segments(&self, segments: SegmentList) -> Self {
        Self {
            segments,
            ..self.clone()
        }
    }

    /// A new session with a different style
    pub fn with_style(&self, style: RenderStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kara_core::{RawSegment, Strictness};

    #[test]
    fn edits_build_a_new_session() {
        let list = SegmentList::normalize(
            vec![RawSegment::new(0.0, 1.0, "original")],
            Strictness::Strict,
        )
        .unwrap();
        let session = RenderSession::new(
            list,
            RenderStyle::default(),
            BackgroundDescriptor::from_path("bg.png"),
            "song.mp3",
        );

        let edited = SegmentList::normalize(
            vec![RawSegment::new(0.0, 1.0, "edited")],
            Strictness::Strict,
        )
        .unwrap();
        let replaced = session.with_segments(edited);

        assert_eq!(session.segments.get(0).unwrap().text, "original");
        assert_eq!(replaced.segments.get(0).unwrap().text, "edited");
        assert_eq!(replaced.audio, session.audio);
    }
}
