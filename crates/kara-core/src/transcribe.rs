//! Speech-to-text collaborator boundary
//!
//! Transcription itself is out of scope for this workspace; the engine only
//! consumes its output shape. A backend produces `{start, end, text}` rows
//! in recognition order, and those rows enter the pipeline through
//! [`SegmentList::normalize`](crate::SegmentList::normalize) exactly like
//! user-edited ones.

use crate::segment::RawSegment;
use std::path::Path;
use thiserror::Error;

/// Errors a transcription backend may surface.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// The audio file could not be opened or decoded
    #[error("audio not readable: {path}")]
    UnreadableAudio {
        /// Offending input path
        path: String,
    },

    /// The backend itself failed
    #[error("transcription backend failed: {0}")]
    Backend(String),
}

/// An opaque speech-to-text engine: audio in, timed rows out.
///
/// Row order is recognition order and is preserved through the rest of the
/// pipeline; implementations must not sort by timestamp.
pub trait Transcriber {
    /// Transcribe an audio file into timed lyric rows
    fn transcribe(&self, audio: &Path) -> Result<Vec<RawSegment>, TranscribeError>;
}
