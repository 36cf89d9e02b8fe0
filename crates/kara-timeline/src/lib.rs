//! # kara-timeline
//!
//! Batch-mode assembly: fit a background image or video to a canonical
//! even-width canvas, render every lyric line as a timed overlay frame, and
//! hand the assembled timeline plus the audio track to an encoder.
//!
//! The whole pass is a one-shot pure transform with no session state beyond
//! its inputs: background normalization completes first (its dimensions fix
//! the render canvas), frame rendering fans out across threads, and either
//! the full timeline reaches the encoder or the batch fails with nothing
//! written to the output location.

#![deny(clippy::all)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod background;
pub mod compose;
pub mod encode;
pub mod error;
pub mod session;

pub use background::{
    normalize_background, BackgroundDescriptor, BackgroundPlayback, FfprobeProbe, MediaInfo,
    MediaProbe, NormalizedBackground, CANONICAL_HEIGHT,
};
pub use compose::{compose, next_display_text, OverlayClip, Timeline};
pub use encode::{Encoder, FfmpegEncoder};
pub use error::TimelineError;
pub use session::RenderSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
