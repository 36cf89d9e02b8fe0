//! Error types for batch timeline assembly

use std::path::PathBuf;
use thiserror::Error;

/// Errors from background normalization, composition, or encoding.
///
/// Background and encode failures are fatal to the batch pass and name the
/// offending input or stage, so a user can fix the specific file rather
/// than guess.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The background medium could not be probed or is unusable
    #[error("background load failed for {path}: {reason}")]
    BackgroundLoad {
        /// Offending media path
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Frame rendering failed
    #[error("render stage failed: {0}")]
    Render(#[from] kara_render::RenderError),

    /// The external encoder failed
    #[error("encode stage failed during {stage}: {detail}")]
    Encode {
        /// Which encode step failed
        stage: &'static str,
        /// Underlying detail, e.g. the tail of ffmpeg's stderr
        detail: String,
    },

    /// Working-directory or output I/O failed
    #[error("timeline I/O error: {0}")]
    Io(#[from] std::io::Error),
}
