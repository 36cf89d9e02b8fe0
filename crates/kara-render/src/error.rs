//! Error types for layout and rasterization

use thiserror::Error;

/// Rendering error types
#[derive(Debug, Error)]
pub enum RenderError {
    /// Canvas dimensions must be positive
    #[error("invalid canvas dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Pixmap allocation failed
    #[error("failed to create pixmap")]
    InvalidPixmap,

    /// No usable font face could be resolved.
    ///
    /// Raised only when the font database holds no face at all; a miss on
    /// the requested family silently degrades to a fallback face instead.
    #[error("font error: {0}")]
    FontError(String),

    /// Text shaping failed
    #[error("text shaping failed: {0}")]
    ShapingError(String),

    /// Path drawing failed
    #[error("drawing failed: {0}")]
    DrawingError(String),
}
