//! Error types for line-table I/O

use thiserror::Error;

/// Errors produced while reading or writing line tables.
#[derive(Debug, Error)]
pub enum IoError {
    /// A cue timestamp did not match `HH:MM:SS,mmm`
    #[error("malformed timestamp '{value}' in cue starting at line {line}")]
    BadTimestamp {
        /// The text that failed to parse
        value: String,
        /// 1-based line number of the cue's first line
        line: usize,
    },

    /// A cue block had no `start --> end` timing line
    #[error("cue starting at line {line} has no timing line")]
    MissingTiming {
        /// 1-based line number of the cue's first line
        line: usize,
    },

    /// JSON rows failed to (de)serialize
    #[error("line-table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying file I/O failed
    #[error("line-table I/O error: {0}")]
    Io(#[from] std::io::Error),
}
