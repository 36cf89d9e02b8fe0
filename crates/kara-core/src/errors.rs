//! Error types for core segment handling

use thiserror::Error;

/// Errors produced while validating and normalizing segment lists.
///
/// Sanitization and live position resolution are total by construction and
/// never surface an error; only list normalization can fail, and only in
/// strict mode.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// A segment's interval is inverted or non-finite
    #[error("invalid segment at index {index}: interval [{start}, {end}] is not a valid time span")]
    InvalidSegment {
        /// Position of the offending row in the input list
        index: usize,
        /// Raw start value, seconds
        start: f64,
        /// Raw end value, seconds
        end: f64,
    },
}
