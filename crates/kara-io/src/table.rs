//! JSON line-table rows
//!
//! The editable table is a plain JSON array of `{start, end, text}` rows,
//! the same shape a transcription backend emits, so edited files and
//! machine output are interchangeable inputs.

use crate::error::IoError;
use kara_core::{RawSegment, Segment};

/// Parse a JSON array of rows.
pub fn load_json(content: &str) -> Result<Vec<RawSegment>, IoError> {
    Ok(serde_json::from_str(content)?)
}

/// Serialize segments as a pretty-printed JSON array of rows.
pub fn save_json(segments: &[Segment]) -> Result<String, IoError> {
    let rows: Vec<RawSegment> = segments
        .iter()
        .map(|s| RawSegment::new(s.start, s.end, s.text.clone()))
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
