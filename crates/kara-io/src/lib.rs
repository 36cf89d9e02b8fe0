//! # kara-io
//!
//! File formats for the user-editable line table: SRT cue files and plain
//! JSON rows. Both loaders produce unvalidated [`RawSegment`] rows: edited
//! and machine-produced lines re-enter the pipeline through the same
//! [`SegmentList::normalize`](kara_core::SegmentList::normalize) path, with
//! no bypass.

#![deny(clippy::all)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod srt;
pub mod table;

pub use error::IoError;

use kara_core::RawSegment;
use std::path::Path;

/// Load a line table from a path, picking the format from the extension
/// (`.srt` for SubRip, anything else is treated as JSON rows).
pub fn load_table(path: &Path) -> Result<Vec<RawSegment>, IoError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("srt") => srt::parse(&content),
        _ => table::load_json(&content),
    }
}

/// Save segments to a path, picking the format from the extension the same
/// way [`load_table`] does.
pub fn save_table(path: &Path, segments: &[kara_core::Segment]) -> Result<(), IoError> {
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("srt") => srt::write(segments),
        _ => table::save_json(segments)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}
