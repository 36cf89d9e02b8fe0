//! Timed lyric segments and list normalization
//!
//! A [`Segment`] is one time-coded lyric line. A [`SegmentList`] preserves
//! the order the transcription source produced: downstream "next line"
//! lookups depend on list position, never on a timestamp sort, so
//! normalization validates and clamps but does not reorder.

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};

/// An unvalidated `{start, end, text}` row, as produced by a transcription
/// backend or edited by a user in the line table.
///
/// Rows only become [`Segment`]s through [`SegmentList::normalize`]; machine
/// and human produced rows take the same path, there is no bypass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    /// Start of the line, seconds from the beginning of the track
    pub start: f64,
    /// End of the line, seconds
    pub end: f64,
    /// Line text, unsanitized
    pub text: String,
}

impl RawSegment {
    /// Create a raw row from its parts
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// One validated, time-coded lyric line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the line, seconds, non-negative
    pub start: f64,
    /// End of the line, seconds, never less than `start`
    pub end: f64,
    /// Line text; may be empty after sanitization, which downstream treats
    /// as "do not render this line"
    pub text: String,
}

impl Segment {
    /// Line duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `seconds` falls inside this line's interval.
    ///
    /// Both endpoints are inclusive, matching how subtitle events treat
    /// their start and end times.
    pub fn contains(&self, seconds: f64) -> bool {
        self.start <= seconds && seconds <= self.end
    }
}

/// How [`SegmentList::normalize`] reacts to an invalid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Drop the offending row with a warning and keep the rest
    #[default]
    Lenient,
    /// Reject the whole list on the first invalid row
    Strict,
}

/// Ordered sequence of [`Segment`]s; the unit of truth shared by the live
/// resolver and the batch compositor.
///
/// The list is read-only once handed to a render pass. Edits always build a
/// new list through [`SegmentList::normalize`] rather than mutating one an
/// in-flight pass may be reading.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentList(Vec<Segment>);

impl SegmentList {
    /// Validate and clamp raw rows into a segment list.
    ///
    /// - a row whose `end` precedes its `start`, or whose endpoints are not
    ///   finite numbers, is invalid: dropped under [`Strictness::Lenient`],
    ///   fatal under [`Strictness::Strict`];
    /// - a negative `start` is clamped to zero, and `end` is lifted to the
    ///   clamped start so clamping can never manufacture an inverted
    ///   interval;
    /// - arrival order is preserved exactly; overlaps and gaps between rows
    ///   are legal and pass through untouched.
    pub fn normalize(
        rows: impl IntoIterator<Item = RawSegment>,
        strictness: Strictness,
    ) -> Result<Self, CoreError> {
        let mut segments = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let valid = row.start.is_finite() && row.end.is_finite() && row.end >= row.start;
            if !valid {
                match strictness {
                    Strictness::Strict => {
                        return Err(CoreError::InvalidSegment {
                            index,
                            start: row.start,
                            end: row.end,
                        });
                    }
                    Strictness::Lenient => {
                        tracing::warn!(
                            index,
                            start = row.start,
                            end = row.end,
                            "dropping segment with invalid interval"
                        );
                        continue;
                    }
                }
            }

            let start = row.start.max(0.0);
            let end = row.end.max(start);
            segments.push(Segment {
                start,
                end,
                text: row.text,
            });
        }

        Ok(Self(segments))
    }

    /// Wrap already-validated segments without re-checking them.
    ///
    /// Intended for tests and for values round-tripped through serde; new
    /// input should go through [`SegmentList::normalize`].
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no lines
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Line at `index`, in arrival order
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.0.get(index)
    }

    /// Iterate lines in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }

    /// View the lines as a slice
    pub fn as_slice(&self) -> &[Segment] {
        &self.0
    }

    /// End of the last-ending line, seconds; zero for an empty list
    pub fn span_end(&self) -> f64 {
        self.0.iter().map(|s| s.end).fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
