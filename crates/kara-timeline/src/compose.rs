//! Overlay timeline assembly
//!
//! Turns a render session plus a normalized background into a stack of
//! interval-bound overlay clips. Lookahead for the "next" tier is resolved
//! on the raw segment list before rendering begins; the rendering itself is
//! a pure per-clip function and fans out across threads, with clip order
//! restored to original segment order by the collect.

use crate::background::NormalizedBackground;
use crate::error::TimelineError;
use crate::session::RenderSession;
use kara_core::SegmentList;
use kara_render::{FontLibrary, Frame, FrameRenderer};
use rayon::prelude::*;

/// One rendered frame bound to its display interval on the master timeline.
#[derive(Debug, Clone)]
pub struct OverlayClip {
    /// The rendered overlay pixels
    pub frame: Frame,
    /// Interval start, seconds
    pub start: f64,
    /// Interval end, seconds
    pub end: f64,
    /// Sanitized main-tier text shown by this clip
    pub main: String,
    /// Sanitized next-tier text shown by this clip; empty when none
    pub next: String,
}

/// The assembled batch output: background plus ordered overlay clips,
/// ready to hand to an [`Encoder`](crate::Encoder).
#[derive(Debug)]
pub struct Timeline {
    /// The normalized background layer
    pub background: NormalizedBackground,
    /// Overlay clips in original segment order
    pub clips: Vec<OverlayClip>,
    /// Total timeline duration, seconds
    pub duration: f64,
}

impl Timeline {
    /// Number of overlay clips
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

/// The next-tier text for the segment at `index`: the nearest following
/// line *in list order* whose sanitized text is non-empty.
///
/// The scan walks the raw list, so a line skipped for being empty still
/// occupies its position; filtering the list first and then indexing into
/// it would mis-promote successors for every segment after a skip.
pub fn next_display_text(
    segments: &SegmentList,
    index: usize,
    sanitize: impl Fn(&str) -> String,
) -> String {
    segments
        .as_slice()
        .get(index + 1..)
        .unwrap_or_default()
        .iter()
        .map(|seg| sanitize(&seg.text))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

struct ClipJob {
    start: f64,
    end: f64,
    main: String,
    next: String,
}

/// Render every displayable segment and bind it to its interval.
///
/// The style is retargeted at the normalized background's canvas before
/// anything is laid out, so normalization must already have happened. Either
/// every clip renders and a full [`Timeline`] comes back, or the first
/// failure aborts the batch with nothing partially written.
pub fn compose(
    session: &RenderSession,
    fonts: &mut FontLibrary,
    background: NormalizedBackground,
) -> Result<Timeline, TimelineError> {
    let style = session
        .style
        .clone()
        .with_canvas(background.width, background.height);
    let lead_in = style.lead_in.max(0.0);
    let lead_out = style.lead_out.max(0.0);
    let renderer = FrameRenderer::new(style, fonts)?;

    // Lookahead is resolved here, sequentially and against the raw list,
    // so the parallel phase below owes nothing to segment order.
    let jobs: Vec<ClipJob> = session
        .segments
        .iter()
        .enumerate()
        .filter_map(|(index, seg)| {
            let main = renderer.sanitize(&seg.text);
            if main.is_empty() {
                // No clip for this line; it still holds its position for
                // the neighbors' lookahead.
                return None;
            }
            let next = next_display_text(&session.segments, index, |t| renderer.sanitize(t));
            Some(ClipJob {
                start: (seg.start - lead_in).max(0.0),
                end: seg.end + lead_out,
                main,
                next,
            })
        })
        .collect();

    tracing::info!(
        clips = jobs.len(),
        segments = session.segments.len(),
        "rendering overlay frames"
    );

    let clips = jobs
        .into_par_iter()
        .map(|job| {
            renderer.render(&job.main, &job.next).map(|frame| OverlayClip {
                frame,
                start: job.start,
                end: job.end,
                main: job.main,
                next: job.next,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Timeline {
        duration: background.duration,
        background,
        clips,
    })
}
