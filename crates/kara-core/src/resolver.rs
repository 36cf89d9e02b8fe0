//! Live playback-position resolution
//!
//! Each playback tick carries an elapsed-time value in milliseconds; the
//! tracker maps it to the lyric line that is "now" and the one that is
//! "next". Resolution is total (every position produces a displayable
//! answer) and stateful only in what was last shown, so a gap between
//! lines holds the previous text on screen instead of blanking it.

use crate::segment::SegmentList;

/// What the screen should show after a resolver tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiveDisplay {
    /// Text of the active line; the previously shown text during a gap
    pub main: String,
    /// Text of the line immediately following the active one in list order
    pub next: String,
    /// Whether `main` differs from what the last tick reported. Callers
    /// must redraw only when this is set; suppressing no-op redraws is a
    /// correctness requirement, not an optimization.
    pub changed: bool,
}

/// Tracks the last-displayed line across resolver ticks.
///
/// One tracker per playback session. Ticks arrive on a single thread and
/// each call completes before the next is processed; there is no
/// cancellation, and no tick depends on any state beyond the previous
/// display text.
#[derive(Debug, Clone, Default)]
pub struct LyricTracker {
    last_main: String,
    last_next: String,
}

impl LyricTracker {
    /// Create a tracker with nothing displayed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a playback position against the segment list.
    ///
    /// Scans in list order; the first segment whose inclusive
    /// `[start, end]` interval contains the position wins, so when two
    /// overlapping lines both contain it the earlier-indexed one is
    /// authoritative. "Next" is the following segment *by list position*;
    /// arrival order defines upcoming, not start-time order.
    ///
    /// When no segment contains the position (a gap, or before the first /
    /// after the last line) the previous display is held unchanged; before
    /// anything has matched, both tiers are empty. Never fails.
    pub fn resolve(&mut self, position_ms: u64, segments: &SegmentList) -> LiveDisplay {
        let seconds = position_ms as f64 / 1000.0;

        let hit = segments
            .iter()
            .enumerate()
            .find(|(_, seg)| seg.contains(seconds));

        let Some((index, seg)) = hit else {
            return LiveDisplay {
                main: self.last_main.clone(),
                next: self.last_next.clone(),
                changed: false,
            };
        };

        let next = segments
            .get(index + 1)
            .map(|s| s.text.clone())
            .unwrap_or_default();

        let changed = seg.text != self.last_main;
        self.last_main = seg.text.clone();
        self.last_next = next.clone();

        LiveDisplay {
            main: seg.text.clone(),
            next,
            changed,
        }
    }

    /// Forget the displayed state, e.g. when playback restarts
    pub fn reset(&mut self) {
        self.last_main.clear();
        self.last_next.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{RawSegment, SegmentList, Strictness};
    use pretty_assertions::assert_eq;

    fn list(rows: Vec<RawSegment>) -> SegmentList {
        SegmentList::normalize(rows, Strictness::Strict).unwrap()
    }

    fn three_lines() -> SegmentList {
        list(vec![
            RawSegment::new(0.0, 2.0, "one"),
            RawSegment::new(3.0, 5.0, "two"),
            RawSegment::new(6.0, 8.0, "three"),
        ])
    }

    #[test]
    fn resolves_active_and_next() {
        let segments = three_lines();
        let mut tracker = LyricTracker::new();

        let display = tracker.resolve(1000, &segments);
        assert_eq!(display.main, "one");
        assert_eq!(display.next, "two");
        assert!(display.changed);
    }

    #[test]
    fn last_line_has_no_next() {
        let segments = three_lines();
        let mut tracker = LyricTracker::new();

        let display = tracker.resolve(7000, &segments);
        assert_eq!(display.main, "three");
        assert_eq!(display.next, "");
    }

    #[test]
    fn first_match_wins_on_overlap() {
        let segments = list(vec![
            RawSegment::new(0.0, 10.0, "A"),
            RawSegment::new(5.0, 15.0, "B"),
        ]);
        let mut tracker = LyricTracker::new();

        let display = tracker.resolve(7000, &segments);
        assert_eq!(display.main, "A");
        assert_eq!(display.next, "B");
    }

    #[test]
    fn next_follows_list_order_not_start_time() {
        // Arrival order is authoritative even when timestamps disagree.
        let segments = SegmentList::from_segments(vec![
            crate::Segment {
                start: 10.0,
                end: 12.0,
                text: "late but first".into(),
            },
            crate::Segment {
                start: 0.0,
                end: 2.0,
                text: "early but second".into(),
            },
        ]);
        let mut tracker = LyricTracker::new();

        let display = tracker.resolve(11_000, &segments);
        assert_eq!(display.main, "late but first");
        assert_eq!(display.next, "early but second");
    }

    #[test]
    fn gap_holds_previous_display() {
        let segments = three_lines();
        let mut tracker = LyricTracker::new();

        tracker.resolve(1000, &segments);
        let display = tracker.resolve(2500, &segments); // between "one" and "two"
        assert_eq!(display.main, "one");
        assert_eq!(display.next, "two");
        assert!(!display.changed);
    }

    #[test]
    fn gap_before_any_match_shows_nothing() {
        let segments = list(vec![RawSegment::new(5.0, 6.0, "later")]);
        let mut tracker = LyricTracker::new();

        let display = tracker.resolve(0, &segments);
        assert_eq!(display.main, "");
        assert_eq!(display.next, "");
        assert!(!display.changed);
    }

    #[test]
    fn repeat_ticks_suppress_redraw() {
        let segments = three_lines();
        let mut tracker = LyricTracker::new();

        let first = tracker.resolve(500, &segments);
        assert!(first.changed);
        let second = tracker.resolve(1500, &segments);
        assert_eq!(second.main, first.main);
        assert!(!second.changed);
    }

    #[test]
    fn change_fires_again_after_new_line() {
        let segments = three_lines();
        let mut tracker = LyricTracker::new();

        assert!(tracker.resolve(1000, &segments).changed);
        assert!(tracker.resolve(4000, &segments).changed);
        assert!(!tracker.resolve(4500, &segments).changed);
    }

    #[test]
    fn totality_across_positions() {
        // Every position gets an answer, including far past the end.
        let segments = three_lines();
        let mut tracker = LyricTracker::new();
        for ms in (0..20_000u64).step_by(250) {
            let _ = tracker.resolve(ms, &segments);
        }
        let after_end = tracker.resolve(1_000_000, &segments);
        assert_eq!(after_end.main, "three");
        assert!(!after_end.changed);
    }

    #[test]
    fn reset_clears_held_display() {
        let segments = three_lines();
        let mut tracker = LyricTracker::new();

        tracker.resolve(1000, &segments);
        tracker.reset();
        let display = tracker.resolve(2500, &segments); // in a gap again
        assert_eq!(display.main, "");
        assert!(!display.changed);
    }

    #[test]
    fn empty_list_is_a_permanent_gap() {
        let segments = SegmentList::default();
        let mut tracker = LyricTracker::new();
        let display = tracker.resolve(1000, &segments);
        assert_eq!(display, LiveDisplay::default());
    }
}
