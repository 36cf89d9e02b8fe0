//! Word wrap and two-tier vertical placement
//!
//! Wrapping is greedy under a character budget: words accumulate until the
//! next would overflow, and a single word longer than the budget gets its
//! own visual line rather than being split mid-word.
//!
//! Vertical placement puts the main block at canvas center shifted up by 5%
//! of canvas height, and the upcoming-line block 5% below the main block's
//! bottom edge. Line advance is 1.2× the tier's font height.

use crate::style::RenderStyle;
use smallvec::SmallVec;

/// Vertical advance between stacked lines, as a multiple of font height
pub const LINE_ADVANCE_FACTOR: f32 = 1.2;

/// Fraction of canvas height used for the upward shift of the main block
/// and the gap above the next block
const VERTICAL_SHIFT_RATIO: f32 = 0.05;

/// Marker wrapped around the upcoming line to signal "not yet"
const NEXT_TIER_ELLIPSIS: char = '…';

/// Wrapped visual lines; lyric lines rarely wrap past a few rows
pub type WrappedLines = SmallVec<[String; 4]>;

/// Greedy word wrap under a budget of `wrap_chars` characters per line.
///
/// Lengths are counted in characters, not bytes. A word longer than the
/// budget is placed alone on its line, unsplit. The guarantee callers get
/// is "no line exceeds the budget unless it is a single word".
pub fn wrap_line(text: &str, wrap_chars: usize) -> WrappedLines {
    let budget = wrap_chars.max(1);
    let mut lines = WrappedLines::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars == 0 {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= budget {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Placement of one tier's wrapped lines on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TierLayout {
    /// Wrapped visual lines, top to bottom
    pub lines: WrappedLines,
    /// Font height in pixels
    pub font_px: f32,
    /// Vertical advance between line tops, pixels
    pub advance: f32,
    /// Y of the block's top edge, pixels from canvas top
    pub top: f32,
}

impl TierLayout {
    /// Total block height in pixels
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.advance
    }
}

/// Full two-tier placement for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    /// The active line's block
    pub main: TierLayout,
    /// The upcoming line's block; absent when its text is empty
    pub next: Option<TierLayout>,
}

impl BlockLayout {
    /// Lay out sanitized tier texts against a style.
    ///
    /// `next_text` is decorated with leading/trailing ellipsis markers
    /// before wrapping; an empty `next_text` produces no next tier at all.
    pub fn compute(main_text: &str, next_text: &str, style: &RenderStyle) -> Self {
        let canvas_h = style.canvas_height as f32;
        let shift = VERTICAL_SHIFT_RATIO * canvas_h;

        let main_font = style.main_font_px();
        let main_lines = wrap_line(main_text, style.main_wrap_chars);
        let main_advance = main_font * LINE_ADVANCE_FACTOR;
        let main_height = main_lines.len() as f32 * main_advance;
        // Centered on the canvas, then shifted up to leave room below.
        let main_top = (canvas_h - main_height) / 2.0 - shift;

        let main = TierLayout {
            lines: main_lines,
            font_px: main_font,
            advance: main_advance,
            top: main_top,
        };

        let next = (!next_text.is_empty()).then(|| {
            let decorated = format!("{NEXT_TIER_ELLIPSIS} {next_text} {NEXT_TIER_ELLIPSIS}");
            let next_font = style.next_font_px();
            TierLayout {
                lines: wrap_line(&decorated, style.next_wrap_chars),
                font_px: next_font,
                advance: next_font * LINE_ADVANCE_FACTOR,
                top: main.top + main.height() + shift,
            }
        });

        Self { main, next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn wrap_respects_budget() {
        let lines = wrap_line("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(
            lines.as_slice(),
            ["the quick brown", "fox jumps over", "the lazy dog"]
        );
        for line in &lines {
            assert!(line.chars().count() <= 15);
        }
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_line("hello world", 30).as_slice(), ["hello world"]);
    }

    #[test]
    fn empty_text_wraps_to_nothing() {
        assert!(wrap_line("", 30).is_empty());
        assert!(wrap_line("   ", 30).is_empty());
    }

    #[test]
    fn oversized_word_gets_its_own_line_unsplit() {
        let lines = wrap_line("a pneumonoultramicroscopic word", 10);
        assert_eq!(
            lines.as_slice(),
            ["a", "pneumonoultramicroscopic", "word"]
        );
    }

    #[test]
    fn budget_counts_chars_not_bytes() {
        // Each word is 4 chars but 8 bytes; both fit a 9-char budget.
        let lines = wrap_line("éééé øøøø", 9);
        assert_eq!(lines.as_slice(), ["éééé øøøø"]);
    }

    proptest! {
        #[test]
        fn wrap_bound_holds_for_all_inputs(text in "\\PC{0,200}", budget in 1usize..60) {
            for line in wrap_line(&text, budget) {
                let chars = line.chars().count();
                let is_single_word = !line.contains(' ');
                prop_assert!(chars <= budget || is_single_word);
            }
        }

        #[test]
        fn wrap_preserves_all_words(text in "[a-z ]{0,200}", budget in 1usize..60) {
            let rejoined = wrap_line(&text, budget).join(" ");
            let original = text.split_whitespace().collect::<Vec<_>>().join(" ");
            prop_assert_eq!(rejoined, original);
        }
    }

    fn style_720p() -> RenderStyle {
        RenderStyle::default().with_canvas(1280, 720)
    }

    #[test]
    fn main_block_is_centered_then_shifted_up() {
        let style = style_720p();
        let layout = BlockLayout::compute("one line", "", &style);

        let advance = style.main_font_px() * LINE_ADVANCE_FACTOR;
        let expected_top = (720.0 - advance) / 2.0 - 0.05 * 720.0;
        assert_eq!(layout.main.top, expected_top);
        assert_eq!(layout.main.lines.len(), 1);
        assert!(layout.next.is_none());
    }

    #[test]
    fn next_block_sits_below_main_with_gap() {
        let style = style_720p();
        let layout = BlockLayout::compute("now singing this", "coming up", &style);

        let next = layout.next.expect("next tier present");
        let expected_top = layout.main.top + layout.main.height() + 0.05 * 720.0;
        assert_eq!(next.top, expected_top);
        assert_eq!(next.font_px, style.next_font_px());
    }

    #[test]
    fn next_tier_is_decorated_with_ellipses() {
        let layout = BlockLayout::compute("main", "soon", &style_720p());
        let next = layout.next.unwrap();
        let joined = next.lines.join(" ");
        assert!(joined.starts_with('…'), "got {joined:?}");
        assert!(joined.ends_with('…'), "got {joined:?}");
        assert!(joined.contains("soon"));
    }

    #[test]
    fn empty_next_text_renders_no_tier() {
        let layout = BlockLayout::compute("main", "", &style_720p());
        assert!(layout.next.is_none());
    }

    #[test]
    fn more_main_lines_push_the_block_higher() {
        let style = style_720p();
        let one = BlockLayout::compute("short", "", &style);
        let many = BlockLayout::compute(
            "a very long lyric line that will certainly wrap into several rows",
            "",
            &style,
        );
        assert!(many.main.lines.len() > one.main.lines.len());
        assert!(many.main.top < one.main.top);
    }
}
