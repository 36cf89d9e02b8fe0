//! Glyph-aware text sanitization
//!
//! Transcription output and user edits routinely contain characters the
//! active font cannot draw: decorative musical symbols, pictographs, stray
//! control characters. The sanitizer drops what cannot be rendered and
//! repairs the whitespace damage, so the rendering path always receives
//! *some* string. An empty result is a meaningful signal ("do not render
//! this line"), never an error.

/// Answers whether the active glyph set can draw a character.
///
/// The renderer implements this against the real font tables; where no font
/// is loaded, [`BasicCoverage`] gives a conservative default.
pub trait GlyphCoverage {
    /// Whether `ch` has a drawable glyph
    fn supports(&self, ch: char) -> bool;
}

/// Conservative coverage for when no font has been consulted: accepts text
/// and punctuation, rejects the decorative blocks display fonts rarely carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCoverage;

/// Codepoint ranges dropped by [`BasicCoverage`]: arrows through dingbats,
/// musical notation, pictographs, private use, variation selectors.
const UNSUPPORTED_BLOCKS: &[(u32, u32)] = &[
    (0x2190, 0x2BFF),
    (0xE000, 0xF8FF),
    (0xFE00, 0xFE0F),
    (0x1D100, 0x1D1FF),
    (0x1F000, 0x1FAFF),
];

impl GlyphCoverage for BasicCoverage {
    fn supports(&self, ch: char) -> bool {
        let cp = ch as u32;
        !UNSUPPORTED_BLOCKS
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&cp))
    }
}

/// Strip characters the glyph set cannot draw, collapsing the whitespace
/// runs the removals leave behind.
///
/// Control characters are always dropped; any whitespace becomes a single
/// space. The result is trimmed, so a line that loses every drawable
/// character comes back empty rather than as stray spaces.
pub fn sanitize(text: &str, coverage: &dyn GlyphCoverage) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_control() || !coverage.supports(ch) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize("Hello World", &BasicCoverage), "Hello World");
    }

    #[test]
    fn musical_symbols_are_dropped() {
        assert_eq!(sanitize("♫ En attente ♫", &BasicCoverage), "En attente");
    }

    #[test]
    fn pictographs_are_dropped() {
        assert_eq!(sanitize("fire 🔥 walk", &BasicCoverage), "fire walk");
    }

    #[test]
    fn fully_unsupported_line_becomes_empty() {
        assert_eq!(sanitize("♩♪♫♬", &BasicCoverage), "");
        assert_eq!(sanitize("   ", &BasicCoverage), "");
        assert_eq!(sanitize("", &BasicCoverage), "");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(sanitize("  two \t words \n", &BasicCoverage), "two words");
    }

    #[test]
    fn control_characters_are_always_dropped() {
        assert_eq!(sanitize("a\u{0}b\u{7}c", &BasicCoverage), "abc");
    }

    #[test]
    fn rejecting_coverage_empties_everything() {
        struct Nothing;
        impl GlyphCoverage for Nothing {
            fn supports(&self, _: char) -> bool {
                false
            }
        }
        assert_eq!(sanitize("any text at all", &Nothing), "");
    }

    #[test]
    fn accented_latin_survives() {
        assert_eq!(sanitize("déjà vu", &BasicCoverage), "déjà vu");
    }
}
