//! Frame rendering: layout + shaping + rasterization
//!
//! [`FrameRenderer::render`] turns tier texts into one canvas-sized RGBA
//! frame: transparent background, each wrapped line shaped, centered
//! against its own measured width, stroked for legibility over arbitrary
//! backgrounds, then filled. The renderer holds only immutable state (style
//! and a resolved face), so rendering is a pure function of its inputs and
//! safe to call from many threads at once.

use crate::error::RenderError;
use crate::font::{FaceCoverage, FontLibrary, LoadedFace};
use crate::frame::Frame;
use crate::layout::{BlockLayout, TierLayout};
use crate::shaping::shape_line;
use crate::style::{RenderStyle, Rgba};
use kara_core::BasicCoverage;
use std::sync::Arc;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Pixmap, Stroke, Transform};

/// Rasterizes two-tier lyric text into transparent overlay frames.
pub struct FrameRenderer {
    style: RenderStyle,
    face: Arc<LoadedFace>,
}

impl FrameRenderer {
    /// Bind a style to a resolved font face.
    ///
    /// Font resolution happens here, once, before any rendering: a missing
    /// family degrades to the library's fallback chain, and only an empty
    /// font database fails.
    pub fn new(style: RenderStyle, fonts: &mut FontLibrary) -> Result<Self, RenderError> {
        style.validate()?;
        let face = fonts.resolve(&style.font_family)?;
        Ok(Self { style, face })
    }

    /// The style this renderer was built with
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Sanitize text against the active face's real glyph coverage.
    ///
    /// Falls back to conservative coverage if the face fails to re-parse;
    /// either way the result is a plain string, never an error.
    pub fn sanitize(&self, text: &str) -> String {
        match self.face.as_metrics() {
            Ok(parsed) => kara_core::sanitize(text, &FaceCoverage::new(parsed)),
            Err(_) => kara_core::sanitize(text, &BasicCoverage),
        }
    }

    /// Render sanitized tier texts into a frame.
    ///
    /// `main_text` and `next_text` are used as given; callers that accept
    /// raw input should pass it through [`FrameRenderer::sanitize`] first.
    /// An empty `next_text` renders no next tier; an empty `main_text`
    /// with an empty `next_text` yields a fully transparent frame.
    pub fn render(&self, main_text: &str, next_text: &str) -> Result<Frame, RenderError> {
        let style = &self.style;
        let mut pixmap = Pixmap::new(style.canvas_width, style.canvas_height)
            .ok_or(RenderError::InvalidPixmap)?;

        let layout = BlockLayout::compute(main_text, next_text, style);
        self.draw_tier(&mut pixmap, &layout.main, style.main_color, style.main_stroke_width)?;
        if let Some(next_tier) = &layout.next {
            self.draw_tier(&mut pixmap, next_tier, style.next_color, style.next_stroke_width)?;
        }

        Ok(frame_from_pixmap(&pixmap))
    }

    fn draw_tier(
        &self,
        pixmap: &mut Pixmap,
        tier: &TierLayout,
        fill_color: Rgba,
        stroke_width: f32,
    ) -> Result<(), RenderError> {
        let canvas_w = self.style.canvas_width as f32;

        let mut fill = Paint::default();
        fill.set_color_rgba8(fill_color[0], fill_color[1], fill_color[2], fill_color[3]);
        fill.anti_alias = true;

        let sc = self.style.stroke_color;
        let mut outline = Paint::default();
        outline.set_color_rgba8(sc[0], sc[1], sc[2], sc[3]);
        outline.anti_alias = true;

        let stroke = Stroke {
            width: stroke_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        for (row, line) in tier.lines.iter().enumerate() {
            let shaped = shape_line(&self.face, line, tier.font_px)?;

            // Each line centers against its own measured width.
            let x = (canvas_w - shaped.width) / 2.0;
            let baseline = tier.top + row as f32 * tier.advance + shaped.ascent;
            let transform = Transform::from_translate(x, baseline);

            // Outline first so the fill sits cleanly on top of it.
            if stroke_width > 0.0 {
                for path in &shaped.paths {
                    pixmap.stroke_path(path, &outline, &stroke, transform, None);
                }
            }
            for path in &shaped.paths {
                pixmap.fill_path(path, &fill, FillRule::Winding, transform, None);
            }
        }
        Ok(())
    }
}

/// Copy a pixmap out as straight-alpha RGBA8.
///
/// tiny-skia keeps premultiplied pixels internally; PNG emission and the
/// encoder expect straight alpha.
fn frame_from_pixmap(pixmap: &Pixmap) -> Frame {
    let mut buffer = Vec::with_capacity((pixmap.width() * pixmap.height() * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        buffer.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Frame::from_rgba(buffer, pixmap.width(), pixmap.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer_720p() -> Option<FrameRenderer> {
        let mut fonts = FontLibrary::new();
        let style = RenderStyle::default().with_canvas(1280, 720);
        match FrameRenderer::new(style, &mut fonts) {
            Ok(r) => Some(r),
            Err(RenderError::FontError(_)) => {
                eprintln!("no system fonts installed; skipping raster test");
                None
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn renders_visible_glyphs_on_transparent_canvas() {
        let Some(renderer) = renderer_720p() else { return };
        let frame = renderer.render("Hello", "World").unwrap();
        assert_eq!(frame.width(), 1280);
        assert_eq!(frame.height(), 720);
        assert!(frame.visible_pixels() > 0);
        // Most of the canvas stays transparent.
        assert!(frame.visible_pixels() < (1280 * 720) / 4);
    }

    #[test]
    fn empty_texts_render_a_blank_frame() {
        let Some(renderer) = renderer_720p() else { return };
        let frame = renderer.render("", "").unwrap();
        assert!(frame.is_blank());
    }

    #[test]
    fn rendering_is_deterministic() {
        let Some(renderer) = renderer_720p() else { return };
        let a = renderer.render("same input", "same next").unwrap();
        let b = renderer.render("same input", "same next").unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn next_tier_adds_pixels() {
        let Some(renderer) = renderer_720p() else { return };
        let without = renderer.render("Hello", "").unwrap();
        let with = renderer.render("Hello", "World").unwrap();
        assert!(with.visible_pixels() > without.visible_pixels());
    }

    #[test]
    fn sanitize_strips_what_the_face_cannot_draw() {
        let Some(renderer) = renderer_720p() else { return };
        // Control characters never survive, whatever the font covers.
        assert_eq!(renderer.sanitize("a\u{0}b"), "ab");
        assert_eq!(renderer.sanitize("   "), "");
    }

    #[test]
    fn parallel_renders_agree() {
        let Some(renderer) = renderer_720p() else { return };
        let reference = renderer.render("thread safety", "checked").unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| renderer.render("thread safety", "checked").unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().data(), reference.data());
            }
        });
    }
}
