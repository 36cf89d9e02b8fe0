//! Glyph shaping and outline extraction
//!
//! One visual line goes through `rustybuzz` for shaping, then each glyph's
//! outline is pulled from the font via `ttf-parser` into a `tiny-skia` path
//! positioned along the pen advance. Paths come back in baseline
//! coordinates (baseline at y = 0, canvas y growing downward); the renderer
//! translates them to their final spot, which is also how the measured
//! width feeds per-line centering.

use crate::error::RenderError;
use crate::font::LoadedFace;
use rustybuzz::UnicodeBuffer;
use tiny_skia::{Path, PathBuilder};
use ttf_parser::{GlyphId, OutlineBuilder};

/// A shaped visual line, ready to place and rasterize.
#[derive(Debug, Clone)]
pub struct ShapedLine {
    /// One positioned outline path per glyph that has one; whitespace
    /// glyphs advance the pen but contribute no path
    pub paths: Vec<Path>,
    /// Total advance width, pixels
    pub width: f32,
    /// Scaled font ascent, pixels above the baseline
    pub ascent: f32,
    /// Scaled font descent, pixels (negative, below the baseline)
    pub descent: f32,
}

/// Shape `text` at `font_px` pixels using `face`.
pub fn shape_line(face: &LoadedFace, text: &str, font_px: f32) -> Result<ShapedLine, RenderError> {
    let shaper = face.as_shaper()?;
    let metrics = face.as_metrics()?;

    let units_per_em = f32::from(metrics.units_per_em());
    if units_per_em <= 0.0 {
        return Err(RenderError::ShapingError(
            "font reports zero units per em".to_owned(),
        ));
    }
    let scale = font_px / units_per_em;

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    let output = rustybuzz::shape(&shaper, &[], buffer);

    let mut paths = Vec::with_capacity(output.len());
    let mut cursor_x = 0.0f32;

    for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
        let origin_x = cursor_x + pos.x_offset as f32 * scale;
        let origin_y = -(pos.y_offset as f32) * scale;

        let mut pen = OutlinePen::new(origin_x, origin_y, scale);
        let glyph = GlyphId(info.glyph_id as u16);
        if metrics.outline_glyph(glyph, &mut pen).is_some() {
            if let Some(path) = pen.finish() {
                paths.push(path);
            }
        }

        cursor_x += pos.x_advance as f32 * scale;
    }

    Ok(ShapedLine {
        paths,
        width: cursor_x,
        ascent: f32::from(metrics.ascender()) * scale,
        descent: f32::from(metrics.descender()) * scale,
    })
}

/// Writes font-unit outlines into a path builder, scaling to pixels and
/// flipping the y axis (fonts are y-up, the canvas is y-down).
struct OutlinePen {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl OutlinePen {
    fn new(origin_x: f32, origin_y: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            origin_y,
            scale,
        }
    }

    fn x(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        self.origin_y - y * self.scale
    }

    fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for OutlinePen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.x(x), self.y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.x(x), self.y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder
            .quad_to(self.x(x1), self.y(y1), self.x(x), self.y(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.x(x1),
            self.y(y1),
            self.x(x2),
            self.y(y2),
            self.x(x),
            self.y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontLibrary;

    fn any_face() -> Option<std::sync::Arc<LoadedFace>> {
        let mut library = FontLibrary::new();
        match library.resolve("sans-serif") {
            Ok(face) => Some(face),
            Err(_) => {
                eprintln!("no system fonts installed; skipping shaping test");
                None
            }
        }
    }

    #[test]
    fn shaped_text_has_width_and_paths() {
        let Some(face) = any_face() else { return };
        let shaped = shape_line(&face, "Hello", 48.0).unwrap();
        assert!(shaped.width > 0.0);
        assert!(!shaped.paths.is_empty());
        assert!(shaped.ascent > 0.0);
        assert!(shaped.descent < 0.0);
    }

    #[test]
    fn empty_text_shapes_to_nothing() {
        let Some(face) = any_face() else { return };
        let shaped = shape_line(&face, "", 48.0).unwrap();
        assert_eq!(shaped.width, 0.0);
        assert!(shaped.paths.is_empty());
    }

    #[test]
    fn longer_text_is_wider() {
        let Some(face) = any_face() else { return };
        let short = shape_line(&face, "hi", 48.0).unwrap();
        let long = shape_line(&face, "hi there friend", 48.0).unwrap();
        assert!(long.width > short.width);
    }

    #[test]
    fn width_scales_with_font_size() {
        let Some(face) = any_face() else { return };
        let small = shape_line(&face, "scale", 24.0).unwrap();
        let large = shape_line(&face, "scale", 48.0).unwrap();
        assert!((large.width - 2.0 * small.width).abs() < 0.01 * large.width);
    }
}
