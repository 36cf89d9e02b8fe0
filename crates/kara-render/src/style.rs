//! Render style configuration
//!
//! [`RenderStyle`] is a pure value: constructed once (defaults, a JSON
//! config file, or builder methods), never mutated by the pipeline. Font
//! heights are fractions of canvas *height*, not width, so text keeps its
//! proportion when the canvas aspect ratio changes.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel
pub type Rgba = [u8; 4];

/// Styling and geometry for the two-tier lyric display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Main tier font height as a fraction of canvas height
    pub main_font_height_ratio: f32,
    /// Next tier font height as a fraction of canvas height
    pub next_font_height_ratio: f32,
    /// Wrap budget for the main tier, characters per visual line
    pub main_wrap_chars: usize,
    /// Wrap budget for the next tier, characters per visual line
    pub next_wrap_chars: usize,
    /// Fill color of the main tier
    pub main_color: Rgba,
    /// Fill color of the next tier
    pub next_color: Rgba,
    /// Outline color shared by both tiers
    pub stroke_color: Rgba,
    /// Outline width of the main tier, pixels
    pub main_stroke_width: f32,
    /// Outline width of the next tier, pixels
    pub next_stroke_width: f32,
    /// Preferred font family; a fallback face is used when unavailable
    pub font_family: String,
    /// Seconds a clip appears before its line starts (clamped at 0:00)
    pub lead_in: f64,
    /// Seconds a clip lingers after its line ends
    pub lead_out: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            canvas_width: 1920,
            canvas_height: 1080,
            main_font_height_ratio: 0.065,
            next_font_height_ratio: 0.042,
            main_wrap_chars: 30,
            next_wrap_chars: 40,
            main_color: [0xD4, 0xAF, 0x37, 0xFF], // gold
            next_color: [0xFF, 0xFF, 0xFF, 0xFF],
            stroke_color: [0x00, 0x00, 0x00, 0xFF],
            main_stroke_width: 3.0,
            next_stroke_width: 2.0,
            font_family: "Impact".to_owned(),
            lead_in: 0.0,
            lead_out: 0.0,
        }
    }
}

impl RenderStyle {
    /// Main tier font height in pixels for this canvas
    pub fn main_font_px(&self) -> f32 {
        self.main_font_height_ratio * self.canvas_height as f32
    }

    /// Next tier font height in pixels for this canvas
    pub fn next_font_px(&self) -> f32 {
        self.next_font_height_ratio * self.canvas_height as f32
    }

    /// Same style retargeted at a different canvas.
    ///
    /// Batch rendering retargets the style at the normalized background's
    /// dimensions, since the background fixes the final canvas.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Reject unusable canvas or wrap configurations
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(RenderError::InvalidDimensions);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_height_tracks_canvas_height_not_width() {
        let tall = RenderStyle::default().with_canvas(400, 1000);
        let wide = RenderStyle::default().with_canvas(4000, 1000);
        assert_eq!(tall.main_font_px(), wide.main_font_px());

        let short = RenderStyle::default().with_canvas(400, 500);
        assert!(short.main_font_px() < tall.main_font_px());
    }

    #[test]
    fn zero_canvas_is_rejected() {
        assert!(RenderStyle::default().with_canvas(0, 720).validate().is_err());
        assert!(RenderStyle::default().with_canvas(1280, 720).validate().is_ok());
    }

    #[test]
    fn style_loads_from_partial_json() {
        let style: RenderStyle =
            serde_json::from_str(r#"{"canvas_width": 1280, "canvas_height": 720}"#).unwrap();
        assert_eq!(style.canvas_width, 1280);
        // Untouched fields keep their defaults.
        assert_eq!(style.font_family, "Impact");
    }
}
