//! # kara-render
//!
//! Text layout and software rasterization for lyric overlays: greedy word
//! wrap under a character budget, two-tier (current + upcoming) vertical
//! placement, and glyph rendering into transparent RGBA frames via the
//! `fontdb` + `rustybuzz` + `ttf-parser` + `tiny-skia` stack.
//!
//! [`FrameRenderer::render`] is a pure function of its inputs, with no I/O
//! and no shared mutable state, which is what allows the batch compositor to
//! fan frame rendering out across threads. All font resolution happens
//! up front in [`FontLibrary`], before any parallel phase begins.

#![deny(clippy::all)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod font;
pub mod frame;
pub mod layout;
pub mod renderer;
pub mod shaping;
pub mod style;

pub use error::RenderError;
pub use font::{FaceCoverage, FontLibrary, LoadedFace};
pub use frame::Frame;
pub use layout::{wrap_line, BlockLayout, TierLayout};
pub use renderer::FrameRenderer;
pub use style::{Rgba, RenderStyle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
