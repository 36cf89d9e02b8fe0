//! # kara-core
//!
//! Core data model and timing logic for timed lyric display: time-coded
//! segments, list normalization, glyph-aware text sanitization, and the live
//! playback-position resolver.
//!
//! This crate is deliberately free of rendering and I/O dependencies. The
//! rasterization stack lives in `kara-render`, line-table file formats in
//! `kara-io`, and batch compositing in `kara-timeline`.
//!
//! ## Quick Start
//!
//! ```rust
//! use kara_core::{LyricTracker, RawSegment, SegmentList, Strictness};
//!
//! let rows = vec![
//!     RawSegment::new(0.0, 2.0, "Hello"),
//!     RawSegment::new(2.0, 4.0, "World"),
//! ];
//! let segments = SegmentList::normalize(rows, Strictness::Lenient)?;
//!
//! let mut tracker = LyricTracker::new();
//! let display = tracker.resolve(500, &segments);
//! assert_eq!(display.main, "Hello");
//! assert_eq!(display.next, "World");
//! assert!(display.changed);
//! # Ok::<(), kara_core::CoreError>(())
//! ```

#![deny(clippy::all)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod resolver;
pub mod sanitize;
pub mod segment;
pub mod transcribe;

pub use errors::CoreError;
pub use resolver::{LiveDisplay, LyricTracker};
pub use sanitize::{sanitize, BasicCoverage, GlyphCoverage};
pub use segment::{RawSegment, Segment, SegmentList, Strictness};
pub use transcribe::{TranscribeError, Transcriber};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
