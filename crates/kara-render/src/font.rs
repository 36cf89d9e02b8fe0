//! Font discovery, face loading, and glyph coverage
//!
//! All font resolution happens here, up front: a [`FontLibrary`] owns the
//! `fontdb` database and hands out reference-counted [`LoadedFace`] values
//! that the renderer can use from any thread. Resolution is
//! capability-checked: a miss on the requested family degrades through a
//! fallback chain (sans-serif, then serif, then monospace) and only a
//! completely empty database is an error, so a missing display font never
//! stops the pipeline.

use crate::error::RenderError;
use ahash::AHashMap;
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use kara_core::GlyphCoverage;
use std::sync::Arc;

/// A font face resolved to its raw bytes, shareable across threads.
///
/// `ttf-parser` and `rustybuzz` faces borrow the underlying bytes, so they
/// are re-created per use instead of being stored; parsing a face header is
/// cheap next to shaping and rasterization.
#[derive(Clone)]
pub struct LoadedFace {
    data: Arc<dyn AsRef<[u8]> + Send + Sync>,
    index: u32,
}

impl LoadedFace {
    /// Parse the face for metrics and glyph outlines
    pub fn as_metrics(&self) -> Result<ttf_parser::Face<'_>, RenderError> {
        ttf_parser::Face::parse(self.data.as_ref().as_ref(), self.index)
            .map_err(|e| RenderError::FontError(format!("failed to parse font face: {e}")))
    }

    /// Parse the face for shaping
    pub fn as_shaper(&self) -> Result<rustybuzz::Face<'_>, RenderError> {
        rustybuzz::Face::from_slice(self.data.as_ref().as_ref(), self.index)
            .ok_or_else(|| RenderError::FontError("failed to create shaping face".to_owned()))
    }
}

impl std::fmt::Debug for LoadedFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFace")
            .field("index", &self.index)
            .field("bytes", &self.data.as_ref().as_ref().len())
            .finish()
    }
}

/// Owns the font database and caches resolved faces by family name.
///
/// Build and resolve before any parallel rendering begins; afterwards the
/// shared [`LoadedFace`] values are read-only.
pub struct FontLibrary {
    database: Database,
    resolved: AHashMap<String, Arc<LoadedFace>>,
}

impl FontLibrary {
    /// Create a library backed by the system's installed fonts
    pub fn new() -> Self {
        let mut database = Database::new();
        database.load_system_fonts();
        Self {
            database,
            resolved: AHashMap::new(),
        }
    }

    /// Create a library with no fonts loaded; useful for tests
    pub fn empty() -> Self {
        Self {
            database: Database::new(),
            resolved: AHashMap::new(),
        }
    }

    /// Create a library over a prepared database
    pub fn with_database(database: Database) -> Self {
        Self {
            database,
            resolved: AHashMap::new(),
        }
    }

    /// Load an additional font file, e.g. one supplied on the command line
    pub fn load_font_file(&mut self, path: &std::path::Path) -> Result<(), RenderError> {
        self.database
            .load_font_file(path)
            .map_err(|e| RenderError::FontError(format!("failed to load {}: {e}", path.display())))
    }

    /// Resolve a family to a loaded face, falling back through generic
    /// families when the request misses.
    ///
    /// Returns [`RenderError::FontError`] only when the database holds no
    /// usable face at all.
    pub fn resolve(&mut self, family: &str) -> Result<Arc<LoadedFace>, RenderError> {
        if let Some(face) = self.resolved.get(family) {
            return Ok(Arc::clone(face));
        }

        let fallbacks: [&[Family]; 3] = [
            &[Family::Name(family), Family::SansSerif],
            &[Family::Serif],
            &[Family::Monospace],
        ];
        let id = fallbacks
            .iter()
            .copied()
            .find_map(|families| {
                self.database.query(&Query {
                    families,
                    weight: Weight::NORMAL,
                    stretch: Stretch::Normal,
                    style: Style::Normal,
                })
            })
            .ok_or_else(|| RenderError::FontError("no usable font face loaded".to_owned()))?;

        let (source, index) = self
            .database
            .face_source(id)
            .ok_or_else(|| RenderError::FontError("failed to load font data".to_owned()))?;

        let data: Arc<dyn AsRef<[u8]> + Send + Sync> = match source {
            Source::Binary(data) => data,
            Source::File(path) => Arc::new(std::fs::read(&path).map_err(|e| {
                RenderError::FontError(format!("failed to read font file {}: {e}", path.display()))
            })?),
            Source::SharedFile(_, data) => data,
        };

        let face = Arc::new(LoadedFace { data, index });
        self.resolved.insert(family.to_owned(), Arc::clone(&face));
        Ok(face)
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Glyph coverage answered from a real font's character map.
pub struct FaceCoverage<'a> {
    face: ttf_parser::Face<'a>,
}

impl<'a> FaceCoverage<'a> {
    /// Wrap a parsed face
    pub fn new(face: ttf_parser::Face<'a>) -> Self {
        Self { face }
    }
}

impl GlyphCoverage for FaceCoverage<'_> {
    fn supports(&self, ch: char) -> bool {
        self.face.glyph_index(ch).is_some()
    }
}
