//! Subcommand implementations and shared helpers

pub mod frame;
pub mod lines;
pub mod live;
pub mod render;

use anyhow::{Context, Result};
use kara_core::{SegmentList, Strictness};
use kara_render::RenderStyle;
use std::path::Path;

/// Load a style from a JSON file, or the defaults when none is given.
/// Partial files work: absent fields keep their default values.
pub fn load_style(path: Option<&Path>) -> Result<RenderStyle> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read style file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse style file {}", path.display()))
        }
        None => Ok(RenderStyle::default()),
    }
}

/// Load and normalize a line table from disk.
pub fn load_segments(path: &Path, strict: bool) -> Result<SegmentList> {
    let rows = kara_io::load_table(path)
        .with_context(|| format!("failed to load line table {}", path.display()))?;
    let strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    SegmentList::normalize(rows, strictness).context("line table failed validation")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_style_file_is_an_error() {
        assert!(load_style(Some(Path::new("/no/such/style.json"))).is_err());
    }

    #[test]
    fn absent_style_gives_defaults() {
        let style = load_style(None).unwrap();
        assert_eq!(style, RenderStyle::default());
    }

    #[test]
    fn strict_table_load_rejects_inverted_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"start": 5.0, "end": 3.0, "text": "inverted"}]"#).unwrap();
        assert!(load_segments(&path, true).is_err());
        assert_eq!(load_segments(&path, false).unwrap().len(), 0);
    }
}
