//! Single-frame preview: render one segment's overlay to a PNG

use anyhow::{bail, Context, Result};
use clap::Args;
use kara_render::{FontLibrary, FrameRenderer};
use kara_timeline::next_display_text;
use std::path::PathBuf;

#[derive(Args)]
pub struct FrameArgs {
    /// Line table, .srt or .json
    #[arg(long)]
    lines: PathBuf,

    /// Zero-based index of the segment to preview
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output PNG path
    #[arg(long, short)]
    output: PathBuf,

    /// JSON style file; omitted fields keep their defaults
    #[arg(long)]
    style: Option<PathBuf>,

    /// Canvas size override, e.g. 1280x720
    #[arg(long)]
    size: Option<String>,

    /// Additional font file to load before resolving the style's family
    #[arg(long)]
    font: Option<PathBuf>,
}

pub fn run(args: FrameArgs) -> Result<()> {
    let mut style = super::load_style(args.style.as_deref())?;
    if let Some(size) = &args.size {
        let (width, height) = parse_size(size)?;
        style = style.with_canvas(width, height);
    }

    let segments = super::load_segments(&args.lines, false)?;
    let segment = segments
        .get(args.index)
        .with_context(|| format!("no segment at index {} ({} lines)", args.index, segments.len()))?;

    let mut fonts = FontLibrary::new();
    if let Some(font) = &args.font {
        fonts.load_font_file(font)?;
    }
    let renderer = FrameRenderer::new(style, &mut fonts)?;

    let main = renderer.sanitize(&segment.text);
    if main.is_empty() {
        bail!("segment {} sanitizes to an empty line; nothing to render", args.index);
    }
    let next = next_display_text(&segments, args.index, |t| renderer.sanitize(t));

    let frame = renderer.render(&main, &next)?;
    let img = image::RgbaImage::from_raw(frame.width(), frame.height(), frame.into_buffer())
        .context("frame buffer does not match its dimensions")?;
    img.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("wrote {}", args.output.display());
    Ok(())
}

fn parse_size(text: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = text.split_once(['x', 'X']) else {
        bail!("size must look like 1280x720, got '{text}'");
    };
    Ok((
        w.trim().parse().with_context(|| format!("bad width in '{text}'"))?,
        h.trim().parse().with_context(|| format!("bad height in '{text}'"))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_pairs() {
        assert_eq!(parse_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_size("1920X1080").unwrap(), (1920, 1080));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("axb").is_err());
    }
}
