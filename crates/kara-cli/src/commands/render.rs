//! The full batch pipeline: table → normalize → compose → encode

use anyhow::{Context, Result};
use clap::Args;
use kara_render::FontLibrary;
use kara_timeline::{
    compose, normalize_background, BackgroundDescriptor, Encoder, FfmpegEncoder, FfprobeProbe,
    MediaProbe, RenderSession,
};
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    /// Audio track; its duration fixes the timeline length
    #[arg(long)]
    audio: PathBuf,

    /// Line table, .srt or .json
    #[arg(long)]
    lines: PathBuf,

    /// Background image or video
    #[arg(long)]
    background: PathBuf,

    /// Output video file
    #[arg(long, short)]
    output: PathBuf,

    /// JSON style file; omitted fields keep their defaults
    #[arg(long)]
    style: Option<PathBuf>,

    /// Additional font file to load before resolving the style's family
    #[arg(long)]
    font: Option<PathBuf>,

    /// Reject the whole line table on the first invalid row
    #[arg(long)]
    strict: bool,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let style = super::load_style(args.style.as_deref())?;
    let segments = super::load_segments(&args.lines, args.strict)?;

    let probe = FfprobeProbe::default();
    let duration = probe
        .probe(&args.audio)
        .with_context(|| format!("failed to probe audio {}", args.audio.display()))?
        .duration
        .context("audio track reports no duration")?;

    // Normalization runs to completion before composition: its dimensions
    // are the canvas every frame is laid out against.
    let descriptor = BackgroundDescriptor::from_path(&args.background);
    let background = normalize_background(descriptor.clone(), duration, &probe)?;

    let mut fonts = FontLibrary::new();
    if let Some(font) = &args.font {
        fonts.load_font_file(font)?;
    }

    let session = RenderSession::new(segments, style, descriptor, &args.audio);
    let timeline = compose(&session, &mut fonts, background)?;
    tracing::info!(clips = timeline.clip_count(), "timeline assembled");

    FfmpegEncoder::default().encode(&timeline, &args.audio, &args.output)?;
    println!("wrote {}", args.output.display());
    Ok(())
}
