//! `kara`: render timed lyric overlays from the command line
//!
//! Four thin wrappers over the library crates: `render` runs the full batch
//! pipeline to a video file, `live` drives the position resolver from
//! stdin ticks, `lines` normalizes/converts a line table, and `frame`
//! previews one overlay frame as a PNG.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kara", version, about = "Timed lyric synchronization and overlay compositing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Composite lyrics over a background and encode a video
    Render(commands::render::RenderArgs),
    /// Resolve playback positions from stdin into display lines
    Live(commands::live::LiveArgs),
    /// Normalize a line table, converting between SRT and JSON by extension
    Lines(commands::lines::LinesArgs),
    /// Render a single overlay frame to a PNG for style preview
    Frame(commands::frame::FrameArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Live(args) => commands::live::run(args),
        Commands::Lines(args) => commands::lines::run(args),
        Commands::Frame(args) => commands::frame::run(args),
    }
}
