//! Live mode driver: playback-position ticks in, display lines out
//!
//! Reads one elapsed-time value in milliseconds per stdin line (the shape
//! of a player's position-changed event stream) and prints the resolved
//! display block whenever its content actually changes. Gaps hold the
//! previous line; blank and unparsable input lines are skipped.

use anyhow::Result;
use clap::Args;
use kara_core::LyricTracker;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Args)]
pub struct LiveArgs {
    /// Line table, .srt or .json
    #[arg(long)]
    lines: PathBuf,

    /// Reject the whole line table on the first invalid row
    #[arg(long)]
    strict: bool,
}

pub fn run(args: LiveArgs) -> Result<()> {
    let segments = super::load_segments(&args.lines, args.strict)?;
    let mut tracker = LyricTracker::new();

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let tick = line.trim();
        if tick.is_empty() {
            continue;
        }
        let Ok(position_ms) = tick.parse::<u64>() else {
            tracing::warn!(input = tick, "ignoring unparsable position tick");
            continue;
        };

        let display = tracker.resolve(position_ms, &segments);
        if display.changed {
            println!("{}", display.main);
            if !display.next.is_empty() {
                println!("    … {} …", display.next);
            }
        }
    }
    Ok(())
}
