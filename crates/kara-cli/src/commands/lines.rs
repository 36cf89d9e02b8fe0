//! Line-table normalization and format conversion

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct LinesArgs {
    /// Input table, .srt or .json
    #[arg(long)]
    input: PathBuf,

    /// Output table; the extension picks the format
    #[arg(long, short)]
    output: PathBuf,

    /// Reject the whole table on the first invalid row
    #[arg(long)]
    strict: bool,
}

pub fn run(args: LinesArgs) -> Result<()> {
    let segments = super::load_segments(&args.input, args.strict)?;
    kara_io::save_table(&args.output, segments.as_slice())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("wrote {} lines to {}", segments.len(), args.output.display());
    Ok(())
}
