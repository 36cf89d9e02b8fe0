//! Encoding boundary
//!
//! The engine assembles timelines; it does not encode. [`Encoder`] is the
//! seam, and [`FfmpegEncoder`] is the shipped implementation: overlay
//! frames go to a temporary directory as PNGs, one `ffmpeg` invocation
//! applies the background's loop/trim/scale plan and the time-gated
//! overlay stack, and the finished file is renamed into the requested
//! location only after ffmpeg exits cleanly, so a failed encode leaves no
//! partial file at the final path.

use crate::background::BackgroundPlayback;
use crate::compose::Timeline;
use crate::error::TimelineError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Muxes a timeline and an audio track into a media file.
pub trait Encoder {
    /// Encode `timeline` with `audio` into `output`
    fn encode(&self, timeline: &Timeline, audio: &Path, output: &Path)
        -> Result<(), TimelineError>;
}

/// Shells out to `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    command: PathBuf,
    preset: String,
    crf: u8,
    frame_rate: u32,
}

impl FfmpegEncoder {
    /// Use a specific ffmpeg binary
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Build the full argument list for one encode run.
    ///
    /// Inputs are ordered background, audio, then one looping still input
    /// per overlay PNG. The background's embedded audio is stripped by
    /// construction: only the filtered video and input 1 (the session's
    /// audio track) are mapped out.
    fn build_args(
        &self,
        timeline: &Timeline,
        audio: &Path,
        overlays: &[PathBuf],
        partial_output: &Path,
    ) -> Vec<String> {
        let bg = &timeline.background;
        let mut args: Vec<String> = Vec::new();

        match bg.playback {
            BackgroundPlayback::Still => {
                args.extend(["-loop".into(), "1".into()]);
            }
            BackgroundPlayback::Loop { plays } => {
                // -stream_loop N replays the input N extra times.
                args.extend(["-stream_loop".into(), plays.saturating_sub(1).to_string()]);
            }
            BackgroundPlayback::Trim => {}
        }
        args.extend(["-i".into(), bg.source.path().to_string_lossy().into_owned()]);
        args.extend(["-i".into(), audio.to_string_lossy().into_owned()]);
        for overlay in overlays {
            args.extend([
                "-loop".into(),
                "1".into(),
                "-i".into(),
                overlay.to_string_lossy().into_owned(),
            ]);
        }

        // Background chain: aspect resize, then the even-width crop, in
        // that order.
        let mut filter = format!("[0:v]scale={}:{}", bg.scaled_width, bg.height);
        if bg.needs_crop() {
            filter.push_str(&format!(",crop={}:{}:0:0", bg.width, bg.height));
        }
        filter.push_str(&format!(",setsar=1,fps={}[bg]", self.frame_rate));

        let mut prev = "bg".to_owned();
        for (i, clip) in timeline.clips.iter().enumerate() {
            let label = format!("v{i}");
            filter.push_str(&format!(
                ";[{prev}][{input}:v]overlay=0:0:enable='between(t,{start:.3},{end:.3})'[{label}]",
                input = i + 2,
                start = clip.start,
                end = clip.end,
            ));
            prev = label;
        }

        args.extend(["-filter_complex".into(), filter]);
        args.extend(["-map".into(), format!("[{prev}]"), "-map".into(), "1:a".into()]);
        args.extend([
            "-c:v".into(),
            "libx264".into(),
            "-preset".into(),
            self.preset.clone(),
            "-crf".into(),
            self.crf.to_string(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-r".into(),
            self.frame_rate.to_string(),
            "-c:a".into(),
            "aac".into(),
            "-t".into(),
            format!("{:.3}", timeline.duration),
            "-y".into(),
            partial_output.to_string_lossy().into_owned(),
        ]);
        args
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self {
            command: PathBuf::from("ffmpeg"),
            preset: "medium".to_owned(),
            crf: 20,
            frame_rate: 30,
        }
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(
        &self,
        timeline: &Timeline,
        audio: &Path,
        output: &Path,
    ) -> Result<(), TimelineError> {
        let workdir = tempfile::tempdir()?;

        let mut overlays = Vec::with_capacity(timeline.clips.len());
        for (i, clip) in timeline.clips.iter().enumerate() {
            let path = workdir.path().join(format!("overlay_{i:04}.png"));
            let frame = &clip.frame;
            let img = image::RgbaImage::from_raw(
                frame.width(),
                frame.height(),
                frame.data().to_vec(),
            )
            .ok_or_else(|| TimelineError::Encode {
                stage: "overlay-write",
                detail: format!("overlay {i} buffer does not match its dimensions"),
            })?;
            img.save(&path).map_err(|e| TimelineError::Encode {
                stage: "overlay-write",
                detail: format!("failed to write {}: {e}", path.display()),
            })?;
            overlays.push(path);
        }

        // Encode next to the final path, renaming only on success, so a
        // failed run cannot leave a partial file where the output belongs.
        let partial = partial_path(output);
        let args = self.build_args(timeline, audio, &overlays, &partial);

        tracing::info!(
            clips = timeline.clips.len(),
            output = %output.display(),
            "running ffmpeg"
        );
        tracing::debug!(?args, "ffmpeg arguments");

        let result = Command::new(&self.command)
            .args(&args)
            .output()
            .map_err(|e| TimelineError::Encode {
                stage: "ffmpeg-spawn",
                detail: format!("failed to run {}: {e}", self.command.display()),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let _ = std::fs::remove_file(&partial);
            return Err(TimelineError::Encode {
                stage: "ffmpeg",
                detail: format!("exit {}: {}", result.status, tail(&stderr, 800)),
            });
        }

        std::fs::rename(&partial, output)?;
        Ok(())
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    output.with_file_name(format!(".{name}.partial"))
}

/// Last `max` bytes of `text`, on a char boundary
fn tail(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
