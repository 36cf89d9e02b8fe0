//! Background normalization
//!
//! Fits a still image or a video to the canonical canvas before any frame
//! composition: aspect-preserving resize to a 720-class height, then an
//! even-width crop (a hard requirement of the downstream encoder's pixel
//! format, applied *after* the aspect resize), plus a loop-or-trim plan
//! that makes the background cover the audio track's duration. Embedded
//! audio is stripped unconditionally later in the encode stage; the
//! narrated track is authoritative.

use crate::error::TimelineError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Canonical canvas height for batch output
pub const CANONICAL_HEIGHT: u32 = 720;

/// Video container extensions treated as video backgrounds
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

/// What kind of background medium the user supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundDescriptor {
    /// A still image, held for the full render duration
    Image {
        /// Image file path
        path: PathBuf,
    },
    /// A video, looped or trimmed to the render duration
    Video {
        /// Video file path
        path: PathBuf,
    },
}

impl BackgroundDescriptor {
    /// Classify a path by its extension, the way the original pipeline did
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_video = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)))
            .unwrap_or(false);
        if is_video {
            Self::Video { path }
        } else {
            Self::Image { path }
        }
    }

    /// The underlying media path
    pub fn path(&self) -> &Path {
        match self {
            Self::Image { path } | Self::Video { path } => path,
        }
    }

    /// Whether this is a video background
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }
}

/// Dimensions and duration reported by a media probe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MediaInfo {
    /// Pixel width of the first video stream, if any
    pub width: Option<u32>,
    /// Pixel height of the first video stream, if any
    pub height: Option<u32>,
    /// Container duration in seconds, if the format reports one
    pub duration: Option<f64>,
}

/// Inspects media files for dimensions and duration.
pub trait MediaProbe {
    /// Probe a file; unreadable media is a [`TimelineError::BackgroundLoad`]
    fn probe(&self, path: &Path) -> Result<MediaInfo, TimelineError>;
}

/// `ffprobe`-backed probe.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    command: PathBuf,
}

impl FfprobeProbe {
    /// Use a specific ffprobe binary
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::with_command("ffprobe")
    }
}

impl MediaProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<MediaInfo, TimelineError> {
        let load_err = |reason: String| TimelineError::BackgroundLoad {
            path: path.to_path_buf(),
            reason,
        };

        let output = Command::new(&self.command)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1",
            ])
            .arg(path)
            .output()
            .map_err(|e| load_err(format!("failed to run {}: {e}", self.command.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(load_err(format!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut info = MediaInfo::default();
        for line in stdout.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            match key {
                "width" => info.width = value.parse().ok(),
                "height" => info.height = value.parse().ok(),
                "duration" => info.duration = value.parse().ok(),
                _ => {}
            }
        }

        tracing::debug!(path = %path.display(), ?info, "probed media");
        Ok(info)
    }
}

/// How the background covers the render duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundPlayback {
    /// Still image held for the full duration
    Still,
    /// Video played `plays` times end-to-end, then cut at the duration
    Loop {
        /// Total play count needed to cover the target duration
        plays: u32,
    },
    /// Video cut to the first `duration` seconds
    Trim,
}

/// A background fitted to the canonical canvas and render duration.
///
/// The only background representation that survives into composition and
/// encoding; the raw descriptor's quirks (odd widths, wrong duration,
/// embedded audio) are all resolved here.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBackground {
    /// The original medium
    pub source: BackgroundDescriptor,
    /// Aspect-preserving width at the canonical height, before the crop
    pub scaled_width: u32,
    /// Final canvas width; always even
    pub width: u32,
    /// Final canvas height
    pub height: u32,
    /// Render duration in seconds (the audio track's length)
    pub duration: f64,
    /// The video's own duration, when known
    pub intrinsic_duration: Option<f64>,
    /// Loop/trim/hold plan
    pub playback: BackgroundPlayback,
}

impl NormalizedBackground {
    /// Whether a one-column crop is needed to reach the even width
    pub fn needs_crop(&self) -> bool {
        self.scaled_width != self.width
    }

    /// Seconds of background material available before the final cut
    pub fn effective_duration(&self) -> f64 {
        match self.playback {
            BackgroundPlayback::Still | BackgroundPlayback::Trim => self.duration,
            BackgroundPlayback::Loop { plays } => {
                self.intrinsic_duration.unwrap_or(0.0) * f64::from(plays)
            }
        }
    }
}

/// Fit a background to the canonical canvas and a target duration.
///
/// Must complete before any frame composition: the normalized dimensions
/// are the canvas every overlay frame is laid out against.
pub fn normalize_background(
    descriptor: BackgroundDescriptor,
    target_duration: f64,
    probe: &dyn MediaProbe,
) -> Result<NormalizedBackground, TimelineError> {
    let load_err = |reason: String| TimelineError::BackgroundLoad {
        path: descriptor.path().to_path_buf(),
        reason,
    };

    if !target_duration.is_finite() || target_duration <= 0.0 {
        return Err(load_err(format!(
            "target duration {target_duration} is not a positive number of seconds"
        )));
    }

    let info = probe.probe(descriptor.path())?;
    let (src_w, src_h) = match (info.width, info.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(load_err("no usable video stream dimensions".to_owned())),
    };

    // Aspect-preserving resize to the canonical height, rounded to the
    // nearest column; the even-width crop comes after, never before.
    let scaled_width = ((u64::from(src_w) * u64::from(CANONICAL_HEIGHT) + u64::from(src_h) / 2)
        / u64::from(src_h))
    .max(2) as u32;
    let width = scaled_width - (scaled_width % 2);

    let playback = if descriptor.is_video() {
        let intrinsic = info
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| load_err("could not determine video duration".to_owned()))?;
        if intrinsic < target_duration {
            BackgroundPlayback::Loop {
                plays: (target_duration / intrinsic).ceil() as u32,
            }
        } else {
            BackgroundPlayback::Trim
        }
    } else {
        BackgroundPlayback::Still
    };

    let normalized = NormalizedBackground {
        source: descriptor,
        scaled_width,
        width,
        height: CANONICAL_HEIGHT,
        duration: target_duration,
        intrinsic_duration: info.duration,
        playback,
    };

    tracing::info!(
        path = %normalized.source.path().display(),
        width = normalized.width,
        height = normalized.height,
        playback = ?normalized.playback,
        "normalized background"
    );
    Ok(normalized)
}
