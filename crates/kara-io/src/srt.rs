//! SubRip (`.srt`) cue parsing and writing
//!
//! The loader is tolerant of what real subtitle files contain: optional cue
//! index lines, CRLF endings, `.` as the millisecond separator, and
//! multi-line cue text (joined into one lyric line with spaces). Timing
//! lines that cannot be parsed are hard errors, since a silently mis-timed lyric
//! is worse than a load failure.

use crate::error::IoError;
use kara_core::{RawSegment, Segment};

/// Parse SRT content into raw line-table rows, in cue order.
pub fn parse(content: &str) -> Result<Vec<RawSegment>, IoError> {
    let mut rows = Vec::new();

    for block in cue_blocks(content) {
        let first_line = block.first_line;
        let mut lines = block.lines.iter().copied();

        let Some(mut timing) = lines.next() else {
            continue;
        };
        // Optional numeric cue index before the timing line.
        if !timing.contains("-->") && timing.trim().parse::<u64>().is_ok() {
            timing = match lines.next() {
                Some(line) => line,
                None => return Err(IoError::MissingTiming { line: first_line }),
            };
        }

        let (start, end) = parse_timing(timing, first_line)?;
        let text = lines.map(|l| l.trim()).collect::<Vec<_>>().join(" ");

        rows.push(RawSegment::new(start, end, text));
    }

    Ok(rows)
}

/// Write segments as SRT, one cue per line in list order.
pub fn write(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(seg.start),
            format_timestamp(seg.end),
            seg.text
        ));
    }
    out
}

struct CueBlock<'a> {
    /// 1-based line number of the block's first line
    first_line: usize,
    lines: Vec<&'a str>,
}

fn cue_blocks(content: &str) -> Vec<CueBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<CueBlock> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        current
            .get_or_insert_with(|| CueBlock {
                first_line: idx + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }
    if let Some(block) = current.take() {
        blocks.push(block);
    }
    blocks
}

fn parse_timing(line: &str, cue_line: usize) -> Result<(f64, f64), IoError> {
    let mut parts = line.splitn(2, "-->");
    let start_text = parts.next().unwrap_or("").trim();
    let end_text = parts
        .next()
        .ok_or(IoError::MissingTiming { line: cue_line })?
        .trim();
    // Some tools append cue settings after the end timestamp.
    let end_text = end_text.split_whitespace().next().unwrap_or(end_text);

    let start = parse_timestamp(start_text).ok_or_else(|| IoError::BadTimestamp {
        value: start_text.to_owned(),
        line: cue_line,
    })?;
    let end = parse_timestamp(end_text).ok_or_else(|| IoError::BadTimestamp {
        value: end_text.to_owned(),
        line: cue_line,
    })?;
    Ok((start, end))
}

/// Parse `HH:MM:SS,mmm` (or `HH:MM:SS.mmm`) into seconds.
fn parse_timestamp(text: &str) -> Option<f64> {
    let (hms, millis) = match text.rsplit_once([',', '.']) {
        Some((hms, ms)) => (hms, ms.parse::<u32>().ok()?),
        None => (text, 0),
    };

    let mut fields = hms.split(':');
    let hours: u64 = fields.next()?.trim().parse().ok()?;
    let minutes: u64 = fields.next()?.trim().parse().ok()?;
    let seconds: u64 = fields.next()?.trim().parse().ok()?;
    if fields.next().is_some() || minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return None;
    }

    // Accumulate in integer milliseconds; one division keeps values exact.
    let total_ms = hours * 3_600_000 + minutes * 60_000 + seconds * 1000 + u64::from(millis);
    Some(total_ms as f64 / 1000.0)
}

/// Format seconds as `HH:MM:SS,mmm`.
fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let s = (total_ms / 1000) % 60;
    let m = (total_ms / 60_000) % 60;
    let h = total_ms / 3_600_000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "1\n00:00:00,000 --> 00:00:02,500\nHello\n\n2\n00:00:03,000 --> 00:00:05,250\nWorld again\n";

    #[test]
    fn parses_indexed_cues() {
        let rows = parse(SAMPLE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].start, 0.0);
        assert_eq!(rows[0].end, 2.5);
        assert_eq!(rows[0].text, "Hello");
        assert_eq!(rows[1].start, 3.0);
        assert_eq!(rows[1].end, 5.25);
    }

    #[test]
    fn tolerates_missing_index_and_crlf() {
        let content = "00:00:01,000 --> 00:00:02,000\r\nLine one\r\n\r\n00:00:02,000 --> 00:00:03,000\r\nLine two\r\n";
        let rows = parse(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text, "Line two");
    }

    #[test]
    fn joins_multiline_cue_text() {
        let content = "1\n00:00:00,000 --> 00:00:01,000\nfirst half\nsecond half\n";
        let rows = parse(content).unwrap();
        assert_eq!(rows[0].text, "first half second half");
    }

    #[test]
    fn accepts_dot_millisecond_separator() {
        let content = "00:01:02.345 --> 00:01:03.000\ndotted\n";
        let rows = parse(content).unwrap();
        assert_eq!(rows[0].start, 62.345);
    }

    #[test]
    fn bad_timestamp_names_the_cue() {
        let content = "1\nnot a time --> 00:00:01,000\nbroken\n";
        let err = parse(content).unwrap_err();
        match err {
            IoError::BadTimestamp { value, line } => {
                assert_eq!(value, "not a time");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(parse_timestamp("00:61:00,000"), None);
        assert_eq!(parse_timestamp("00:00:75,000"), None);
        assert_eq!(parse_timestamp("garbage"), None);
    }

    #[test]
    fn write_emits_cues_in_list_order() {
        let segments = vec![
            Segment {
                start: 0.0,
                end: 2.5,
                text: "Hello".into(),
            },
            Segment {
                start: 3.0,
                end: 5.25,
                text: "World again".into(),
            },
        ];
        assert_eq!(write(&segments), SAMPLE.to_owned() + "\n");
    }

    #[test]
    fn timestamps_round_trip() {
        assert_eq!(format_timestamp(62.345), "00:01:02,345");
        assert_eq!(parse_timestamp(&format_timestamp(62.5)), Some(62.5));
        assert_eq!(format_timestamp(3661.007), "01:01:01,007");
    }
}
