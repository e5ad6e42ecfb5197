use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FormatError;
use crate::subtitles::{Subtitle, SubtitleTime, Subtitles};

use super::TIME_RANGE_ARROW;

// @module: SubRip decoder

// @const: SRT time range regex
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})\s*$").unwrap()
});

/// Parse SubRip text into a track.
///
/// Time-range lines are the anchors: each one closes the cue before it, and
/// the two lines right above it must be a blank separator and the next cue's
/// index. Everything else is cue text. Blank-only input yields an empty track.
/// Decoding is all-or-nothing.
pub fn parse(text: &str) -> Result<Subtitles, FormatError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    if text.is_empty() {
        return Ok(Subtitles::default());
    }

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 2 {
        return Err(FormatError::MissingHeader);
    }

    validate_index(lines[0], 1)?;
    let (mut from, mut to) = parse_time_range(lines[1]).ok_or_else(|| FormatError::InvalidTimeRange {
        line: 2,
        value: lines[1].to_string(),
    })?;

    let mut subtitles = Subtitles::default();
    let mut text_lines: Vec<&str> = Vec::new();

    for (offset, line) in lines.iter().copied().enumerate().skip(2) {
        let line_number = offset + 1;

        let Some((next_from, next_to)) = parse_time_range(line) else {
            text_lines.push(line);
            continue;
        };

        let (Some(index), Some(separator)) = (text_lines.pop(), text_lines.pop()) else {
            return Err(FormatError::TruncatedCue { line: line_number });
        };
        if !separator.trim().is_empty() {
            return Err(FormatError::MissingSeparator { line: line_number - 2 });
        }
        validate_index(index, line_number - 1)?;

        subtitles.push(Subtitle::new(from, to, take_lines(&mut text_lines)));
        from = next_from;
        to = next_to;
    }

    subtitles.push(Subtitle::new(from, to, take_lines(&mut text_lines)));

    debug!("Parsed {} subtitle cues from {} lines", subtitles.len(), lines.len());
    Ok(subtitles)
}

/// Parse `HH:MM:SS,mmm --> HH:MM:SS,mmm`, or `None` when the line is anything else
pub fn parse_time_range(line: &str) -> Option<(SubtitleTime, SubtitleTime)> {
    // Most lines are text; skip the regex for them.
    if !line.contains(TIME_RANGE_ARROW) {
        return None;
    }

    let caps = TIME_RANGE_REGEX.captures(line)?;
    let from = caps.get(1)?.as_str().parse::<SubtitleTime>().ok()?;
    let to = caps.get(2)?.as_str().parse::<SubtitleTime>().ok()?;
    Some((from, to))
}

fn validate_index(line: &str, line_number: usize) -> Result<(), FormatError> {
    line.trim()
        .parse::<u64>()
        .map(|_| ())
        .map_err(|_| FormatError::InvalidIndex {
            line: line_number,
            value: line.to_string(),
        })
}

fn take_lines(text_lines: &mut Vec<&str>) -> Vec<String> {
    text_lines.drain(..).map(str::to_string).collect()
}
