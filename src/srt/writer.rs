use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitles::{Subtitle, Subtitles};

use super::TIME_RANGE_ARROW;

// @module: SubRip encoder

// @const: Angle-bracket and brace tags, matched non-greedily
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>|\{.*?\}").unwrap());

/// Render a track as SubRip text.
///
/// Cues are written in the given order and renumbered from 1. Blocks are
/// separated by one blank line; nothing follows the last block's text.
/// With `plain_text` set, markup is stripped and lines left blank by the
/// stripping are dropped.
pub fn write(subtitles: &Subtitles, plain_text: bool) -> String {
    let mut out = String::new();

    for (i, subtitle) in subtitles.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", i + 1);
        let _ = writeln!(out, "{} {} {}", subtitle.from(), TIME_RANGE_ARROW, subtitle.to());

        for line in body_lines(subtitle, plain_text) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

/// Remove `<...>` and `{...}` tags from a line
pub fn strip_markup(line: &str) -> String {
    MARKUP_REGEX.replace_all(line, "").into_owned()
}

fn body_lines(subtitle: &Subtitle, plain_text: bool) -> Vec<String> {
    if !plain_text {
        return subtitle.lines().to_vec();
    }

    let lines: Vec<String> = subtitle
        .lines()
        .iter()
        .filter_map(|line| {
            if line.trim().is_empty() {
                return Some(line.clone());
            }
            let stripped = strip_markup(line);
            if stripped.trim().is_empty() { None } else { Some(stripped) }
        })
        .collect();

    if lines.is_empty() { vec![String::new()] } else { lines }
}
