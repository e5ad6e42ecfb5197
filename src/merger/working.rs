/*!
 * Working cues used while merging.
 *
 * Each line remembers which input track it came from so later passes can
 * reason about "upper" and "lower" content separately.
 */

use std::fmt;

use crate::subtitles::{Subtitle, SubtitleTime};

/// Which input track a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Upper,
    Lower,
}

impl Source {
    pub fn other(self) -> Source {
        match self {
            Source::Upper => Source::Lower,
            Source::Lower => Source::Upper,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Upper => write!(f, "upper"),
            Source::Lower => write!(f, "lower"),
        }
    }
}

/// A single line of merged text tagged with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergerLine {
    pub text: String,
    pub source: Source,
}

/// Mutable cue built and consumed by the merge passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergerSubtitle {
    pub from: SubtitleTime,
    pub to: SubtitleTime,
    pub lines: Vec<MergerLine>,
}

impl MergerSubtitle {
    pub fn new(from: SubtitleTime, to: SubtitleTime) -> Self {
        MergerSubtitle { from, to, lines: Vec::new() }
    }

    /// Append every line of `subtitle` tagged with `source`
    pub fn push_lines(&mut self, subtitle: &Subtitle, source: Source) {
        self.lines.extend(subtitle.lines().iter().map(|text| MergerLine {
            text: text.clone(),
            source,
        }));
    }

    /// Texts of the lines that came from `source`, in order
    pub fn lines_from(&self, source: Source) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |line| line.source == source)
            .map(|line| line.text.as_str())
    }

    /// Whether both cues show the same `source` lines
    pub fn same_lines_from(&self, other: &MergerSubtitle, source: Source) -> bool {
        self.lines_from(source).eq(other.lines_from(source))
    }

    pub fn has_source(&self, source: Source) -> bool {
        self.lines.iter().any(|line| line.source == source)
    }

    /// The only source present, if exactly one track contributes lines
    pub fn single_source(&self) -> Option<Source> {
        match (self.has_source(Source::Upper), self.has_source(Source::Lower)) {
            (true, false) => Some(Source::Upper),
            (false, true) => Some(Source::Lower),
            _ => None,
        }
    }

    /// Whether the two cues touch with no gap between them
    pub fn is_followed_by(&self, next: &MergerSubtitle) -> bool {
        self.to == next.from
    }

    /// Line texts without their tags
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    pub fn into_subtitle(self) -> Subtitle {
        let lines = self.lines.into_iter().map(|line| line.text).collect();
        Subtitle::new(self.from, self.to, lines)
    }
}
