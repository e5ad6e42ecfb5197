/*!
 * Subtitle data model shared by the SubRip codec and the merge engine.
 *
 * A `Subtitles` track is a plain ordered list of `Subtitle` cues. Nothing here
 * enforces ordering or non-overlap: real files break both, so the merge
 * engine deals with it procedurally.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};

// @module: Subtitle cues, tracks and wall-clock times

const MILLIS_PER_SECOND: u32 = 1_000;
const MILLIS_PER_MINUTE: u32 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u32 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u32 = 24 * MILLIS_PER_HOUR;

/// Wall-clock time of day with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubtitleTime {
    // @field: Milliseconds since 00:00:00,000
    millis: u32,
}

impl SubtitleTime {
    /// Build a time from its components, rejecting anything outside a single day
    pub fn from_hmsm(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Result<Self> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!(
                "Invalid time components: {}:{}:{},{}",
                hours, minutes, seconds, millis
            ));
        }

        Ok(SubtitleTime {
            millis: hours * MILLIS_PER_HOUR
                + minutes * MILLIS_PER_MINUTE
                + seconds * MILLIS_PER_SECOND
                + millis,
        })
    }

    /// Build a time from milliseconds since midnight
    pub fn from_millis(millis: u32) -> Result<Self> {
        if millis >= MILLIS_PER_DAY {
            return Err(anyhow!("Time {} ms does not fit in a single day", millis));
        }
        Ok(SubtitleTime { millis })
    }

    pub fn as_millis(&self) -> u32 {
        self.millis
    }

    pub fn hours(&self) -> u32 {
        self.millis / MILLIS_PER_HOUR
    }

    pub fn minutes(&self) -> u32 {
        (self.millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE
    }

    pub fn seconds(&self) -> u32 {
        (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND
    }

    pub fn millis(&self) -> u32 {
        self.millis % MILLIS_PER_SECOND
    }
}

impl fmt::Display for SubtitleTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours(), self.minutes(), self.seconds(), self.millis()
        )
    }
}

impl FromStr for SubtitleTime {
    type Err = anyhow::Error;

    /// Parse the fixed-width SubRip form `HH:MM:SS,mmm`
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 12
            && bytes[2] == b':'
            && bytes[5] == b':'
            && bytes[8] == b','
            && [0, 1, 3, 4, 6, 7, 9, 10, 11].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(anyhow!("Invalid timestamp format: {}", s));
        }

        let field = |range: std::ops::Range<usize>| -> Result<u32> {
            s[range].parse::<u32>().map_err(|e| anyhow!("Invalid timestamp {}: {}", s, e))
        };

        Self::from_hmsm(field(0..2)?, field(3..5)?, field(6..8)?, field(9..12)?)
    }
}

/// A single subtitle cue: a display interval and the lines shown during it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtitle {
    from: SubtitleTime,
    to: SubtitleTime,
    lines: Vec<String>,
}

impl Subtitle {
    /// Create a cue. An empty `lines` vector becomes a single empty line so
    /// every cue keeps a body.
    pub fn new(from: SubtitleTime, to: SubtitleTime, lines: Vec<String>) -> Self {
        let lines = if lines.is_empty() { vec![String::new()] } else { lines };
        Subtitle { from, to, lines }
    }

    pub fn from(&self) -> SubtitleTime {
        self.from
    }

    pub fn to(&self) -> SubtitleTime {
        self.to
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether the closed interval `[from, to]` contains both segment bounds
    pub fn covers(&self, start: SubtitleTime, end: SubtitleTime) -> bool {
        start >= self.from && start <= self.to && end >= self.from && end <= self.to
    }
}

/// An ordered track of cues, as decoded from one file or stream
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subtitles {
    subtitles: Vec<Subtitle>,
}

impl Subtitles {
    pub fn new(subtitles: Vec<Subtitle>) -> Self {
        Subtitles { subtitles }
    }

    pub fn len(&self) -> usize {
        self.subtitles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subtitles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subtitle> {
        self.subtitles.iter()
    }

    pub fn as_slice(&self) -> &[Subtitle] {
        &self.subtitles
    }

    pub fn push(&mut self, subtitle: Subtitle) {
        self.subtitles.push(subtitle);
    }

    pub fn into_inner(self) -> Vec<Subtitle> {
        self.subtitles
    }

    /// True when every cue is well-formed (`from <= to`) and no cue starts
    /// before the previous one ends. Such tracks can be scanned with a single
    /// forward cursor.
    pub fn is_consequential(&self) -> bool {
        self.subtitles.iter().all(|s| s.from <= s.to)
            && self.subtitles.windows(2).all(|pair| pair[0].to <= pair[1].from)
    }
}

impl FromIterator<Subtitle> for Subtitles {
    fn from_iter<I: IntoIterator<Item = Subtitle>>(iter: I) -> Self {
        Subtitles::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Subtitles {
    type Item = Subtitle;
    type IntoIter = std::vec::IntoIter<Subtitle>;

    fn into_iter(self) -> Self::IntoIter {
        self.subtitles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Subtitles {
    type Item = &'a Subtitle;
    type IntoIter = std::slice::Iter<'a, Subtitle>;

    fn into_iter(self) -> Self::IntoIter {
        self.subtitles.iter()
    }
}
