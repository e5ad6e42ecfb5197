/*!
 * Initial pass: cut the timeline at every cue boundary of both tracks and
 * build one working cue per segment that either track covers.
 */

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::cancellation::CancellationCheck;
use crate::errors::Cancelled;
use crate::subtitles::{Subtitle, SubtitleTime, Subtitles};

use super::working::{MergerSubtitle, Source};

/// What the initial pass saw, for the merge report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialPassStats {
    /// Distinct time points across both tracks
    pub time_points: usize,
    /// Segments covered by at least one track
    pub segments: usize,
    /// Whether the upper track was scanned with the single-cursor fast path
    pub upper_fast_path: bool,
    /// Whether the lower track was scanned with the single-cursor fast path
    pub lower_fast_path: bool,
}

/// Finds the cue of one track covering each segment, segments arriving in
/// increasing time order.
struct TrackCursor<'a> {
    subtitles: &'a [Subtitle],
    // Every cue before this index ends before the current segment
    position: usize,
    fast_path: bool,
}

impl<'a> TrackCursor<'a> {
    fn new(track: &'a Subtitles, allow_fast_path: bool) -> Self {
        TrackCursor {
            subtitles: track.as_slice(),
            position: 0,
            fast_path: allow_fast_path && track.is_consequential(),
        }
    }

    /// First cue in track order covering `[start, end]`
    fn covering<C: CancellationCheck + ?Sized>(
        &mut self,
        start: SubtitleTime,
        end: SubtitleTime,
        cancel: &C,
    ) -> Result<Option<&'a Subtitle>, Cancelled> {
        // `end` only grows, so a cue ending before it is done for good. For
        // unordered tracks this only trims a dead prefix.
        while let Some(subtitle) = self.subtitles.get(self.position) {
            cancel.check()?;
            if subtitle.to() >= end {
                break;
            }
            self.position += 1;
        }

        let subtitles = self.subtitles;
        let remaining = &subtitles[self.position..];

        if self.fast_path {
            // Non-overlapping, ordered cues: only the cursor's cue can cover a
            // non-empty segment.
            return Ok(remaining.first().filter(|s| s.covers(start, end)));
        }

        for subtitle in remaining {
            cancel.check()?;
            if subtitle.covers(start, end) {
                return Ok(Some(subtitle));
            }
        }
        Ok(None)
    }
}

/// Sorted, de-duplicated `from`/`to` points of both tracks
pub fn collect_time_points<C: CancellationCheck + ?Sized>(
    upper: &Subtitles,
    lower: &Subtitles,
    cancel: &C,
) -> Result<Vec<SubtitleTime>, Cancelled> {
    let mut points = BTreeSet::new();
    for subtitle in upper.iter().chain(lower.iter()) {
        cancel.check()?;
        points.insert(subtitle.from());
        points.insert(subtitle.to());
    }
    Ok(points.into_iter().collect())
}

/// Build the working cues for every covered segment.
///
/// Lines of the covering upper cue come first, tagged `Upper`, followed by
/// those of the covering lower cue tagged `Lower`.
pub fn run<C: CancellationCheck + ?Sized>(
    upper: &Subtitles,
    lower: &Subtitles,
    allow_fast_path: bool,
    cancel: &C,
) -> Result<(Vec<MergerSubtitle>, InitialPassStats), Cancelled> {
    let points = collect_time_points(upper, lower, cancel)?;

    let mut upper_cursor = TrackCursor::new(upper, allow_fast_path);
    let mut lower_cursor = TrackCursor::new(lower, allow_fast_path);
    warn_if_unordered(upper, Source::Upper, allow_fast_path);
    warn_if_unordered(lower, Source::Lower, allow_fast_path);

    let mut merged = Vec::new();
    for window in points.windows(2) {
        cancel.check()?;
        let (start, end) = (window[0], window[1]);

        let upper_subtitle = upper_cursor.covering(start, end, cancel)?;
        let lower_subtitle = lower_cursor.covering(start, end, cancel)?;
        if upper_subtitle.is_none() && lower_subtitle.is_none() {
            continue;
        }

        let mut subtitle = MergerSubtitle::new(start, end);
        if let Some(covering) = upper_subtitle {
            subtitle.push_lines(covering, Source::Upper);
        }
        if let Some(covering) = lower_subtitle {
            subtitle.push_lines(covering, Source::Lower);
        }
        merged.push(subtitle);
    }

    let stats = InitialPassStats {
        time_points: points.len(),
        segments: merged.len(),
        upper_fast_path: upper_cursor.fast_path,
        lower_fast_path: lower_cursor.fast_path,
    };
    debug!(
        "Initial pass: {} time points, {} covered segments",
        stats.time_points, stats.segments
    );

    Ok((merged, stats))
}

fn warn_if_unordered(track: &Subtitles, source: Source, allow_fast_path: bool) {
    if allow_fast_path && !track.is_empty() && !track.is_consequential() {
        warn!(
            "{:?} track has overlapping or out-of-order cues, falling back to a full scan",
            source
        );
    }
}
