/*!
 * Jump fixing pass.
 *
 * A cue carrying lines from only one track, wedged between neighbours that
 * show the same lines of that track together with other-track text, makes
 * the other-track text blink out for one segment. This pass fills the gap
 * with the other-track lines found on the left, falling back to the right.
 * Extending what is already on screen is preferred over showing upcoming
 * text early.
 */

use log::debug;

use crate::cancellation::CancellationCheck;
use crate::errors::Cancelled;

use super::working::{MergerLine, MergerSubtitle, Source};

/// Fix jumps in place and return how many cues were filled.
///
/// Single-track cues are handled a run at a time: a run is a maximal
/// sequence of time-adjacent cues showing the same lines of one track and
/// nothing else. Each cue is visited a constant number of times.
pub fn run<C: CancellationCheck + ?Sized>(
    subtitles: &mut [MergerSubtitle],
    cancel: &C,
) -> Result<usize, Cancelled> {
    let mut fixed = 0;
    let mut start = 0;

    while start < subtitles.len() {
        cancel.check()?;

        let Some(source) = subtitles[start].single_source() else {
            start += 1;
            continue;
        };
        let end = run_end(subtitles, start, source, cancel)?;

        if let Some(lines) = fill_lines(subtitles, start, end, source) {
            for subtitle in &mut subtitles[start..end] {
                cancel.check()?;
                subtitle.lines.extend(lines.iter().cloned());
                fixed += 1;
            }
        }
        start = end;
    }

    debug!("Jump pass: filled {} single-track cues", fixed);
    Ok(fixed)
}

/// Exclusive end of the run of `source`-only cues starting at `start`
fn run_end<C: CancellationCheck + ?Sized>(
    subtitles: &[MergerSubtitle],
    start: usize,
    source: Source,
    cancel: &C,
) -> Result<usize, Cancelled> {
    let mut end = start + 1;
    while let Some(next) = subtitles.get(end) {
        cancel.check()?;
        let previous = &subtitles[end - 1];
        if !previous.is_followed_by(next)
            || next.single_source() != Some(source)
            || !previous.same_lines_from(next, source)
        {
            break;
        }
        end += 1;
    }
    Ok(end)
}

/// Other-track lines for the run `start..end`, if it is enclosed on both
/// sides. Left wins when both sides offer lines.
fn fill_lines(
    subtitles: &[MergerSubtitle],
    start: usize,
    end: usize,
    source: Source,
) -> Option<Vec<MergerLine>> {
    let first = &subtitles[start];
    let last = &subtitles[end - 1];

    let left = start
        .checked_sub(1)
        .map(|index| &subtitles[index])
        .filter(|left| left.is_followed_by(first))?;
    let right = subtitles.get(end).filter(|right| last.is_followed_by(right))?;

    let other = source.other();
    let encloses = |neighbour: &MergerSubtitle| {
        neighbour.has_source(other) && neighbour.same_lines_from(first, source)
    };
    if !encloses(left) || !encloses(right) {
        return None;
    }

    Some(
        left.lines
            .iter()
            .filter(|line| line.source == other)
            .cloned()
            .collect(),
    )
}
