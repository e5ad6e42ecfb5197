use crate::cancellation::CancellationCheck;
use crate::errors::Cancelled;

use super::working::MergerSubtitle;

// @module: Line ordering pass

/// Put upper-track lines before lower-track lines in every cue, keeping the
/// relative order within each track.
pub fn run<C: CancellationCheck + ?Sized>(
    subtitles: &mut [MergerSubtitle],
    cancel: &C,
) -> Result<(), Cancelled> {
    for subtitle in subtitles.iter_mut() {
        cancel.check()?;
        // Stable: `Source::Upper` sorts before `Source::Lower`
        subtitle.lines.sort_by_key(|line| line.source);
    }
    Ok(())
}
