/*!
 * Coalescing pass: merge time-adjacent cues that show identical text.
 */

use log::debug;

use crate::cancellation::CancellationCheck;
use crate::errors::Cancelled;

use super::working::MergerSubtitle;

/// Extend the previously kept cue instead of keeping a new one whenever the
/// new cue starts exactly where it ends and has the same lines, tags ignored.
pub fn run<C: CancellationCheck + ?Sized>(
    subtitles: Vec<MergerSubtitle>,
    cancel: &C,
) -> Result<Vec<MergerSubtitle>, Cancelled> {
    let before = subtitles.len();
    let mut result: Vec<MergerSubtitle> = Vec::with_capacity(before);

    for subtitle in subtitles {
        cancel.check()?;

        if let Some(last) = result.last_mut() {
            if last.is_followed_by(&subtitle) && last.texts().eq(subtitle.texts()) {
                last.to = subtitle.to;
                continue;
            }
        }
        result.push(subtitle);
    }

    debug!("Coalesce pass: {} cues reduced to {}", before, result.len());
    Ok(result)
}
