/*!
 * Merge engine combining two subtitle tracks into one.
 *
 * For every instant covered by either input, the merged track shows the
 * upper track's lines followed by the lower track's lines visible at that
 * instant. The work runs in four passes over the union of time points:
 * 1. **Initial pass**: one working cue per covered segment
 * 2. **Jump pass**: fill single-track cues enclosed by two-track neighbours
 * 3. **Ordering pass**: upper lines before lower lines
 * 4. **Coalesce pass**: join time-adjacent cues with identical text
 *
 * Every loop samples the cancellation handle; a cancelled merge yields
 * `Cancelled` and no track at all.
 */

pub mod coalesce_pass;
pub mod initial_pass;
pub mod jump_pass;
pub mod ordering_pass;
pub mod working;

use log::debug;

use crate::cancellation::CancellationCheck;
use crate::errors::Cancelled;
use crate::subtitles::Subtitles;

pub use working::{MergerLine, MergerSubtitle, Source};

/// Knobs for the merge engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Whether to run the jump pass
    pub fix_jumps: bool,

    /// Whether ordered, non-overlapping tracks may use the single-cursor
    /// lookup. Turning it off forces the full scan.
    pub use_consequential_fast_path: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            fix_jumps: true,
            use_consequential_fast_path: true,
        }
    }
}

impl MergeConfig {
    /// Full-scan configuration, used to cross-check the fast path
    pub fn full_scan() -> Self {
        Self {
            use_consequential_fast_path: false,
            ..Default::default()
        }
    }

    /// Enable or disable the jump pass.
    pub fn with_jump_fixing(mut self, enabled: bool) -> Self {
        self.fix_jumps = enabled;
        self
    }
}

/// Statistics gathered while merging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Distinct time points across both inputs
    pub time_points: usize,

    /// Segments covered by at least one input
    pub segments: usize,

    /// Single-track cues filled by the jump pass
    pub jumps_fixed: usize,

    /// Cues in the merged track
    pub subtitles: usize,

    /// Whether the upper track used the single-cursor lookup
    pub upper_fast_path: bool,

    /// Whether the lower track used the single-cursor lookup
    pub lower_fast_path: bool,
}

/// Merged track together with its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub subtitles: Subtitles,
    pub report: MergeReport,
}

/// Runs the four merge passes with a given configuration.
#[derive(Debug, Clone, Default)]
pub struct SubtitleMerger {
    config: MergeConfig,
}

impl SubtitleMerger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Merge `upper` and `lower` into a new track. Inputs are never modified.
    pub fn merge<C: CancellationCheck + ?Sized>(
        &self,
        upper: &Subtitles,
        lower: &Subtitles,
        cancel: &C,
    ) -> Result<MergeOutcome, Cancelled> {
        let (mut merged, stats) = initial_pass::run(
            upper,
            lower,
            self.config.use_consequential_fast_path,
            cancel,
        )?;

        let jumps_fixed = if self.config.fix_jumps {
            jump_pass::run(&mut merged, cancel)?
        } else {
            0
        };

        ordering_pass::run(&mut merged, cancel)?;
        let merged = coalesce_pass::run(merged, cancel)?;

        let mut subtitles = Subtitles::default();
        for subtitle in merged {
            cancel.check()?;
            subtitles.push(subtitle.into_subtitle());
        }

        let report = MergeReport {
            time_points: stats.time_points,
            segments: stats.segments,
            jumps_fixed,
            subtitles: subtitles.len(),
            upper_fast_path: stats.upper_fast_path,
            lower_fast_path: stats.lower_fast_path,
        };
        debug!(
            "Merged {} upper and {} lower cues into {} cues ({} jumps fixed)",
            upper.len(),
            lower.len(),
            report.subtitles,
            report.jumps_fixed
        );

        Ok(MergeOutcome { subtitles, report })
    }
}

/// Merge two tracks with the default configuration
pub fn merge<C: CancellationCheck + ?Sized>(
    upper: &Subtitles,
    lower: &Subtitles,
    cancel: &C,
) -> Result<Subtitles, Cancelled> {
    SubtitleMerger::default()
        .merge(upper, lower, cancel)
        .map(|outcome| outcome.subtitles)
}

/// Merge two tracks with an explicit configuration, keeping the report
pub fn merge_with_config<C: CancellationCheck + ?Sized>(
    upper: &Subtitles,
    lower: &Subtitles,
    config: &MergeConfig,
    cancel: &C,
) -> Result<MergeOutcome, Cancelled> {
    SubtitleMerger::new(config.clone()).merge(upper, lower, cancel)
}
