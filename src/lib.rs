/*!
 * # submerger - Subtitle track merger
 *
 * A Rust library for merging two independently timed subtitle tracks
 * (for example two languages) into a single SubRip track.
 *
 * ## Features
 *
 * - Decode and encode SubRip (.srt) text, tolerant of inconsistent blank lines
 * - Merge two tracks so every instant shows the lines of both sources,
 *   upper track first
 * - Smooth out one-segment flicker caused by sloppy timings in one source
 * - Coalesce adjacent cues with identical text
 * - Cooperative cancellation for merges running on a worker thread
 * - Optional markup stripping for plain-text output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitles`: Cue, track and time types
 * - `srt`: SubRip codec:
 *   - `srt::parser`: Text to track decoding
 *   - `srt::writer`: Track to text encoding
 * - `merger`: Merge engine and its passes
 * - `cancellation`: Cancellation handles sampled by the merge engine
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod cancellation;
pub mod errors;
pub mod file_utils;
pub mod merger;
pub mod srt;
pub mod subtitles;

// Re-export main types for easier usage
pub use app_config::Config;
pub use cancellation::{CancellationCheck, CancellationToken, NeverCancel};
pub use errors::{AppError, Cancelled, FormatError};
pub use merger::{merge, merge_with_config, MergeConfig, MergeOutcome, MergeReport, SubtitleMerger};
pub use srt::{parse, write};
pub use subtitles::{Subtitle, SubtitleTime, Subtitles};
