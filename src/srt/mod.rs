/*!
 * SubRip (.srt) codec.
 *
 * - `parser`: text to `Subtitles`, anchored on time-range lines
 * - `writer`: `Subtitles` to canonical SubRip text, optionally without markup
 */

pub mod parser;
pub mod writer;

pub use parser::parse;
pub use writer::{strip_markup, write};

/// Token separating the two timestamps of a time-range line
pub const TIME_RANGE_ARROW: &str = "-->";
