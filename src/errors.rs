/*!
 * Error types for the submerger application.
 *
 * This module contains the decoder's format error, the merge engine's
 * cancellation signal and the application-level error that wraps them,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::merger::Source;

/// Errors raised when text is not decodable as SubRip.
///
/// Line numbers are 1-based and refer to physical lines of the trimmed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input has fewer than the two lines needed for a first cue
    #[error("Subtitle text is too short to contain an index and a time range")]
    MissingHeader,

    /// A cue index line is not a non-negative integer
    #[error("Invalid cue index at line {line}: '{value}'")]
    InvalidIndex {
        /// Line number of the offending line
        line: usize,
        /// Raw content of the line
        value: String,
    },

    /// A line expected to hold `HH:MM:SS,mmm --> HH:MM:SS,mmm` does not
    #[error("Invalid time range at line {line}: '{value}'")]
    InvalidTimeRange {
        /// Line number of the offending line
        line: usize,
        /// Raw content of the line
        value: String,
    },

    /// The line before a cue index is not blank
    #[error("Expected a blank line before the cue index at line {line}")]
    MissingSeparator {
        /// Line number of the line that should have been blank
        line: usize,
    },

    /// A time range appeared without room for the separator and index before it
    #[error("Time range at line {line} is not preceded by a separator and an index")]
    TruncatedCue {
        /// Line number of the time range
        line: usize,
    },
}

/// Signal that a merge was aborted through its cancellation handle.
///
/// This is not a failure: the merge simply did not happen and produced nothing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Merge was cancelled")]
pub struct Cancelled;

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// One of the two input tracks could not be decoded
    #[error("Failed to decode the {track} subtitles: {source}")]
    Decode {
        /// Which input failed
        track: Source,
        /// What was wrong with it
        #[source]
        source: FormatError,
    },

    /// The merge was cancelled before it produced a result
    #[error("{0}")]
    Cancelled(#[from] Cancelled),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Whether this error only reports a deliberate abort
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled(_))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
