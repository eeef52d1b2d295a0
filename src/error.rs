//! Error types for transcript reconstruction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors raised while reading or reconstructing a transcript.
///
/// Scoring never produces these; a metric without data reports
/// [`MetricScore::NoData`](crate::scoring::MetricScore::NoData) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A message line was seen before any date marker.
    #[error("line {line_number}: message has no preceding date marker: {line:?}")]
    MissingDate {
        /// 1-based line number in the transcript file.
        line_number: usize,
        /// Raw text of the offending line.
        line: String,
    },

    /// A date marker or message time does not name a real calendar instant.
    #[error("line {line_number}: invalid date or time: {line:?}")]
    InvalidTimestamp {
        /// 1-based line number in the transcript file.
        line_number: usize,
        /// Raw text of the offending line.
        line: String,
    },

    /// The transcript file could not be read.
    #[error("failed to read transcript {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
