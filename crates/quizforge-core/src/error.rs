//! Extraction error types.
//!
//! Parsing itself never fails: garbled input degrades into diagnostics. These
//! errors only arise while building a classifier from configuration.

use thiserror::Error;

/// Errors that can occur when configuring the extraction engine.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A configured passage cue is not a valid regular expression.
    #[error("invalid passage cue pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No question keywords were configured, so no question could ever start.
    #[error("question keyword list is empty")]
    EmptyKeywordList,
}
