//! Errors that can occur during a duplicate check

use thiserror::Error;

/// Errors produced by the duplicate detector
#[derive(Error, Debug)]
pub enum DetectorError {
    /// A required input field was missing or empty; surfaced immediately,
    /// never retried
    #[error("Invalid input: {0} must not be empty")]
    InvalidInput(&'static str),

    /// Detector configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The persistence query failed; transient, feeds the retry policy
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// One attempt exceeded the overall check timeout; transient
    #[error("Duplicate check timed out after {0} ms")]
    Timeout(u64),

    /// Retries exhausted; wraps the last underlying error
    #[error("Duplicate check failed after {attempts} attempts: {last}")]
    CheckFailed {
        /// Number of attempts made before giving up
        attempts: u32,
        /// The error of the final attempt
        #[source]
        last: Box<DetectorError>,
    },
}

impl DetectorError {
    /// Whether the retry policy applies to this error
    pub fn is_transient(&self) -> bool {
        matches!(self, DetectorError::Retrieval(_) | DetectorError::Timeout(_))
    }
}
