//! Error types for the CLI.

use petition_dedup::DetectorError;
use petition_store::StoreError;
use thiserror::Error;

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the user.
#[derive(Error, Debug)]
pub enum CliError {
    /// Storage failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Duplicate-check failure
    #[error("Detector error: {0}")]
    Detector(#[from] DetectorError),

    /// Output serialization failure
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}
