//! Petition Duplicate Detector
//!
//! Screens incoming opinion requests against the recent submission window
//! of their category before they enter review. The detector combines three
//! text metrics (edit distance, keyword Jaccard, TF-IDF cosine) with
//! position-boosted keyword overlap and an optional semantic signal into
//! one thresholded score.
//!
//! # Architecture
//!
//! - [`DuplicateDetector`]: the orchestrator - validate, cache lookup,
//!   retrieve, batch-score, threshold, cache store, with retry/backoff
//! - [`VerdictCache`]: bounded TTL'd cross-call cache
//! - [`DetectorConfig`]: every tunable, validated at construction
//! - [`DetectorMetrics`]: counters for observability
//!
//! # Examples
//!
//! ```no_run
//! use petition_dedup::{DetectorConfig, DuplicateDetector};
//! use petition_store::SqliteStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::new("petition.db")?;
//! let detector = DuplicateDetector::new(store, DetectorConfig::default())?;
//!
//! let verdict = detector
//!     .check("Fix Elm Street potholes", "Transportation", "The road is damaged.")
//!     .await?;
//! if verdict.is_duplicate {
//!     println!("duplicate of {:?}", verdict.matched.map(|m| m.id));
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod detector;
mod error;
mod memo;
mod metrics;
mod scorer;

pub use cache::{CacheStats, VerdictCache};
pub use config::DetectorConfig;
pub use detector::DuplicateDetector;
pub use error::DetectorError;
pub use metrics::DetectorMetrics;
