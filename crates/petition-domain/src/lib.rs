//! Petition Domain Layer
//!
//! This crate contains the core business logic and domain model for Petition's
//! duplicate-detection pipeline. It defines the fundamental entities, the
//! text-analysis primitives the detector is built from, and the trait
//! interfaces that infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Submission**: a citizen request - title, category, free-text body
//! - **Normalization**: canonical text form used for all comparisons
//! - **Keywords**: significant tokens extracted from normalized text
//! - **Similarity metrics**: edit-distance, Jaccard, TF-IDF cosine, each in [0, 1]
//! - **Weights**: named, validated weight sets that combine metric scores
//! - **DuplicateVerdict**: the detector's answer for one candidate
//!
//! ## Architecture
//!
//! - Pure logic only; no I/O in this crate
//! - Infrastructure implementations (storage, semantic providers) live in
//!   other crates behind the traits defined here

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keywords;
pub mod normalize;
pub mod similarity;
pub mod submission;
pub mod traits;
pub mod verdict;
pub mod weights;

// Re-exports for convenience
pub use submission::{Submission, SubmissionId, SubmissionStatus};
pub use verdict::{DuplicateVerdict, SignalScores, SimilarityScore};
pub use weights::{MetricWeights, SignalWeights, WeightError};
