//! Submission module - the unit of intake in Petition

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a submission based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for recent-window queries
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u128);

impl SubmissionId {
    /// Generate a new UUIDv7-based SubmissionId
    ///
    /// # Examples
    ///
    /// ```
    /// use petition_domain::SubmissionId;
    ///
    /// let id = SubmissionId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a SubmissionId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a SubmissionId from a UUIDv7 string
    ///
    /// # Examples
    ///
    /// ```
    /// use petition_domain::SubmissionId;
    ///
    /// let id = SubmissionId::new();
    /// let parsed = SubmissionId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for SubmissionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SubmissionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Lifecycle status of a submission
///
/// Draft and Rejected submissions never participate in duplicate comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Being edited, not yet submitted
    Draft,
    /// Submitted and awaiting review
    Submitted,
    /// Currently under review
    UnderReview,
    /// Accepted for processing
    Accepted,
    /// Rejected during review
    Rejected,
}

impl SubmissionStatus {
    /// String form used by the storage layer
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under_review",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    /// Parse a status from its storage string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(SubmissionStatus::Draft),
            "submitted" => Some(SubmissionStatus::Submitted),
            "under_review" => Some(SubmissionStatus::UnderReview),
            "accepted" => Some(SubmissionStatus::Accepted),
            "rejected" => Some(SubmissionStatus::Rejected),
            _ => None,
        }
    }

    /// Statuses excluded from every duplicate comparison window
    pub fn excluded_from_comparison() -> Vec<SubmissionStatus> {
        vec![SubmissionStatus::Draft, SubmissionStatus::Rejected]
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submission - one opinion request filed by a user
///
/// Submissions are owned by the persistence layer; the duplicate detector
/// only reads the fields needed for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier
    pub id: SubmissionId,

    /// Short title of the request
    pub title: String,

    /// Free-text body
    pub body: String,

    /// Department / category the request is addressed to
    pub category: String,

    /// Lifecycle status
    pub status: SubmissionStatus,

    /// Creation time (seconds since Unix epoch)
    pub created_at: u64,
}

impl Submission {
    /// Create a freshly submitted request with a generated id
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        body: impl Into<String>,
        created_at: u64,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            title: title.into(),
            body: body.into(),
            category: category.into(),
            status: SubmissionStatus::Submitted,
            created_at,
        }
    }
}
