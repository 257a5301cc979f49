//! Configuration for the duplicate detector
//!
//! Every tunable of the detection pipeline lives here: thresholds, the
//! retrieval window, batching, retry policy, cache sizing, and the three
//! weight sets. Weight sets are configuration, not constants; validation
//! happens once at detector construction, never per request.

use crate::error::DetectorError;
use petition_domain::{MetricWeights, SignalWeights};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the duplicate detector
///
/// # Examples
///
/// ```
/// use petition_dedup::DetectorConfig;
///
/// // Default configuration (balanced)
/// let config = DetectorConfig::default();
/// assert_eq!(config.duplicate_threshold, 0.75);
///
/// // Aggressive screening
/// let config = DetectorConfig::strict();
/// assert!(config.duplicate_threshold < 0.75);
///
/// // Permissive screening
/// let config = DetectorConfig::lenient();
/// assert!(config.duplicate_threshold > 0.75);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Combined score at or above which a candidate is a duplicate
    /// Default: 0.75
    pub duplicate_threshold: f64,

    /// Rolling comparison window (in days)
    /// Default: 180
    pub window_days: u64,

    /// Minimum keyword length (in characters)
    /// Default: 3
    pub min_keyword_len: usize,

    /// Submissions scored per batch; bounds peak concurrency
    /// Default: 100
    pub batch_size: usize,

    /// Maximum orchestration attempts for transient failures
    /// Default: 3
    pub max_retries: u32,

    /// Base backoff delay between attempts (in milliseconds); grows
    /// linearly with the attempt number
    /// Default: 500
    pub retry_delay_ms: u64,

    /// Overall timeout for a single attempt (in milliseconds)
    /// Default: 30000
    pub check_timeout_ms: u64,

    /// Verdict cache time-to-live (in seconds); entries survive a further
    /// 10% grace period before they are considered stale
    /// Default: 3600 (1 hour)
    pub cache_ttl_secs: u64,

    /// Maximum verdict cache entries before least-recently-inserted
    /// eviction kicks in
    /// Default: 1000
    pub cache_max_entries: usize,

    /// Metric weights for the title comparison
    #[serde(default = "MetricWeights::title_default")]
    pub title_weights: MetricWeights,

    /// Metric weights for the body comparison
    #[serde(default = "MetricWeights::body_default")]
    pub body_weights: MetricWeights,

    /// Top-level weights over the five pair signals
    #[serde(default)]
    pub signal_weights: SignalWeights,
}

impl Default for DetectorConfig {
    /// Balanced defaults suitable for a municipal intake deployment
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.75,
            window_days: 180,
            min_keyword_len: 3,
            batch_size: 100,
            max_retries: 3,
            retry_delay_ms: 500,
            check_timeout_ms: 30_000,
            cache_ttl_secs: 3600,
            cache_max_entries: 1000,
            title_weights: MetricWeights::title_default(),
            body_weights: MetricWeights::body_default(),
            signal_weights: SignalWeights::default(),
        }
    }
}

impl DetectorConfig {
    /// Aggressive screening: lower threshold, wider window
    ///
    /// Flags more near-misses as duplicates. Suitable when reviewers prefer
    /// merging over triaging repeats.
    pub fn strict() -> Self {
        Self {
            duplicate_threshold: 0.65,
            window_days: 365,
            ..Default::default()
        }
    }

    /// Permissive screening: higher threshold, shorter window
    ///
    /// Only near-identical requests are flagged.
    pub fn lenient() -> Self {
        Self {
            duplicate_threshold: 0.85,
            window_days: 90,
            ..Default::default()
        }
    }

    /// Build a configuration from `PETITION_*` environment variables
    ///
    /// Unset variables keep their defaults; unparseable values are an
    /// [`DetectorError::InvalidConfiguration`]. Recognized variables:
    /// `PETITION_DUPLICATE_THRESHOLD`, `PETITION_WINDOW_DAYS`,
    /// `PETITION_MIN_KEYWORD_LEN`, `PETITION_BATCH_SIZE`,
    /// `PETITION_MAX_RETRIES`, `PETITION_RETRY_DELAY_MS`,
    /// `PETITION_CHECK_TIMEOUT_MS`, `PETITION_CACHE_TTL_SECS`,
    /// `PETITION_CACHE_MAX_ENTRIES`.
    pub fn from_env() -> Result<Self, DetectorError> {
        let mut config = Self::default();
        if let Some(v) = env_parse("PETITION_DUPLICATE_THRESHOLD")? {
            config.duplicate_threshold = v;
        }
        if let Some(v) = env_parse("PETITION_WINDOW_DAYS")? {
            config.window_days = v;
        }
        if let Some(v) = env_parse("PETITION_MIN_KEYWORD_LEN")? {
            config.min_keyword_len = v;
        }
        if let Some(v) = env_parse("PETITION_BATCH_SIZE")? {
            config.batch_size = v;
        }
        if let Some(v) = env_parse("PETITION_MAX_RETRIES")? {
            config.max_retries = v;
        }
        if let Some(v) = env_parse("PETITION_RETRY_DELAY_MS")? {
            config.retry_delay_ms = v;
        }
        if let Some(v) = env_parse("PETITION_CHECK_TIMEOUT_MS")? {
            config.check_timeout_ms = v;
        }
        if let Some(v) = env_parse("PETITION_CACHE_TTL_SECS")? {
            config.cache_ttl_secs = v;
        }
        if let Some(v) = env_parse("PETITION_CACHE_MAX_ENTRIES")? {
            config.cache_max_entries = v;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the full configuration
    ///
    /// Checks every weight set (entries in [0, 1], summing to 1), the
    /// threshold range, and the structural fields the pipeline divides by.
    pub fn validate(&self) -> Result<(), DetectorError> {
        self.title_weights
            .validate("title")
            .map_err(|e| DetectorError::InvalidConfiguration(e.to_string()))?;
        self.body_weights
            .validate("body")
            .map_err(|e| DetectorError::InvalidConfiguration(e.to_string()))?;
        self.signal_weights
            .validate("signal")
            .map_err(|e| DetectorError::InvalidConfiguration(e.to_string()))?;

        if !(0.0..=1.0).contains(&self.duplicate_threshold) {
            return Err(DetectorError::InvalidConfiguration(format!(
                "duplicate_threshold {} is outside [0, 1]",
                self.duplicate_threshold
            )));
        }
        if self.batch_size == 0 {
            return Err(DetectorError::InvalidConfiguration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(DetectorError::InvalidConfiguration(
                "max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Backoff delay before the next attempt; grows linearly
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms * attempt as u64)
    }

    /// Overall per-attempt timeout as a Duration
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    /// Verdict cache TTL as a Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Retrieval window as seconds
    pub fn window_secs(&self) -> u64 {
        self.window_days * 86_400
    }
}

fn env_parse<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, DetectorError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().map(Some).map_err(|e| {
            DetectorError::InvalidConfiguration(format!("{}={}: {}", name, raw, e))
        }),
        Err(_) => Ok(None),
    }
}
