//! Error types for statistics decoding and exposition.

use thiserror::Error;

/// Result type alias for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that abort a scrape cycle.
///
/// Unknown statistic types are deliberately absent: they are dropped,
/// not reported.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to decode statistics document: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("statistic '{statistic}': value {value} is not a number")]
    InvalidNumber { statistic: String, value: String },

    #[error("'{0}' is not a valid Prometheus metric name")]
    InvalidMetricName(String),

    #[error("metric '{0}' produced more than once")]
    DuplicateMetric(String),
}
