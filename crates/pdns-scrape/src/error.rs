//! Error types for the scrape cycle.

use std::time::Duration;

use pdns_stats::StatsError;
use thiserror::Error;

/// Result type alias for scrape operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Anything that aborts a scrape cycle.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid statistics URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid API key: {0}")]
    InvalidApiKey(#[from] http::header::InvalidHeaderValue),

    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no connection to {address} within {timeout:?}")]
    ConnectTimeout { address: String, timeout: Duration },

    #[error("scrape did not complete within {0:?}")]
    Timeout(Duration),

    #[error("failed to build request: {0}")]
    Build(#[from] http::Error),

    #[error("request failed: {0}")]
    Request(#[source] hyper::Error),

    #[error("statistics endpoint returned {0}")]
    Status(http::StatusCode),

    #[error("failed to read response body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("response body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
