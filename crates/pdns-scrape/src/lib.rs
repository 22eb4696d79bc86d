//! pdns-scrape — one scrape cycle against the PowerDNS statistics API.
//!
//! # Architecture
//!
//! ```text
//! scrape(source)
//!   ├── StatisticsSource::fetch() → raw JSON body
//!   │     └── HttpSource: hyper http1, bounded connect + deadline, X-API-Key
//!   ├── decode_envelopes() → Vec<StatisticEnvelope>
//!   ├── classify() → scalars / maps / rings
//!   └── emit() → Vec<OutputMetric>
//! ```
//!
//! A cycle either yields the complete metric set or an error; it never
//! yields a partial set. Nothing is retried and nothing is carried over
//! between cycles.

pub mod client;
pub mod config;
pub mod error;

pub use client::{HttpSource, StatisticsSource, X_API_KEY};
pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_DEADLINE, DEFAULT_MAX_BODY_BYTES, ScrapeConfig,
};
pub use error::{ScrapeError, ScrapeResult};

use pdns_stats::{OutputMetric, classify, decode_envelopes, emit};
use tracing::debug;

/// Run one scrape cycle: fetch, decode, classify, emit.
pub async fn scrape<S: StatisticsSource>(source: &S) -> ScrapeResult<Vec<OutputMetric>> {
    let body = source.fetch().await?;
    let envelopes = decode_envelopes(&body)?;
    let statistics = classify(&envelopes)?;
    let metrics = emit(&statistics);

    debug!(
        bytes = body.len(),
        envelopes = envelopes.len(),
        scalars = statistics.scalars.len(),
        maps = statistics.maps.len(),
        rings = statistics.rings.len(),
        metrics = metrics.len(),
        "scrape cycle complete"
    );

    Ok(metrics)
}
