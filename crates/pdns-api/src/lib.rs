//! pdns-api — the collector-facing HTTP surface.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/metrics` | Scrape PowerDNS once and render Prometheus exposition |
//!
//! Every request runs its own scrape cycle. There is no cache and no
//! background polling; the collector's scrape interval is the only clock.

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use pdns_scrape::StatisticsSource;

/// Shared state for API handlers.
pub struct ApiState<S> {
    pub source: Arc<S>,
}

impl<S> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

/// Build the exporter router.
pub fn build_router<S: StatisticsSource + 'static>(source: S) -> Router {
    let state = ApiState {
        source: Arc::new(source),
    };

    Router::new()
        .route("/metrics", get(handlers::prometheus_metrics::<S>))
        .with_state(state)
}
