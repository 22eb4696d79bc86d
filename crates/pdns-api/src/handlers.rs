//! HTTP handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use pdns_scrape::{ScrapeError, ScrapeResult, StatisticsSource, scrape};
use pdns_stats::render_prometheus;

use crate::ApiState;

/// GET /metrics
///
/// A failed cycle answers 503 with the error text and no samples, so the
/// collector records a failed scrape instead of a partial one.
pub async fn prometheus_metrics<S: StatisticsSource + 'static>(
    State(state): State<ApiState<S>>,
) -> Response {
    match collect(state.source.as_ref()).await {
        Ok(body) => {
            debug!(bytes = body.len(), "serving metrics");
            (
                StatusCode::OK,
                [(CONTENT_TYPE, pdns_stats::CONTENT_TYPE)],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "scrape failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("scrape failed: {e}\n"),
            )
                .into_response()
        }
    }
}

async fn collect<S: StatisticsSource>(source: &S) -> ScrapeResult<String> {
    let metrics = scrape(source).await?;
    render_prometheus(&metrics).map_err(ScrapeError::from)
}
