//! Exporter regression tests.
//!
//! Drives the full router: `/metrics` → HttpSource → a fake PowerDNS
//! statistics endpoint served on a loopback port.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use pdns_api::build_router;
use pdns_scrape::{HttpSource, ScrapeConfig};
use tower::ServiceExt;

const STATS_PATH: &str = "/api/v1/servers/localhost/statistics";
const API_KEY: &str = "changeme";

const STATISTICS: &str = r#"[
    {"name": "corrupt-packets", "type": "StatisticItem", "value": "0"},
    {"name": "uptime", "type": "StatisticItem", "value": "12345"},
    {"name": "query-types", "type": "MapStatisticItem",
     "value": [{"name": "A Record", "value": "10"}, {"name": "AAAA", "value": "4"}]},
    {"name": "queries", "type": "RingStatisticItem", "size": "10000",
     "value": [{"name": "example.org/A", "value": "9"}]},
    {"name": "shiny-new-thing", "type": "FutureItem", "value": {"nested": true}}
]"#;

/// Start a fake PowerDNS API that requires `X-API-Key` and serves `body`.
async fn spawn_fake_pdns(body: &'static str) -> SocketAddr {
    let app = Router::new().route(
        STATS_PATH,
        get(move |headers: HeaderMap| async move {
            let key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
            if key != Some(API_KEY) {
                return (StatusCode::UNAUTHORIZED, r#"{"error":"Unauthorized"}"#).into_response();
            }
            ([(CONTENT_TYPE, "application/json")], body).into_response()
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn exporter(addr: SocketAddr, api_key: &str) -> Router {
    let config = ScrapeConfig::new(&format!("http://{addr}{STATS_PATH}"), api_key)
        .unwrap()
        .with_timeouts(Duration::from_secs(2), Duration::from_secs(2));
    build_router(HttpSource::new(config))
}

async fn get_metrics(router: Router) -> (StatusCode, String) {
    let req = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn samples(body: &str) -> Vec<&str> {
    body.lines().filter(|l| !l.starts_with('#')).collect()
}

#[tokio::test]
async fn metrics_end_to_end() {
    let addr = spawn_fake_pdns(STATISTICS).await;
    let (status, body) = get_metrics(exporter(addr, API_KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        samples(&body),
        [
            "pdns_auth_corrupt_packets 0",
            "pdns_auth_uptime 12345",
            "pdns_auth_map_query_types_arecord 10",
            "pdns_auth_map_query_types_aaaa 4",
        ]
    );
    assert!(body.contains("# HELP pdns_auth_uptime See PowerDNS statistic 'uptime'.\n"));
    assert!(body.contains("# TYPE pdns_auth_map_query_types_aaaa counter\n"));
    assert!(!body.contains("queries"), "ring statistics must not be exported");
    assert!(!body.contains("shiny"), "unknown types must be dropped");
}

#[tokio::test]
async fn repeated_scrapes_are_identical() {
    let addr = spawn_fake_pdns(STATISTICS).await;
    let router = exporter(addr, API_KEY);

    let (_, first) = get_metrics(router.clone()).await;
    let (_, second) = get_metrics(router).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn wrong_api_key_fails_the_scrape() {
    let addr = spawn_fake_pdns(STATISTICS).await;
    let (status, body) = get_metrics(exporter(addr, "wrong")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("401"), "{body}");
    assert!(samples(&body).iter().all(|l| !l.starts_with("pdns_auth")));
}

#[tokio::test]
async fn bad_number_fails_the_scrape_and_server_keeps_serving() {
    let bad = spawn_fake_pdns(
        r#"[{"name":"uptime","type":"StatisticItem","value":"1"},
            {"name":"latency","type":"StatisticItem","value":"abc"}]"#,
    )
    .await;
    let router = exporter(bad, API_KEY);

    let (status, body) = get_metrics(router.clone()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body.contains("pdns_auth_uptime"));

    // The router keeps answering after a failed cycle.
    let (status, _) = get_metrics(router).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unreachable_upstream_fails_the_scrape() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, body) = get_metrics(exporter(addr, API_KEY)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("failed to connect"), "{body}");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let addr = spawn_fake_pdns(STATISTICS).await;
    let req = Request::builder()
        .uri("/api/v1/servers")
        .body(Body::empty())
        .unwrap();

    let resp = exporter(addr, API_KEY).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
