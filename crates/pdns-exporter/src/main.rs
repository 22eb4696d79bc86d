//! pdns-exporter — Prometheus exporter for the PowerDNS statistics API.
//!
//! Serves `/metrics`; each request scrapes the PowerDNS statistics
//! endpoint once and renders the result.
//!
//! # Usage
//!
//! ```text
//! pdns-exporter --listen-address :9120 \
//!     --api-url http://localhost:8081/api/v1/servers/localhost/statistics \
//!     --api-key changeme
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use pdns_scrape::{HttpSource, ScrapeConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pdns-exporter", about = "PowerDNS Prometheus exporter", version)]
struct Cli {
    /// Address to listen on for incoming connections.
    #[arg(long, default_value = ":9120")]
    listen_address: String,

    /// PowerDNS statistics endpoint URL.
    #[arg(
        long,
        default_value = "http://localhost:8081/api/v1/servers/localhost/statistics"
    )]
    api_url: String,

    /// PowerDNS API key.
    #[arg(long, default_value = "")]
    api_key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pdns_exporter=debug")),
        )
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let addr = parse_listen_address(&cli.listen_address)?;
    let config = ScrapeConfig::new(&cli.api_url, &cli.api_key)?;
    info!(
        url = %config.url(),
        connect_timeout = ?config.connect_timeout,
        deadline = ?config.deadline,
        "statistics source configured"
    );

    let router = pdns_api::build_router(HttpSource::new(config));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "exporter listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("exporter stopped");
    Ok(())
}

/// Parse a listen address. A bare `:port` listens on all interfaces.
fn parse_listen_address(s: &str) -> anyhow::Result<SocketAddr> {
    let full = match s.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => s.to_string(),
    };
    full.parse::<SocketAddr>()
        .with_context(|| format!("invalid listen address '{s}'"))
}
