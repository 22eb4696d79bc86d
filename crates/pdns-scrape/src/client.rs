//! HTTP fetch of the statistics document.
//!
//! One connection per scrape: connect, send a single GET with the API key,
//! read the whole body. The connect and the full exchange are each bounded
//! so a stalled PowerDNS cannot hold a `/metrics` request forever.

use std::future::Future;

use bytes::Bytes;
use http::header::{ACCEPT, HOST, USER_AGENT};
use http::{HeaderName, Method, Request};
use http_body_util::{BodyExt, Empty, LengthLimitError, Limited};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Header carrying the PowerDNS API key.
pub static X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

const USER_AGENT_VALUE: &str = concat!("pdns-exporter/", env!("CARGO_PKG_VERSION"));

/// Something that can produce a raw statistics document.
pub trait StatisticsSource: Send + Sync {
    /// Fetch one statistics document.
    fn fetch(&self) -> impl Future<Output = ScrapeResult<Bytes>> + Send;
}

/// Fetches statistics from the PowerDNS HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    config: ScrapeConfig,
}

impl HttpSource {
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    async fn exchange(&self) -> ScrapeResult<Bytes> {
        let address = self.config.address();

        let stream = tokio::time::timeout(self.config.connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|_| ScrapeError::ConnectTimeout {
                address: address.to_string(),
                timeout: self.config.connect_timeout,
            })?
            .map_err(|source| ScrapeError::Connect {
                address: address.to_string(),
                source,
            })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(ScrapeError::Request)?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(error = %e, "statistics connection closed with error");
            }
        });

        let req = Request::builder()
            .method(Method::GET)
            .uri(self.config.request_target())
            .header(HOST, self.config.host_header())
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/json")
            .header(&X_API_KEY, self.config.api_key().clone())
            .body(Empty::<Bytes>::new())?;

        let resp = sender.send_request(req).await.map_err(ScrapeError::Request)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status));
        }

        let limit = self.config.max_body_bytes;
        let body = Limited::new(resp.into_body(), limit)
            .collect()
            .await
            .map_err(|e| {
                if e.is::<LengthLimitError>() {
                    ScrapeError::BodyTooLarge(limit)
                } else {
                    ScrapeError::Body(e)
                }
            })?
            .to_bytes();
        Ok(body)
    }
}

impl StatisticsSource for HttpSource {
    async fn fetch(&self) -> ScrapeResult<Bytes> {
        match tokio::time::timeout(self.config.deadline, self.exchange()).await {
            Ok(result) => result,
            Err(_) => Err(ScrapeError::Timeout(self.config.deadline)),
        }
    }
}
