//! Transport configuration for the statistics endpoint.

use std::time::Duration;

use http::uri::Scheme;
use http::{HeaderValue, Uri};

use crate::error::{ScrapeError, ScrapeResult};

/// Default bound on TCP connection establishment.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on a whole exchange, connect included.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Default cap on the statistics document size.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Where and how to fetch statistics.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    url: Uri,
    address: String,
    api_key: HeaderValue,
    /// Bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Bound on the full exchange, measured from the start of the connect.
    pub deadline: Duration,
    /// Largest response body accepted.
    pub max_body_bytes: usize,
}

impl ScrapeConfig {
    /// Validate the endpoint URL and API key, with the default timeouts.
    ///
    /// Only plain `http://` endpoints are supported.
    pub fn new(url: &str, api_key: &str) -> ScrapeResult<Self> {
        let invalid = |reason: &str| ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| invalid(&e.to_string()))?;
        if uri.scheme() != Some(&Scheme::HTTP) {
            return Err(invalid("scheme must be http"));
        }
        let Some(host) = uri.host() else {
            return Err(invalid("missing host"));
        };
        let address = format!("{host}:{}", uri.port_u16().unwrap_or(80));

        let mut api_key = HeaderValue::from_str(api_key)?;
        api_key.set_sensitive(true);

        Ok(Self {
            url: uri,
            address,
            api_key,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            deadline: DEFAULT_DEADLINE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    /// Override both timeouts.
    pub fn with_timeouts(mut self, connect_timeout: Duration, deadline: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.deadline = deadline;
        self
    }

    /// Override the response body cap.
    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// The statistics endpoint.
    pub fn url(&self) -> &Uri {
        &self.url
    }

    /// `host:port` to connect to.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Value for the `Host` header.
    pub(crate) fn host_header(&self) -> &str {
        self.url.authority().map(|a| a.as_str()).unwrap_or(&self.address)
    }

    /// Origin-form request target.
    pub(crate) fn request_target(&self) -> &str {
        self.url.path_and_query().map(|p| p.as_str()).unwrap_or("/")
    }

    pub(crate) fn api_key(&self) -> &HeaderValue {
        &self.api_key
    }
}
