//! Transport collaborator: request construction and execution.
//!
//! The core components never open sockets themselves. They build an
//! [`ApiRequest`] (URL plus cache directive) and hand it to a [`Transport`].
//! The production transport, [`HttpTransport`], wraps a pooled reqwest
//! client and owns the policies the core explicitly does not: minimum
//! inter-request delay, bounded retry with backoff, and 429 handling.
//! Tests substitute their own `Transport` and never touch the network.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dexcat::net::{ApiRequest, HttpTransport, Transport};
//!
//! # async fn example() -> dexcat::error::Result<()> {
//! let transport = HttpTransport::new()
//!     .with_rate_limit(1000)
//!     .with_header("Referer", "https://mangadex.org");
//!
//! let body = transport
//!     .execute(ApiRequest::force_network(
//!         "https://api.mangadex.org/manga?limit=20",
//!     ))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{Error, Result};

/// Pooled HTTP client shared by every [`HttpTransport`].
///
/// 30-second timeout, connection pooling, gzip and brotli decompression,
/// crate User-Agent. Created lazily on first use.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("dexcat/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to build HTTP client")
});

/// Cache directive attached to an outbound request.
///
/// Search requests use [`CachePolicy::ForceNetwork`] so results are never
/// served from an intermediate HTTP cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Let intermediate caches answer.
    Default,
    /// Bypass caches and hit the origin (`Cache-Control: no-cache`).
    ForceNetwork,
}

/// One outbound GET request as the core constructs it.
///
/// Method is always GET; the header set comes from the transport's
/// configuration, not from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Fully-formed request URL, query string included.
    pub url: String,

    /// Cache directive for this request.
    pub cache: CachePolicy,
}

impl ApiRequest {
    /// A GET request with the default cache policy.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cache: CachePolicy::Default,
        }
    }

    /// A GET request that must bypass intermediate caches.
    pub fn force_network(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cache: CachePolicy::ForceNetwork,
        }
    }
}

/// Executes requests on behalf of the core components.
///
/// Implementations own every transport policy: pooling, timeouts, retry,
/// rate limiting, cancellation. A failed or cancelled request returns an
/// error; no partial body is ever produced.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request and returns the full response body.
    async fn execute(&self, request: ApiRequest) -> Result<Bytes>;
}

/// Minimum-delay limiter for one transport's requests.
///
/// Tracks the last request instant behind a mutex and sleeps off the
/// remainder of the configured delay before the next request.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    delay: Duration,
}

impl RateLimiter {
    /// Creates a rate limiter with the given minimum delay.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Waits until at least the configured delay has passed since the
    /// previous request, then records the new request instant.
    pub async fn wait(&self) {
        let wait_duration = {
            let last = self.last_request.lock();
            match *last {
                Some(instant) => self.delay.checked_sub(instant.elapsed()),
                None => None,
            }
        };

        if let Some(duration) = wait_duration {
            tokio::time::sleep(duration).await;
        }

        *self.last_request.lock() = Some(Instant::now());
    }
}

/// Production transport backed by the pooled reqwest client.
///
/// Carries the constructor-injected header set (auth and session headers
/// included, treated as opaque) and applies rate limiting and bounded
/// retry around every request.
#[derive(Debug)]
pub struct HttpTransport {
    headers: HeaderMap,
    rate_limiter: RateLimiter,
    max_retries: u32,
}

impl HttpTransport {
    /// Creates a transport with default policies: 200ms between requests,
    /// up to 3 retries.
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
            rate_limiter: RateLimiter::new(200),
            max_retries: 3,
        }
    }

    /// Sets the minimum delay between requests.
    pub fn with_rate_limit(mut self, delay_ms: u64) -> Self {
        self.rate_limiter = RateLimiter::new(delay_ms);
        self
    }

    /// Sets the maximum number of retries for failed requests.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Adds a header to every request made by this transport.
    ///
    /// Invalid header names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<HeaderValue>(),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Replaces the whole header set with a caller-supplied map.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Bytes> {
        let mut attempts = 0;

        loop {
            self.rate_limiter.wait().await;

            let mut headers = self.headers.clone();
            if request.cache == CachePolicy::ForceNetwork {
                headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            }

            debug!(url = %request.url, cache = ?request.cache, "GET");

            match CLIENT.get(&request.url).headers(headers).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(response.bytes().await?);
                    }

                    if response.status() == 429 {
                        if attempts < self.max_retries {
                            attempts += 1;
                            let delay = Duration::from_secs(2_u64.pow(attempts));
                            tokio::time::sleep(delay).await;
                            continue;
                        }

                        let retry_after = response
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok());

                        return Err(Error::rate_limit(retry_after));
                    }

                    return Err(Error::http(response.status().to_string()));
                }
                Err(e) => {
                    if attempts < self.max_retries {
                        attempts += 1;
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
