//! HTTP fetcher implementation
//!
//! This module handles every outbound request of a run:
//! - Building the HTTP client with browser-like headers
//! - Single-attempt GET requests with per-kind timeouts
//! - Error classification into [`FetchError`] kinds
//!
//! There is no retry logic; a failed request is reported to the caller,
//! which decides whether to skip the page.

use crate::config::{Config, UserAgentConfig};
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use std::time::Duration;

/// Kind of page being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Paginated catalog listing
    Listing,
    /// Per-app detail page
    Detail,
}

/// Issues GET requests for listing and detail pages
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    referer: String,
    listing_timeout: Duration,
    detail_timeout: Duration,
}

/// Builds an HTTP client with proper configuration
///
/// The client sends the configured browser User-Agent and Accept-Language
/// on every request.
///
/// # Example
///
/// ```no_run
/// use catalog_sieve::config::UserAgentConfig;
/// use catalog_sieve::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&config.accept_language) {
        Ok(value) => {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        Err(_) => {
            tracing::warn!(
                "Ignoring invalid Accept-Language header value: {}",
                config.accept_language
            );
        }
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .build()
}

impl PageFetcher {
    /// Creates a fetcher from the run configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
            referer: config.referer(),
            listing_timeout: Duration::from_secs(config.crawler.listing_timeout_secs),
            detail_timeout: Duration::from_secs(config.crawler.detail_timeout_secs),
        })
    }

    /// Timeout applied to a request kind
    pub fn timeout_for(&self, kind: RequestKind) -> Duration {
        match kind {
            RequestKind::Listing => self.listing_timeout,
            RequestKind::Detail => self.detail_timeout,
        }
    }

    /// Fetches a page and returns its body as text
    ///
    /// Detail requests carry the site referer. Any non-2xx status or
    /// transport error is returned as a [`FetchError`]. The body is decoded
    /// as UTF-8, replacing invalid sequences.
    pub async fn fetch(&self, url: &str, kind: RequestKind) -> Result<String, FetchError> {
        let mut request = self.client.get(url).timeout(self.timeout_for(kind));
        if kind == RequestKind::Detail {
            request = request.header(REFERER, self.referer.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        tracing::debug!("Fetched {} ({} bytes)", url, bytes.len());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Maps a reqwest send error to a fetch error kind
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
