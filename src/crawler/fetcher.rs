//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the pipeline, including:
//! - Building the shared HTTP client with a browser user agent
//! - GET requests returning status, content type and body
//! - Retry logic for transient failures
//! - Error classification

use crate::config::HttpConfig;
use crate::HarvestError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// A completed HTTP exchange
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header value, or "" when absent
    pub content_type: String,
    /// Response body
    pub body: Vec<u8>,
}

impl FetchResult {
    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed up to `max_redirects` hops, and responses are
/// transparently decompressed.
///
/// # Example
///
/// ```no_run
/// use sitemap_harvest::config::HttpConfig;
/// use sitemap_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Shared fetcher used by every stage of the pipeline
///
/// Cloning is cheap: the underlying client is reference counted and all
/// clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher from HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(config)?,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Fetches a URL, retrying transient failures
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | 2xx, 3xx, 4xx | Returned as-is |
    /// | HTTP 5xx | Retry, then return the last response |
    /// | Timeout | Retry, then `HarvestError::Timeout` |
    /// | Connection refused | Retry, then `HarvestError::Http` |
    /// | Any other transport error | Immediate `HarvestError::Http` |
    ///
    /// A non-2xx status is not an error here; callers decide what a status
    /// means for them.
    pub async fn fetch(&self, url: &str) -> Result<FetchResult, HarvestError> {
        let mut attempt = 0;

        loop {
            let outcome = self.fetch_once(url).await;
            let retryable = match &outcome {
                Ok(result) => result.status.is_server_error(),
                Err(HarvestError::Timeout { .. }) => true,
                Err(HarvestError::Http { source, .. }) => source.is_connect(),
                Err(_) => false,
            };

            if !retryable || attempt >= self.max_retries {
                return outcome;
            }

            attempt += 1;
            tracing::debug!(
                "Retrying {} (attempt {}/{}) after transient failure",
                url,
                attempt,
                self.max_retries
            );
            tokio::time::sleep(self.retry_delay).await;
        }
    }

    /// Fetches a URL and requires a 2xx status
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The decoded body
    /// * `Err(HarvestError::HttpStatus)` - The server answered with a non-2xx status
    /// * `Err(HarvestError)` - The request itself failed
    pub async fn fetch_text(&self, url: &str) -> Result<String, HarvestError> {
        let result = self.fetch(url).await?;
        if !result.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: result.status.as_u16(),
            });
        }
        Ok(result.text())
    }

    async fn fetch_once(&self, url: &str) -> Result<FetchResult, HarvestError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?
            .to_vec();

        tracing::trace!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchResult {
            status,
            content_type,
            body,
        })
    }
}

/// Maps a transport error onto the crate's error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
