//! Download functionality for remote resources
//!
//! `Fetcher` is the transport seam: given a URL it yields the response bytes
//! or a `FetchError`. `HttpFetcher` is the reqwest-backed implementation,
//! streaming the body with a size ceiling and a per-request timeout.
//!
//! ## Usage
//!
//! ```ignore
//! use kodegen_tools_inline_resource::inline_resource::downloaders::{Fetcher, HttpFetcher};
//!
//! let fetcher = HttpFetcher::new(std::time::Duration::from_secs(10), 1024 * 1024);
//! let bytes = fetcher.fetch("https://cdn.example.com/lib.js").await?;
//! ```

use futures::StreamExt;
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;

use crate::error::FetchError;
use crate::utils::{ACCEPTED_FETCH_STATUS, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_REMOTE_SIZE, FETCH_USER_AGENT};

/// Transport used to obtain remote content
pub trait Fetcher: Send + Sync {
    /// Fetch `url`. Only 200 and 204 count as success; 204 yields no bytes.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    max_size: usize,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            DEFAULT_MAX_REMOTE_SIZE,
        )
    }
}

impl HttpFetcher {
    #[must_use]
    pub fn new(timeout: Duration, max_size: usize) -> Self {
        Self::with_client(Client::new(), timeout, max_size)
    }

    /// Reuse an existing client (it is `Arc` internally, so clones are cheap)
    #[must_use]
    pub fn with_client(client: Client, timeout: Duration, max_size: usize) -> Self {
        Self {
            client,
            timeout,
            max_size,
        }
    }

    async fn fetch_core(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header("User-Agent", FETCH_USER_AGENT)
            .header("Accept", "*/*")
            .send()
            .await
            .map_err(|e| request_error(url, &e))?;

        let status = response.status().as_u16();
        if !ACCEPTED_FETCH_STATUS.contains(&status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        if status == 204 {
            return Ok(Vec::new());
        }

        // Enforce limit BEFORE downloading
        let expected_size = response.content_length().unwrap_or(0);
        if expected_size > self.max_size as u64 {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                size: expected_size,
                limit: self.max_size,
            });
        }

        let mut buffer = if expected_size > 0 {
            Vec::with_capacity(expected_size as usize)
        } else {
            Vec::new()
        };

        // Content-Length can be absent or wrong; check while streaming too
        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| request_error(url, &e))?;

            let new_total = buffer.len() + chunk.len();
            if new_total > self.max_size {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    size: new_total as u64,
                    limit: self.max_size,
                });
            }

            buffer.extend_from_slice(&chunk);
        }

        log::debug!("Fetched {} bytes from {url}", buffer.len());
        Ok(buffer)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        Box::pin(self.fetch_core(url))
    }
}

fn request_error(url: &str, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::RequestFailed {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
