//! HTTP client wrapper with retry logic.

use crate::error::{FetchError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for downloading boundary layers.
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(request_timeout: Duration, max_retries: u32) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            max_retries,
        })
    }

    /// Download a whole file, retrying transient failures with
    /// exponential backoff.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(err) if attempt < self.max_retries && is_transient(&err) => {
                    attempt += 1;
                    let delay = Duration::from_millis(250 * 2u64.pow(attempt));
                    warn!(url, attempt, ?delay, "retrying fetch: {err}");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(url, len = bytes.len(), "fetched");
        Ok(bytes.to_vec())
    }
}

/// Transport failures and server-side errors are worth retrying;
/// client errors are not.
fn is_transient(err: &FetchError) -> bool {
    match err {
        FetchError::Http(e) => e.is_timeout() || e.is_connect(),
        FetchError::Status { status, .. } => *status >= 500,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = FetchError::Status {
            status: 503,
            url: "http://example.com".to_string(),
        };
        assert!(is_transient(&err));
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = FetchError::Status {
            status: 404,
            url: "http://example.com".to_string(),
        };
        assert!(!is_transient(&err));

        let err = FetchError::Unpack("gzip: truncated".to_string());
        assert!(!is_transient(&err));
    }
}
