use crate::feed::parser::{parse_feed, FeedItem};
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while retrieving a feed.
///
/// Every variant is scoped to a single source: the worker logs it and skips
/// that source for the rest of the cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the caller's timeout
    #[error("Request timed out")]
    Timeout,
    /// Feed XML could not be parsed as RSS or Atom
    #[error("Parse error: {0}")]
    Parse(String),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Fetches and parses the feed at `address`.
///
/// Makes exactly one request. Items come back in the order the feed lists
/// them. `timeout` covers the whole exchange, body included, so a stalled
/// server cannot hold the caller longer than that.
///
/// # Errors
///
/// - [`FetchError::Network`] - Connection or TLS errors, or a body cut short
///   of its Content-Length
/// - [`FetchError::Timeout`] - Request exceeded `timeout`
/// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
/// - [`FetchError::ResponseTooLarge`] - Response exceeded 10MB
/// - [`FetchError::Parse`] - Invalid RSS/Atom XML
pub async fn fetch_feed(
    client: &reqwest::Client,
    address: &Url,
    timeout: Duration,
) -> Result<Vec<FeedItem>, FetchError> {
    let bytes = tokio::time::timeout(timeout, fetch_bytes(client, address))
        .await
        .map_err(|_| FetchError::Timeout)??;

    parse_feed(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
}

async fn fetch_bytes(client: &reqwest::Client, address: &Url) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(address.as_str())
        .send()
        .await
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    read_limited_bytes(response, MAX_FEED_SIZE).await
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header. A body shorter than the header
    // surfaces as a stream error from the HTTP stack.
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
