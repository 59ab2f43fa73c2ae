use crate::payload::NormalizedPayload;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors from a single delivery attempt. Each one skips only the item it
/// belongs to.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Payload could not be encoded as JSON; no request was made
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Network-level failure reaching the gateway
    #[error("Connection failed: {0}")]
    Connection(#[source] reqwest::Error),
    /// Gateway did not answer within the caller's timeout
    #[error("Request timed out")]
    Timeout,
    /// Gateway answered with something other than 202 Accepted
    #[error("Gateway error: status {0}")]
    Rejected(u16),
}

/// POSTs one payload to the gateway.
///
/// Exactly one attempt is made. Only `202 Accepted` counts as success;
/// any other status, including other 2xx codes, is [`DeliveryError::Rejected`].
pub async fn deliver(
    client: &reqwest::Client,
    gateway: &Url,
    payload: &NormalizedPayload,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    let body = serde_json::to_vec(payload)?;

    let request = client
        .post(gateway.as_str())
        .header(CONTENT_TYPE, "application/json")
        .body(body);

    let response = tokio::time::timeout(timeout, request.send())
        .await
        .map_err(|_| DeliveryError::Timeout)?
        .map_err(DeliveryError::Connection)?;

    if response.status() != StatusCode::ACCEPTED {
        return Err(DeliveryError::Rejected(response.status().as_u16()));
    }

    Ok(())
}
