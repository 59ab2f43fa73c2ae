//! Process configuration, read once at startup from the environment.
//!
//! Nothing here is fatal: a missing or invalid value is logged as a warning
//! and replaced by its documented default. The resulting [`Config`] is
//! immutable and handed to the poller by value.
use crate::feed::{default_sources, load_sources, FeedSource};
use crate::http::DEFAULT_REQUEST_TIMEOUT;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_GATEWAY_URL: &str = "http://gateway:8080/ingest";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

pub const GATEWAY_URL_VAR: &str = "GATEWAY_URL";
pub const POLL_INTERVAL_VAR: &str = "POLL_INTERVAL";
pub const FEED_SOURCES_FILE_VAR: &str = "FEED_SOURCES_FILE";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT";

// ============================================================================
// Error Types
// ============================================================================

/// Configuration problems. Reported as warnings, never returned to callers.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid GATEWAY_URL '{value}': {source}")]
    InvalidGatewayUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid POLL_INTERVAL '{0}': expected a positive whole number of seconds")]
    InvalidInterval(String),

    #[error("Invalid REQUEST_TIMEOUT '{0}': expected a positive whole number of seconds")]
    InvalidTimeout(String),
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    /// Ingestion endpoint every payload is POSTed to.
    pub gateway_url: Url,

    /// Pause between the end of one cycle and the start of the next.
    pub poll_interval: Duration,

    /// Bound on each feed fetch and each gateway delivery.
    pub request_timeout: Duration,

    /// Feeds polled each cycle.
    pub sources: Vec<FeedSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            sources: default_sources(),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gateway_url = match get(GATEWAY_URL_VAR) {
            Some(value) => parse_gateway_url(&value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, default = DEFAULT_GATEWAY_URL, "Falling back to default gateway");
                default_gateway_url()
            }),
            None => {
                tracing::warn!(
                    default = DEFAULT_GATEWAY_URL,
                    "{} not set, using default gateway",
                    GATEWAY_URL_VAR
                );
                default_gateway_url()
            }
        };

        let poll_interval = match get(POLL_INTERVAL_VAR) {
            Some(value) => parse_interval(&value).unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    default_secs = DEFAULT_POLL_INTERVAL_SECS,
                    "Falling back to default poll interval"
                );
                Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
            }),
            None => {
                tracing::debug!(
                    default_secs = DEFAULT_POLL_INTERVAL_SECS,
                    "{} not set, using default poll interval",
                    POLL_INTERVAL_VAR
                );
                Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
            }
        };

        let request_timeout = match get(REQUEST_TIMEOUT_VAR) {
            Some(value) => parse_seconds(&value)
                .ok_or_else(|| ConfigError::InvalidTimeout(value.clone()))
                .unwrap_or_else(|e| {
                    tracing::warn!(
                        error = %e,
                        default_secs = DEFAULT_REQUEST_TIMEOUT.as_secs(),
                        "Falling back to default request timeout"
                    );
                    DEFAULT_REQUEST_TIMEOUT
                }),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let sources = match get(FEED_SOURCES_FILE_VAR) {
            Some(path) => match load_sources(Path::new(path.trim())) {
                Ok(sources) => {
                    tracing::info!(path = %path, feeds = sources.len(), "Loaded feed registry");
                    sources
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Falling back to built-in feed registry");
                    default_sources()
                }
            },
            None => default_sources(),
        };

        Self {
            gateway_url,
            poll_interval,
            request_timeout,
            sources,
        }
    }
}

fn default_gateway_url() -> Url {
    // Constant input; parsing it cannot fail
    Url::parse(DEFAULT_GATEWAY_URL).unwrap_or_else(|e| unreachable!("{e}"))
}

fn parse_gateway_url(value: &str) -> Result<Url, ConfigError> {
    let value = value.trim();
    Url::parse(value).map_err(|source| ConfigError::InvalidGatewayUrl {
        value: value.to_string(),
        source,
    })
}

fn parse_interval(value: &str) -> Result<Duration, ConfigError> {
    parse_seconds(value).ok_or_else(|| ConfigError::InvalidInterval(value.to_string()))
}

/// Positive whole seconds; zero and anything non-numeric are rejected.
fn parse_seconds(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
