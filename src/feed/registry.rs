use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Built-in feed sources polled when no registry file is configured.
const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("yahoo_finance", "https://finance.yahoo.com/news/rssindex"),
    ("coindesk", "https://www.coindesk.com/arc/outboundfeeds/rss/"),
    ("wsj_markets", "https://feeds.a.dj.com/rss/RSSMarketsMain.xml"),
];

/// Maximum registry file size (1 MB).
const MAX_FILE_SIZE: u64 = 1_048_576;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read feed registry: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in feed registry: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid URL for feed '{name}': {source}")]
    InvalidSourceUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Feed registry is too large ({0} bytes)")]
    TooLarge(u64),

    #[error("Feed registry contains no feeds")]
    Empty,
}

/// A named feed address. Cloning is cheap: the name is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: Arc<str>,
    pub address: Url,
}

impl FeedSource {
    pub fn new(name: &str, address: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            name: Arc::from(name),
            address: Url::parse(address)?,
        })
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default)]
    feed: Vec<RegistryEntry>,
}

#[derive(Deserialize)]
struct RegistryEntry {
    name: String,
    url: String,
}

/// Returns the built-in registry.
pub fn default_sources() -> Vec<FeedSource> {
    DEFAULT_FEEDS
        .iter()
        .filter_map(|(name, address)| match FeedSource::new(name, address) {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::error!(source = %name, error = %e, "Built-in feed address is invalid");
                None
            }
        })
        .collect()
}

/// Loads a registry from a TOML file of `[[feed]]` tables.
///
/// ```toml
/// [[feed]]
/// name = "coindesk"
/// url = "https://www.coindesk.com/arc/outboundfeeds/rss/"
/// ```
///
/// The whole file is rejected if any entry has an unparsable URL, so a typo
/// never silently drops a source.
pub fn load_sources(path: &Path) -> Result<Vec<FeedSource>, RegistryError> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_FILE_SIZE {
        return Err(RegistryError::TooLarge(meta.len()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_sources(&content)
}

fn parse_sources(content: &str) -> Result<Vec<FeedSource>, RegistryError> {
    let file: RegistryFile = toml::from_str(content)?;
    if file.feed.is_empty() {
        return Err(RegistryError::Empty);
    }

    file.feed
        .into_iter()
        .map(|entry| {
            let name = entry.name.trim();
            FeedSource::new(name, entry.url.trim()).map_err(|source| {
                RegistryError::InvalidSourceUrl {
                    name: name.to_string(),
                    source,
                }
            })
        })
        .collect()
}
