//! Normalized document payload sent to the ingestion gateway.

use crate::feed::FeedItem;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Owner recorded on every document this service submits.
pub const USER_ID: &str = "system_feed_poller";

/// Derives the document id for an article link.
///
/// UUID v5 over the RFC 4122 URL namespace, so the same link always maps to
/// the same id in every process. The gateway relies on this to recognize
/// articles that are resubmitted on later cycles.
pub fn document_id(link: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, link.as_bytes()).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPayload {
    pub user_id: String,
    pub document_id: String,
    pub content: String,
    pub metadata: BTreeMap<String, String>,
}

impl NormalizedPayload {
    pub fn from_item(source: &str, item: &FeedItem) -> Self {
        let metadata = BTreeMap::from([
            ("source".to_string(), source.to_string()),
            ("url".to_string(), item.link.clone()),
            ("published".to_string(), item.published.clone()),
            ("type".to_string(), "news".to_string()),
            ("region".to_string(), "global".to_string()),
        ]);

        Self {
            user_id: USER_ID.to_string(),
            document_id: document_id(&item.link),
            content: format!("{}\n\n{}", item.title, item.summary),
            metadata,
        }
    }
}
