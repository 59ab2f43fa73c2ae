use chrono::SecondsFormat;
use feed_rs::parser;

/// A single entry from a parsed feed. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    /// RFC 3339 timestamp, or empty when the entry carries no date.
    pub published: String,
}

/// Parses RSS/Atom bytes into items, preserving the feed's own ordering.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>, parser::ParseFeedError> {
    let feed = parser::parse(bytes)?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            let published = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default();
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();
            let title = entry.title.map(|t| t.content).unwrap_or_default();

            FeedItem {
                title,
                summary,
                link,
                published,
            }
        })
        .collect();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rss_items_in_order() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <title>Markets</title>
    <item>
        <title>First</title>
        <description>One</description>
        <link>https://example.com/1</link>
        <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
    </item>
    <item>
        <title>Second</title>
        <description>Two</description>
        <link>https://example.com/2</link>
    </item>
</channel></rss>"#;

        let items = parse_feed(rss.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            FeedItem {
                title: "First".into(),
                summary: "One".into(),
                link: "https://example.com/1".into(),
                published: "2024-01-01T12:00:00Z".into(),
            }
        );
        assert_eq!(items[1].title, "Second");
        assert_eq!(items[1].published, "");
    }

    #[test]
    fn test_parse_atom_uses_updated_when_unpublished() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>Example</title>
    <id>urn:example</id>
    <updated>2024-02-01T00:00:00Z</updated>
    <entry>
        <title>Atom entry</title>
        <id>urn:example:1</id>
        <link href="https://example.com/atom/1"/>
        <updated>2024-02-01T08:30:00Z</updated>
        <summary>Short</summary>
    </entry>
</feed>"#;

        let items = parse_feed(atom.as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://example.com/atom/1");
        assert_eq!(items[0].published, "2024-02-01T08:30:00Z");
        assert_eq!(items[0].summary, "Short");
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><item><guid isPermaLink="false">1</guid></item></channel></rss>"#;

        let items = parse_feed(rss.as_bytes()).unwrap();
        assert_eq!(items, vec![FeedItem::default()]);
    }

    #[test]
    fn test_malformed_input() {
        assert!(parse_feed(b"<not valid xml").is_err());
    }
}
