//! Wire-contract tests for the document sent to the gateway.

use feedwire::feed::{parse_feed, FeedItem};
use feedwire::payload::{document_id, NormalizedPayload, USER_ID};
use pretty_assertions::assert_eq;

#[test]
fn test_payload_from_minimal_item() {
    let item = FeedItem {
        title: "T".to_string(),
        summary: "S".to_string(),
        link: "https://x/1".to_string(),
        published: "2024-01-01".to_string(),
    };

    let payload = NormalizedPayload::from_item("coindesk", &item);

    assert_eq!(payload.user_id, USER_ID);
    assert_eq!(payload.content, "T\n\nS");
    assert_eq!(payload.metadata["source"], "coindesk");
    assert_eq!(payload.metadata["type"], "news");
    assert_eq!(payload.document_id, document_id("https://x/1"));
}

#[test]
fn test_parsed_feed_to_payload() {
    let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item>
        <title>Fed holds rates</title>
        <description>Policy unchanged.</description>
        <link>https://news.example.com/fed</link>
        <pubDate>Wed, 31 Jan 2024 19:00:00 GMT</pubDate>
    </item>
</channel></rss>"#;

    let items = parse_feed(rss.as_bytes()).unwrap();
    let payload = NormalizedPayload::from_item("wsj_markets", &items[0]);
    let json = serde_json::to_string(&payload).unwrap();

    assert_eq!(
        json,
        format!(
            concat!(
                r#"{{"user_id":"system_feed_poller","document_id":"{}","#,
                r#""content":"Fed holds rates\n\nPolicy unchanged.","#,
                r#""metadata":{{"published":"2024-01-31T19:00:00Z","region":"global","#,
                r#""source":"wsj_markets","type":"news","url":"https://news.example.com/fed"}}}}"#
            ),
            document_id("https://news.example.com/fed")
        )
    );
}

#[test]
fn test_document_id_stable_across_calls() {
    let link = "https://www.coindesk.com/markets/2024/01/01/story/";
    let first = document_id(link);
    let second = document_id(&link.to_string());
    assert_eq!(first, second);
}
