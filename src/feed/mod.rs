//! Feed sources and feed retrieval.
//!
//! - [`registry`] - The set of named feed addresses polled each cycle
//! - [`fetcher`] - Single-shot HTTP retrieval with size and time limits
//! - [`parser`] - RSS/Atom parsing via the `feed-rs` crate

mod fetcher;
mod parser;
mod registry;

pub use fetcher::{fetch_feed, FetchError};
pub use parser::{parse_feed, FeedItem};
pub use registry::{default_sources, load_sources, FeedSource, RegistryError};
