//! Polls a fixed set of RSS/Atom feeds and forwards the newest items of each
//! to an ingestion gateway as normalized JSON documents.
//!
//! - [`config`] - Immutable process configuration read from the environment
//! - [`feed`] - Feed registry, fetching, and parsing
//! - [`payload`] - Normalized document payload and link-derived document ids
//! - [`delivery`] - Single-attempt POST to the gateway with status classification
//! - [`poller`] - Fan-out/join poll cycles on a fixed interval
//! - [`http`] - Shared HTTP client and the default per-request timeout
//! - [`util`] - Character-safe truncation for log lines

pub mod config;
pub mod delivery;
pub mod feed;
pub mod http;
pub mod payload;
pub mod poller;
pub mod util;

pub use config::Config;
pub use poller::{CycleReport, Poller, SourceOutcome, SourceReport};
