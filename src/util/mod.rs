//! Utility functions for common operations.
//!
//! - **Text processing**: character-safe truncation and log-line sanitizing
//!   for feed-supplied strings

mod text;

pub use text::{log_excerpt, truncate_chars};
