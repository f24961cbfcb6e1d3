//! Outbound link extraction and integrity checking for article HTML.

pub mod checker;
pub mod extract;
pub mod handlers;

pub use checker::{LinkCheckResult, LinkChecker, LinkStatus};
pub use extract::extract_links;
