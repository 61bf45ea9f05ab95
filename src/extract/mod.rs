// src/extract/mod.rs
// =============================================================================
// This module turns a downloaded page into the links worth following.
//
// Submodules:
// - html: The scraper-based extractor used by the CLI
// =============================================================================

mod html;

pub use html::LinkExtractor;

use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("invalid page URL '{url}': {reason}")]
    InvalidPageUrl { url: String, reason: String },
}

// Anything that can pull same-site links out of a page
//
// Implementations must return absolute URLs with the fragment removed, so
// "/wiki/Rust#History" and "/wiki/Rust" come back as a single entry.
// page_url is the address the content came from; relative links resolve
// against it.
pub trait Extractor: Send + Sync {
    fn extract(&self, page_url: &str, content: &str) -> Result<HashSet<String>, ExtractError>;
}
