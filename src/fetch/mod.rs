// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// The crawl engine only knows about the Fetcher trait below, so tests can
// plug in a fake site and the binary plugs in the real HTTP client.
//
// Submodules:
// - http: The reqwest-based fetcher used by the CLI
// =============================================================================

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch did not produce a page.
///
/// Only `Timeout` is retried by the crawler; everything else is final for
/// that task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout)
    }
}

// Anything that can turn a URL into page content
//
// The timeout is the fetcher's job: the crawler passes it in and expects a
// FetchError::Timeout back once it has elapsed.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_timeout_is_timeout() {
        assert!(FetchError::Timeout.is_timeout());
        assert!(!FetchError::Status(404).is_timeout());
        assert!(!FetchError::Network("reset".to_string()).is_timeout());
    }
}
