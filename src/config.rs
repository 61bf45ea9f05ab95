// src/config.rs
// =============================================================================
// This module holds the crawl settings.
//
// The defaults are the crawler's startup constants:
// - DOMAIN      = https://en.wikipedia.org
// - SEED_PATH   = /wiki/Python_(programming_language)
// - MAX_DEPTH   = 1
// - MAX_RETRIES = 5
// - MAX_WORKERS = 20
// - TIMEOUT     = 10 seconds per fetch
//
// The CLI (src/cli.rs) overrides any of them and hands us a CrawlConfig.
// =============================================================================

use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_DOMAIN: &str = "https://en.wikipedia.org";
pub const DEFAULT_SEED_PATH: &str = "/wiki/Python_(programming_language)";
pub const DEFAULT_MAX_DEPTH: usize = 1;
pub const DEFAULT_MAX_RETRIES: usize = 5;
pub const DEFAULT_MAX_WORKERS: usize = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Only article pages: /wiki/<name> with no namespace prefix (no ':')
pub const DEFAULT_PATH_PATTERN: &str = r"^/wiki/[^:#\s]+$";

/// Problems with the settings, reported before any worker starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid domain '{domain}': {source}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: url::ParseError,
    },

    #[error("domain '{0}' has no host")]
    MissingHost(String),

    #[error("invalid seed path '{path}': {source}")]
    InvalidSeed {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("max_workers must be at least 1")]
    NoWorkers,

    #[error("invalid path pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

// Everything the crawler needs to know before it starts
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Site scope: only links on this host are followed
    pub domain: String,
    /// Path of the first page, joined onto the domain
    pub seed_path: String,
    /// Maximum link-hops from the seed (seed = 0)
    pub max_depth: usize,
    /// How many times a timed-out fetch is re-queued before giving up
    pub max_retries: usize,
    /// Number of workers in the pool
    pub max_workers: usize,
    /// Per-fetch timeout, enforced by the fetcher
    pub timeout: Duration,
    /// Optional regex on the URL path; links that don't match are ignored
    pub path_pattern: Option<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            seed_path: DEFAULT_SEED_PATH.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_retries: DEFAULT_MAX_RETRIES,
            max_workers: DEFAULT_MAX_WORKERS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            path_pattern: Some(DEFAULT_PATH_PATTERN.to_string()),
        }
    }
}

impl CrawlConfig {
    // Parses the domain and makes sure it has a host we can compare against
    pub fn domain_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.domain).map_err(|source| ConfigError::InvalidDomain {
            domain: self.domain.clone(),
            source,
        })?;

        if url.host_str().is_none() {
            return Err(ConfigError::MissingHost(self.domain.clone()));
        }

        Ok(url)
    }

    // The absolute URL of the first page to crawl
    //
    // Example:
    //   domain = "https://en.wikipedia.org", seed_path = "/wiki/Rust"
    //   result = "https://en.wikipedia.org/wiki/Rust"
    pub fn seed_url(&self) -> Result<String, ConfigError> {
        let domain = self.domain_url()?;
        let seed = domain
            .join(&self.seed_path)
            .map_err(|source| ConfigError::InvalidSeed {
                path: self.seed_path.clone(),
                source,
            })?;
        Ok(seed.to_string())
    }

    // Checks everything up front so the crawl itself never has to
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        self.seed_url()?;
        if let Some(pattern) = &self.path_pattern {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_workers, 20);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seed_url_joins_domain_and_path() {
        let config = CrawlConfig::default();
        assert_eq!(
            config.seed_url().unwrap(),
            "https://en.wikipedia.org/wiki/Python_(programming_language)"
        );
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = CrawlConfig {
            max_workers: 0,
            ..CrawlConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoWorkers)));
    }

    #[test]
    fn test_rejects_bad_domain() {
        let config = CrawlConfig {
            domain: "not a url".to_string(),
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let config = CrawlConfig {
            path_pattern: Some("(".to_string()),
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
