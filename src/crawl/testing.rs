// src/crawl/testing.rs
// =============================================================================
// An in-memory website for the crawl tests.
//
// FakeSite answers fetches from a map instead of the network, can time out
// a URL a set number of times, and counts every fetch per URL.
// LineExtractor reads one link per line, so page content stays readable.
// =============================================================================

use crate::extract::{ExtractError, Extractor};
use crate::fetch::{FetchError, Fetcher};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    timeouts_left: Mutex<HashMap<String, usize>>,
    fetches: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    // A page whose content lists `links`, one per line
    pub fn page(self, url: &str, links: &[&str]) -> Self {
        self.raw(url, &links.join("\n"))
    }

    pub fn raw(mut self, url: &str, content: &str) -> Self {
        self.pages.insert(url.to_string(), content.to_string());
        self
    }

    // The first `count` fetches of `url` time out
    pub fn timeouts(self, url: &str, count: usize) -> Self {
        self.timeouts_left
            .lock()
            .unwrap()
            .insert(url.to_string(), count);
        self
    }

    // Every fetch sleeps first, to let workers overlap
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Fetcher for FakeSite {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        *self.fetches.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        {
            let mut timeouts = self.timeouts_left.lock().unwrap();
            if let Some(left) = timeouts.get_mut(url) {
                if *left > 0 {
                    *left -= 1;
                    return Err(FetchError::Timeout);
                }
            }
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Network(format!("no route to {}", url)))
    }
}

pub struct LineExtractor;

impl LineExtractor {
    pub const BROKEN: &'static str = "!broken";
    pub const PANIC: &'static str = "!panic";
}

impl Extractor for LineExtractor {
    fn extract(&self, page_url: &str, content: &str) -> Result<HashSet<String>, ExtractError> {
        if content == Self::PANIC {
            panic!("extractor blew up on {}", page_url);
        }
        if content == Self::BROKEN {
            return Err(ExtractError::InvalidPageUrl {
                url: page_url.to_string(),
                reason: "unparseable page".to_string(),
            });
        }

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
