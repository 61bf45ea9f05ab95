// src/crawl/visited.rs
// =============================================================================
// Tracks every URL a worker has taken responsibility for.
//
// A worker must claim a URL before fetching it. claim() checks and marks in
// one step under the lock, so two workers holding tasks for the same URL
// can never both win: the loser skips its task.
//
// The claim stays in place while the page is retried after a timeout
// (state InFlight), then settles to Processed or Failed. Nothing in this set
// is ever claimed again.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlState {
    /// Claimed, being fetched or waiting for a retry
    InFlight,
    /// Fetched and extracted
    Processed,
    /// Gave up: error, or out of retries
    Failed,
}

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashMap<String, UrlState>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns true if the caller now owns `url`, false if someone else
    // already had it
    pub fn claim(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains_key(url) {
            return false;
        }
        urls.insert(url.to_string(), UrlState::InFlight);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    #[cfg(test)]
    pub fn state(&self, url: &str) -> Option<UrlState> {
        self.lock().get(url).copied()
    }

    pub fn mark_processed(&self, url: &str) {
        self.settle(url, UrlState::Processed);
    }

    pub fn mark_failed(&self, url: &str) {
        self.settle(url, UrlState::Failed);
    }

    // Only an in-flight claim can settle; a finished URL keeps its result
    fn settle(&self, url: &str, state: UrlState) {
        if let Some(current) = self.lock().get_mut(url) {
            if *current == UrlState::InFlight {
                *current = state;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // Every successfully processed URL, sorted for stable output
    pub fn processed_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .lock()
            .iter()
            .filter(|(_, state)| **state == UrlState::Processed)
            .map(|(url, _)| url.clone())
            .collect();
        urls.sort();
        urls
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UrlState>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_claim_is_exclusive() {
        let visited = VisitedSet::new();
        assert!(visited.claim("https://example.org/a"));
        assert!(!visited.claim("https://example.org/a"));
        assert!(visited.contains("https://example.org/a"));
        assert_eq!(visited.state("https://example.org/a"), Some(UrlState::InFlight));
    }

    #[test]
    fn test_finished_urls_stay_claimed() {
        let visited = VisitedSet::new();
        visited.claim("https://example.org/a");
        visited.claim("https://example.org/b");
        visited.mark_processed("https://example.org/a");
        visited.mark_failed("https://example.org/b");

        assert!(!visited.claim("https://example.org/a"));
        assert!(!visited.claim("https://example.org/b"));
        assert_eq!(visited.processed_urls(), vec!["https://example.org/a"]);
    }

    #[test]
    fn test_settled_state_does_not_change() {
        let visited = VisitedSet::new();
        visited.claim("https://example.org/a");
        visited.mark_processed("https://example.org/a");
        visited.mark_failed("https://example.org/a");
        assert_eq!(visited.state("https://example.org/a"), Some(UrlState::Processed));
    }

    #[test]
    fn test_marking_unclaimed_url_does_nothing() {
        let visited = VisitedSet::new();
        visited.mark_processed("https://example.org/never");
        assert_eq!(visited.len(), 0);
    }

    #[test]
    fn test_concurrent_claims_have_one_winner() {
        let visited = Arc::new(VisitedSet::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let visited = visited.clone();
                std::thread::spawn(move || visited.claim("https://example.org/contested"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }
}
