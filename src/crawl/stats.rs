// src/crawl/stats.rs
// =============================================================================
// Counters shared by all workers, and the summary built from them.
//
// Every counter is an independent atomic. Nothing here is updated together
// with the frontier or the visited set, so a snapshot taken mid-crawl is
// only approximate. After the pool has stopped it is exact.
// =============================================================================

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CrawlStats {
    processed: AtomicUsize,
    failed: AtomicUsize,
    dropped: AtomicUsize,
    retries: AtomicUsize,
    duplicates: AtomicUsize,
    fetches: AtomicUsize,
}

impl CrawlStats {
    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self, elapsed: Duration, pages: Vec<String>) -> CrawlSummary {
        CrawlSummary {
            processed: self.processed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            elapsed_secs: elapsed.as_secs_f64(),
            pages,
        }
    }
}

/// What a finished crawl reports back.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    /// Pages fetched and extracted
    pub processed: usize,
    /// Pages that hit a non-timeout error
    pub failed: usize,
    /// Pages that timed out on every attempt
    pub dropped: usize,
    /// Timed-out attempts that were queued again
    pub retries: usize,
    /// Tasks skipped because their URL was already claimed
    pub duplicates: usize,
    /// Total fetcher calls, retries included
    pub fetches: usize,
    pub elapsed_secs: f64,
    /// URLs of the processed pages, sorted
    pub pages: Vec<String>,
}

impl CrawlSummary {
    // True when no page was lost along the way
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.dropped == 0
    }
}
