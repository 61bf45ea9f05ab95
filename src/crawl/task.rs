// src/crawl/task.rs
// =============================================================================
// The unit of work that travels through the frontier queue.
//
// A CrawlTask is never changed after it is created. Retrying a page or
// following one of its links makes a new task instead.
// =============================================================================

/// One page to crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    /// Link-hops from the seed page (seed = 0)
    pub depth: usize,
    /// How many times this URL already timed out
    pub retry_count: usize,
}

impl CrawlTask {
    // The first task of every crawl
    pub fn seed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: 0,
            retry_count: 0,
        }
    }

    // Same page again after a timeout
    pub fn retry(&self) -> Self {
        Self {
            url: self.url.clone(),
            depth: self.depth,
            retry_count: self.retry_count + 1,
        }
    }

    // A page this one links to
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: self.depth + 1,
            retry_count: 0,
        }
    }

    // A retry copy was made by the worker that claimed the URL,
    // so it carries that claim with it
    pub fn owns_claim(&self) -> bool {
        self.retry_count > 0
    }
}

/// What workers pull off the frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Crawl(CrawlTask),
    /// Sentinel: the worker that receives it stops
    Stop,
}
