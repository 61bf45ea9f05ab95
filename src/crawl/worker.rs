// src/crawl/worker.rs
// =============================================================================
// The worker loop. Every worker in the pool runs this until it pops a Stop.
//
// For each crawl task:
// 1. Skip it if it is deeper than max_depth (never fetched)
// 2. Claim the URL (a retry already owns the claim); skip if taken
// 3. Fetch it
//    - timeout: queue a retry, or give up once max_retries is reached
//    - other error: mark the URL failed
// 4. Extract links, count the page, mark it processed
// 5. Queue every link at depth + 1, if that is still within max_depth
// 6. Tell the frontier the task is done; the worker that finishes the last
//    pending task queues one Stop per worker
//
// Errors and panics end the task, never the worker. A dead worker would
// shrink the pool for the rest of the crawl.
// =============================================================================

use super::frontier::Frontier;
use super::stats::CrawlStats;
use super::task::{CrawlTask, Task};
use super::visited::VisitedSet;
use crate::extract::{ExtractError, Extractor};
use crate::fetch::{FetchError, Fetcher};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

// Limits every worker in one crawl obeys
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_depth: usize,
    pub max_retries: usize,
    pub workers: usize,
    pub timeout: Duration,
}

// Everything the workers of one crawl share
pub struct CrawlContext {
    pub settings: PoolSettings,
    pub frontier: Frontier,
    pub visited: VisitedSet,
    pub stats: CrawlStats,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn Extractor>,
}

impl CrawlContext {
    pub fn new(
        settings: PoolSettings,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            settings,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            stats: CrawlStats::default(),
            fetcher,
            extractor,
        }
    }
}

/// Why a single task ended without a processed page.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("link extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("task panicked: {0}")]
    Panicked(String),
}

// How one task ended
#[derive(Debug)]
enum TaskOutcome {
    Processed { links: usize },
    Retried,
    GaveUp,
    Duplicate,
    TooDeep,
    Failed(TaskError),
}

pub struct Worker {
    id: usize,
    ctx: Arc<CrawlContext>,
}

impl Worker {
    pub fn new(id: usize, ctx: Arc<CrawlContext>) -> Self {
        Self { id, ctx }
    }

    pub async fn run(self) {
        debug!(worker = self.id, "worker started");

        loop {
            let task = match self.ctx.frontier.pop().await {
                Task::Crawl(task) => task,
                Task::Stop => break,
            };

            // A panic in the fetcher or extractor only costs this task
            let outcome = AssertUnwindSafe(self.process(&task))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    TaskOutcome::Failed(TaskError::Panicked(panic_message(panic)))
                });

            self.record(&task, outcome);

            if self.ctx.frontier.task_done() {
                info!(worker = self.id, "frontier drained, stopping pool");
                self.ctx.frontier.shutdown(self.ctx.settings.workers);
            }
        }

        debug!(worker = self.id, "worker stopped");
    }

    async fn process(&self, task: &CrawlTask) -> TaskOutcome {
        let settings = self.ctx.settings;

        if task.depth > settings.max_depth {
            return TaskOutcome::TooDeep;
        }

        if task.owns_claim() {
            debug_assert!(self.ctx.visited.contains(&task.url));
        } else if !self.ctx.visited.claim(&task.url) {
            return TaskOutcome::Duplicate;
        }

        self.ctx.stats.record_fetch();
        let content = match self.ctx.fetcher.fetch(&task.url, settings.timeout).await {
            Ok(content) => content,
            Err(e) if e.is_timeout() => {
                if task.retry_count < settings.max_retries {
                    // Keep the claim: the retry copy owns it now
                    self.ctx.frontier.push(Task::Crawl(task.retry()));
                    return TaskOutcome::Retried;
                }
                self.ctx.visited.mark_failed(&task.url);
                return TaskOutcome::GaveUp;
            }
            Err(e) => {
                self.ctx.visited.mark_failed(&task.url);
                return TaskOutcome::Failed(e.into());
            }
        };

        let links = match self.ctx.extractor.extract(&task.url, &content) {
            Ok(links) => links,
            Err(e) => {
                self.ctx.visited.mark_failed(&task.url);
                return TaskOutcome::Failed(e.into());
            }
        };

        self.ctx.visited.mark_processed(&task.url);

        // Children land at depth + 1, which must stay within max_depth.
        // No dedup here: a link seen before is skipped when it's popped
        if task.depth < settings.max_depth {
            for link in &links {
                self.ctx.frontier.push(Task::Crawl(task.child(link.as_str())));
            }
        }

        TaskOutcome::Processed { links: links.len() }
    }

    fn record(&self, task: &CrawlTask, outcome: TaskOutcome) {
        let stats = &self.ctx.stats;

        match outcome {
            TaskOutcome::Processed { links } => {
                stats.record_processed();
                debug!(
                    worker = self.id,
                    url = %task.url,
                    depth = task.depth,
                    links,
                    queued = self.ctx.frontier.len(),
                    pending = self.ctx.frontier.pending(),
                    "processed"
                );
            }
            TaskOutcome::Retried => {
                stats.record_retry();
                debug!(
                    worker = self.id,
                    url = %task.url,
                    attempt = task.retry_count + 1,
                    "timed out, retrying"
                );
            }
            TaskOutcome::GaveUp => {
                stats.record_dropped();
                warn!(
                    worker = self.id,
                    url = %task.url,
                    attempts = task.retry_count + 1,
                    "timed out on every attempt, giving up"
                );
            }
            TaskOutcome::Duplicate => {
                stats.record_duplicate();
            }
            TaskOutcome::TooDeep => {
                warn!(url = %task.url, depth = task.depth, "task beyond max depth skipped");
            }
            TaskOutcome::Failed(err) => {
                // A panic may have struck before the URL was settled
                self.ctx.visited.mark_failed(&task.url);
                stats.record_failed();
                if matches!(err, TaskError::Panicked(_)) {
                    error!(worker = self.id, url = %task.url, error = %err, "task failed");
                } else {
                    warn!(worker = self.id, url = %task.url, error = %err, "task failed");
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is catch_unwind?
//    - It turns a panic inside a future into an Err value
//    - AssertUnwindSafe tells the compiler we accept any half-finished state;
//      here that's fine because the shared structures recover from it
//
// 2. Why Arc<CrawlContext>?
//    - Every worker is a separate tokio task that may outlive the function
//      that spawned it, so they can't borrow; they share ownership instead
//
// 3. Why is task_done() called after the follow-ups are pushed?
//    - The children bump the pending counter first, so it can only reach zero
//      when no task is queued and no worker is busy
// -----------------------------------------------------------------------------

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
