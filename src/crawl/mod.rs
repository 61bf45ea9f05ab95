// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl itself.
//
// Features:
// - A fixed pool of workers sharing one frontier queue
// - Each URL is claimed once, so it is fetched by one worker only
// - Timed-out fetches are retried a bounded number of times
// - Links are followed up to a configured depth
// - The pool stops by itself once no task is queued or running
//
// Submodules:
// - task: CrawlTask and the Stop sentinel
// - frontier: The shared queue and its pending-task counter
// - visited: URL claims and their final state
// - stats: Shared counters and the crawl summary
// - worker: The per-worker loop
// - crawler: Seeds the queue, runs the pool, returns the summary
// =============================================================================

mod crawler;
mod frontier;
mod stats;
mod task;
mod visited;
mod worker;

#[cfg(test)]
mod testing;

pub use crawler::Crawler;
pub use stats::CrawlSummary;
