// src/crawl/crawler.rs
// =============================================================================
// The orchestrator: one call to run() is one complete crawl.
//
// How it works:
// 1. Put the seed page (depth 0) in a fresh frontier
// 2. Spawn max_workers workers sharing the frontier, visited set and stats
// 3. Wait until every worker has popped its Stop task
// 4. Report what happened
//
// Each run gets its own CrawlContext, so a Crawler can be reused.
// =============================================================================

use super::stats::CrawlSummary;
use super::task::{CrawlTask, Task};
use super::worker::{CrawlContext, PoolSettings, Worker};
use crate::config::CrawlConfig;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use anyhow::{anyhow, bail, Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use url::Url;

pub struct Crawler {
    settings: PoolSettings,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
}

impl Crawler {
    pub fn new(
        config: &CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            settings: PoolSettings {
                max_depth: config.max_depth,
                max_retries: config.max_retries,
                workers: config.max_workers,
                timeout: config.timeout,
            },
            fetcher,
            extractor,
        }
    }

    // Crawls from `seed_url` and returns once the whole pool has stopped
    //
    // Per-page failures don't make this fail; they show up in the summary.
    // An Err means the crawl could not start or a worker could not be joined.
    pub async fn run(&self, seed_url: &str) -> Result<CrawlSummary> {
        if self.settings.workers == 0 {
            bail!("cannot crawl with an empty worker pool");
        }
        Url::parse(seed_url).with_context(|| format!("invalid seed URL '{}'", seed_url))?;

        let started = Instant::now();
        let ctx = Arc::new(CrawlContext::new(
            self.settings,
            self.fetcher.clone(),
            self.extractor.clone(),
        ));

        info!(
            seed = seed_url,
            workers = self.settings.workers,
            max_depth = self.settings.max_depth,
            max_retries = self.settings.max_retries,
            "starting crawl"
        );

        ctx.frontier.push(Task::Crawl(CrawlTask::seed(seed_url)));

        let handles: Vec<_> = (0..self.settings.workers)
            .map(|id| tokio::spawn(Worker::new(id, ctx.clone()).run()))
            .collect();

        // Wait for all of them before reporting, even if one went wrong
        let mut join_error = None;
        for result in join_all(handles).await {
            if let Err(e) = result {
                join_error.get_or_insert(e);
            }
        }
        if let Some(e) = join_error {
            return Err(anyhow!(e).context("a crawl worker stopped unexpectedly"));
        }

        let summary = ctx
            .stats
            .summary(started.elapsed(), ctx.visited.processed_urls());

        info!(
            processed = summary.processed,
            failed = summary.failed,
            dropped = summary.dropped,
            visited = ctx.visited.len(),
            elapsed_secs = summary.elapsed_secs,
            "crawl finished"
        );

        Ok(summary)
    }
}
