// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every flag is optional: running `wiki-crawler` with no arguments crawls
// the default seed page with the default limits (see src/config.rs).
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - Default values: each flag falls back to a constant from config.rs
// =============================================================================

use crate::config::{
    CrawlConfig, DEFAULT_DOMAIN, DEFAULT_MAX_DEPTH, DEFAULT_MAX_RETRIES, DEFAULT_MAX_WORKERS,
    DEFAULT_PATH_PATTERN, DEFAULT_SEED_PATH, DEFAULT_TIMEOUT_SECS,
};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "wiki-crawler",
    version,
    about = "Crawls a site from one seed page up to a fixed depth with a pool of workers",
    long_about = "wiki-crawler fetches a seed page, follows its same-site links up to --max-depth hops, \
                  and reports how many pages it processed and how long it took. \
                  Timed-out fetches are retried up to --max-retries times."
)]
pub struct Cli {
    /// Site to crawl; only links on this host are followed
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Path of the first page, relative to --domain
    #[arg(long, default_value = DEFAULT_SEED_PATH)]
    pub seed_path: String,

    /// Maximum link-hops from the seed page
    ///
    /// Depth 0 = just the seed page
    /// Depth 1 = seed page + all pages it links to
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// How many times a timed-out page is retried before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: usize,

    /// Number of concurrent workers
    #[arg(long, default_value_t = DEFAULT_MAX_WORKERS)]
    pub max_workers: usize,

    /// Seconds before a single fetch counts as timed out
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Regex the link path must match; pass an empty string to follow every path
    #[arg(long, default_value = DEFAULT_PATH_PATTERN)]
    pub path_pattern: String,

    /// Output the summary in JSON format instead of text
    #[arg(long)]
    pub json: bool,

    /// Log crawl progress and list every processed page
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            domain: self.domain.clone(),
            seed_path: self.seed_path.clone(),
            max_depth: self.max_depth,
            max_retries: self.max_retries,
            max_workers: self.max_workers,
            timeout: Duration::from_secs(self.timeout_secs),
            path_pattern: Some(self.path_pattern.clone()).filter(|p| !p.is_empty()),
        }
    }
}
