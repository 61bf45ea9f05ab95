// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, filtered by --verbose or RUST_LOG)
// 3. Build the HTTP fetcher and the link extractor
// 4. Run one crawl and print the summary
// 5. Exit with proper code (0 = clean crawl, 1 = some pages lost, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - crawl settings and their defaults
mod crawl;     // src/crawl/ - frontier, workers and orchestration
mod extract;   // src/extract/ - link extraction from HTML
mod fetch;     // src/fetch/ - page downloads

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use crawl::{CrawlSummary, Crawler};
use extract::LinkExtractor;
use fetch::HttpFetcher;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every page was processed or skipped as a duplicate
//   Ok(1) = some pages failed or timed out on every attempt
//   Err   = could not start or finish the crawl
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.to_config();
    config.validate().context("invalid crawl settings")?;
    let seed_url = config.seed_url()?;

    let fetcher = HttpFetcher::new().context("failed to build HTTP client")?;
    let extractor = LinkExtractor::from_config(&config)?;
    let crawler = Crawler::new(&config, Arc::new(fetcher), Arc::new(extractor));

    if !cli.json {
        println!("🔍 Crawling {}", seed_url);
        println!(
            "📊 Max depth: {}, workers: {}, retries: {}",
            config.max_depth, config.max_workers, config.max_retries
        );
    }

    let summary = crawler.run(&seed_url).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, cli.verbose);
    }

    Ok(exit_code(&summary))
}

// Logs go to stderr so --json output on stdout stays clean
//
// RUST_LOG wins when set; otherwise --verbose picks info, default is warn
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &CrawlSummary, verbose: bool) {
    if verbose {
        for page in &summary.pages {
            println!("   {}", page);
        }
        println!();
    }

    println!(
        "Time taken for {} requests: {:.2} sec",
        summary.processed, summary.elapsed_secs
    );
    println!("   🔁 Retries: {}", summary.retries);
    println!("   ⏱️  Gave up after timeouts: {}", summary.dropped);
    println!("   ❌ Failed: {}", summary.failed);
}

fn exit_code(summary: &CrawlSummary) -> i32 {
    if summary.is_clean() {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(failed: usize, dropped: usize) -> CrawlSummary {
        CrawlSummary {
            processed: 3,
            failed,
            dropped,
            retries: 0,
            duplicates: 0,
            fetches: 3,
            elapsed_secs: 0.5,
            pages: Vec::new(),
        }
    }

    #[test]
    fn test_exit_code_clean_crawl() {
        assert_eq!(exit_code(&summary(0, 0)), 0);
    }

    #[test]
    fn test_exit_code_with_lost_pages() {
        assert_eq!(exit_code(&summary(1, 0)), 1);
        assert_eq!(exit_code(&summary(0, 2)), 1);
    }
}
