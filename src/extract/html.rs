// src/extract/html.rs
// =============================================================================
// This module extracts same-site links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// We also use the `url` crate to:
// - Resolve relative URLs to absolute URLs
// - Compare hosts so we never leave the site
// - Drop the #fragment part of a link
//
// And `regex` to keep only paths we care about (on Wikipedia: articles,
// not Talk:, File: or Special: pages).
// =============================================================================

use super::{ExtractError, Extractor};
use crate::config::{ConfigError, CrawlConfig};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

pub struct LinkExtractor {
    // Host every returned link must be on
    host: String,
    // Optional filter on the URL path
    path_filter: Option<Regex>,
    // Compiled once, reused for every page
    selector: Selector,
}

impl LinkExtractor {
    // Creates an extractor scoped to the host of `domain`
    //
    // Parameters:
    //   domain: any URL on the site (only its host is used)
    //   path_pattern: regex the path must match, or None to keep every path
    pub fn new(domain: &Url, path_pattern: Option<&str>) -> Result<Self, ConfigError> {
        let host = domain
            .host_str()
            .ok_or_else(|| ConfigError::MissingHost(domain.to_string()))?
            .to_string();

        let path_filter = path_pattern.map(Regex::new).transpose()?;

        // "a[href]" is a constant selector and known to be valid
        let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

        Ok(Self {
            host,
            path_filter,
            selector,
        })
    }

    pub fn from_config(config: &CrawlConfig) -> Result<Self, ConfigError> {
        let domain = config.domain_url()?;
        Self::new(&domain, config.path_pattern.as_deref())
    }

    // Decides whether an absolute URL stays in the crawl
    //
    // We keep it only if:
    // 1. It's HTTP/HTTPS
    // 2. It's on our host
    // 3. Its path matches the filter (when there is one)
    fn keep(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }
        if url.host_str() != Some(self.host.as_str()) {
            return false;
        }
        match &self.path_filter {
            Some(filter) => filter.is_match(url.path()),
            None => true,
        }
    }
}

impl Extractor for LinkExtractor {
    fn extract(&self, page_url: &str, content: &str) -> Result<HashSet<String>, ExtractError> {
        let base = Url::parse(page_url).map_err(|e| ExtractError::InvalidPageUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;

        let document = Html::parse_document(content);
        let mut links = HashSet::new();

        for element in document.select(&self.selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let Some(absolute) = resolve_link(&base, href) else {
                continue;
            };

            if self.keep(&absolute) {
                links.insert(absolute.to_string());
            }
        }

        Ok(links)
    }
}

// Resolves a link (possibly relative) to an absolute URL without fragment
//
// Examples:
//   base = "https://en.wikipedia.org/wiki/Rust"
//   href = "/wiki/Cargo"        -> Some("https://en.wikipedia.org/wiki/Cargo")
//   href = "Cargo#Usage"        -> Some("https://en.wikipedia.org/wiki/Cargo")
//   href = "#History"           -> None (same page)
//   href = "mailto:a@b.org"     -> None
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}
