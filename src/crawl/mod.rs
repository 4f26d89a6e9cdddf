// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-authority restriction (see scope.rs for the full rule set)
// - Page budget instead of a depth limit
// - Polite crawling: a fixed delay before every request
// - Pluggable fetcher, so crawls can run against an in-memory site
// =============================================================================

mod fetch;
mod queue;

pub use fetch::{FetchOutcome, Fetcher, HttpFetcher};
pub use queue::{extract_links, CrawlReport, CrawledPage, Crawler, FetchFailure};
