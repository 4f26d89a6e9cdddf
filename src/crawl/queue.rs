// src/crawl/queue.rs
// =============================================================================
// This module implements site crawling with a breadth-first approach.
//
// How it works:
// 1. Start with the seed URL in a queue (the "frontier")
// 2. Pop the front of the queue, wait the politeness delay, fetch it
// 3. On success: remember it, extract its links, enqueue the in-scope ones
//    that were never queued before
// 4. On failure: log it, record it, move on (the URL is not retried)
// 5. Stop when the queue is empty, the page budget is used up, or the
//    caller raised the cancel flag
//
// Crawl state (queue + sets) lives in a local CrawlState value that is
// created for each crawl_site() call, so one Crawler can run many crawls
// and two crawls never share anything.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::fetch::{FetchOutcome, Fetcher};
use crate::error::{FetchError, Result, ScanError};
use crate::scope;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawledPage {
    pub url: String,
    pub body: String,
}

/// A page that could not be fetched, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub reason: FetchError,
}

/// Everything one crawl produced.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Fetched pages in breadth-first order
    pub pages: Vec<CrawledPage>,
    /// URLs that were attempted and failed, in attempt order
    pub failures: Vec<FetchFailure>,
    /// Distinct URLs ever put in the frontier (seed included)
    pub discovered: usize,
}

impl CrawlReport {
    /// True when not a single page could be fetched.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

// The mutable part of a crawl, owned by one crawl_site() call
struct CrawlState {
    frontier: VecDeque<String>,
    // Every URL ever enqueued. Entries are never removed, which is what
    // keeps failed URLs from coming back.
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl CrawlState {
    fn new(seed: &str) -> Self {
        let mut state = Self {
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        };
        state.enqueue(seed.to_string());
        state
    }

    // Returns false if the URL was already visited or queued
    fn enqueue(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || !self.queued.insert(url.clone()) {
            return false;
        }
        self.frontier.push_back(url);
        true
    }
}

/// Breadth-first crawler bounded to the seed's authority.
pub struct Crawler<F: Fetcher> {
    seed: Url,
    authority: String,
    max_pages: usize,
    politeness_delay: Duration,
    fetcher: F,
    cancel: Option<Arc<AtomicBool>>,
}

impl<F: Fetcher> Crawler<F> {
    /// Create a crawler for `seed`.
    ///
    /// Fails with InvalidSeedUrl when the seed has no host to scope to.
    pub fn new(seed: Url, max_pages: usize, politeness_delay: Duration, fetcher: F) -> Result<Self> {
        let authority = scope::authority(&seed)
            .ok_or_else(|| ScanError::invalid_seed(seed.as_str(), "URL has no host"))?;

        Ok(Self {
            seed,
            authority,
            max_pages,
            politeness_delay,
            fetcher,
            cancel: None,
        })
    }

    /// Stop the crawl between two fetches once `flag` becomes true.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The authority every crawled URL must share with the seed.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Crawl the site and return fetched pages in breadth-first order.
    ///
    /// Never fails: individual fetch errors are recorded in the report. An
    /// unreachable seed gives an empty report.
    pub async fn crawl_site(&self) -> CrawlReport {
        let mut state = CrawlState::new(self.seed.as_str());
        let mut report = CrawlReport::default();

        while report.pages.len() < self.max_pages {
            if self.is_cancelled() {
                log::info!("Crawl cancelled after {} page(s)", report.pages.len());
                break;
            }

            let url = match state.frontier.pop_front() {
                Some(url) => url,
                None => break,
            };

            if state.visited.contains(&url) {
                continue;
            }

            if !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }

            log::info!(
                "Crawling [{}/{}]: {}",
                report.pages.len() + 1,
                self.max_pages,
                url
            );

            match FetchOutcome::resolve(&self.fetcher, &url).await {
                FetchOutcome::Fetched { url, body } => {
                    state.visited.insert(url.clone());

                    let mut added = 0;
                    for link in extract_links(&body, &url) {
                        if !scope::is_in_scope(&link, &self.authority) {
                            log::debug!("  out of scope: {}", link);
                            continue;
                        }
                        if state.enqueue(link) {
                            added += 1;
                        }
                    }
                    log::debug!("  {} new link(s) queued from {}", added, url);

                    report.pages.push(CrawledPage { url, body });
                }
                FetchOutcome::Failed { url, reason } => {
                    log::warn!("Failed to fetch {}: {}", url, reason);
                    report.failures.push(FetchFailure { url, reason });
                }
            }
        }

        report.discovered = state.queued.len();
        log::info!(
            "Fetched {} page(s) out of {} discovered ({} failed)",
            report.pages.len(),
            report.discovered,
            report.failures.len()
        );

        report
    }
}

/// Extracts every `<a href>` target from a page, resolved against `page_url`.
///
/// No filtering beyond dropping anchors and special protocols; scope is
/// decided by the caller.
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    let document = Html::parse_document(html);
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = resolve_link(&base, href) {
                links.push(absolute);
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    base.join(href).ok().map(|url| url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why both `queued` and `visited`?
//    - visited = pages we actually fetched (what the budget counts)
//    - queued = every URL we ever put in the frontier, fetched or not
//    - Checking `queued` makes "is it already in the frontier?" O(1)
//      instead of scanning the VecDeque
//
// 2. Why is Crawler generic over F: Fetcher?
//    - The crawl loop doesn't care where pages come from
//    - In production F = HttpFetcher, in tests F = an in-memory site
//    - Generics are resolved at compile time, so there's no runtime cost
//
// 3. Why an Arc<AtomicBool> for cancellation?
//    - The flag is set from another task (the Ctrl-C handler) while the
//      crawl loop reads it, so it must be shareable and thread-safe
//    - Relaxed ordering is enough: we only need to see the flag eventually
// -----------------------------------------------------------------------------
