// src/pipeline.rs
// =============================================================================
// The whole scan: seed -> crawl -> analyze -> detect issues.
//
// Outcomes:
// - Err(InvalidSeedUrl / Config): nothing was attempted
// - Ok(NothingToAnalyze): the crawl ran but not a single page came back
// - Ok(Completed(report)): page records, issues, scores and a summary
// =============================================================================

use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::analyzer::{PageAnalyzer, PageRecord};
use crate::config::ScanConfig;
use crate::crawl::{CrawlReport, Crawler, FetchFailure, Fetcher, HttpFetcher};
use crate::error::Result;
use crate::issues::{detect_all_issues, Issue};
use crate::report::{PageScore, ScanSummary};
use crate::scope;

/// A page that failed to fetch, in a printable form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedFetch {
    pub url: String,
    pub reason: String,
}

impl From<&FetchFailure> for FailedFetch {
    fn from(failure: &FetchFailure) -> Self {
        Self {
            url: failure.url.clone(),
            reason: failure.reason.to_string(),
        }
    }
}

/// Everything a completed scan produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub seed_url: String,
    /// One record per fetched page, in crawl order
    pub pages: Vec<PageRecord>,
    /// Issues grouped by page in crawl order, rule order within a page
    pub issues: Vec<Issue>,
    pub scores: Vec<PageScore>,
    pub failures: Vec<FailedFetch>,
    pub summary: ScanSummary,
}

/// How a scan ended.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Completed(ScanReport),
    /// Not a single page could be fetched (usually: the seed is unreachable)
    NothingToAnalyze {
        seed_url: String,
        failures: Vec<FailedFetch>,
    },
}

/// Scan the site in `config.seed_url` over HTTP.
pub async fn run_scan(config: &ScanConfig, cancel: Option<Arc<AtomicBool>>) -> Result<ScanOutcome> {
    let fetcher = HttpFetcher::new(config)?;
    scan_with(config, fetcher, cancel).await
}

/// Scan with any fetcher. Used by run_scan and by tests.
pub async fn scan_with<F: Fetcher>(
    config: &ScanConfig,
    fetcher: F,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<ScanOutcome> {
    config.validate()?;
    let seed = scope::parse_seed(&config.seed_url)?;

    let mut crawler = Crawler::new(seed.clone(), config.max_pages, config.politeness_delay(), fetcher)?;
    if let Some(flag) = cancel {
        crawler = crawler.with_cancel_flag(flag);
    }

    log::info!("Scanning {} (up to {} pages)", seed, config.max_pages);
    let crawl = crawler.crawl_site().await;
    let analyzer = PageAnalyzer::new(crawler.authority());

    Ok(build_outcome(seed.as_str(), crawl, &analyzer))
}

/// Analyze crawled pages and detect issues.
pub fn build_outcome(seed_url: &str, crawl: CrawlReport, analyzer: &PageAnalyzer) -> ScanOutcome {
    let failures: Vec<FailedFetch> = crawl.failures.iter().map(FailedFetch::from).collect();

    if crawl.is_empty() {
        log::warn!("No pages fetched from {}", seed_url);
        return ScanOutcome::NothingToAnalyze {
            seed_url: seed_url.to_string(),
            failures,
        };
    }

    let total = crawl.pages.len();
    let pages: Vec<PageRecord> = crawl
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            log::debug!("Analyzing ({}/{}): {}", i + 1, total, page.url);
            analyzer.analyze_page(&page.url, &page.body)
        })
        .collect();

    let issues = detect_all_issues(&pages);
    log::info!("Found {} issue(s) across {} page(s)", issues.len(), pages.len());

    let scores = pages.iter().map(PageScore::for_record).collect();
    let summary = ScanSummary::new(&pages, &issues, crawl.discovered, failures.len());

    ScanOutcome::Completed(ScanReport {
        seed_url: seed_url.to_string(),
        pages,
        issues,
        scores,
        failures,
        summary,
    })
}
