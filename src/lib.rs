// src/lib.rs
// =============================================================================
// seo-scanner: crawl a website and audit its on-page SEO.
//
// The pipeline has three stages:
// 1. crawl    - bounded breadth-first walk of same-authority links
// 2. analyzer - raw HTML -> PageRecord (title, meta, headings, images, ...)
// 3. issues   - PageRecord -> prioritized findings (Issue)
//
// pipeline::run_scan() ties them together. report has the helpers for
// ranking issues and scoring pages.
// =============================================================================

pub mod analyzer;
pub mod config;
pub mod crawl;
pub mod error;
pub mod issues;
pub mod pipeline;
pub mod report;
pub mod scope;

pub use analyzer::{PageAnalyzer, PageRecord};
pub use config::ScanConfig;
pub use error::{FetchError, Result, ScanError};
pub use issues::{Category, Issue, Severity};
pub use pipeline::{run_scan, ScanOutcome, ScanReport};
