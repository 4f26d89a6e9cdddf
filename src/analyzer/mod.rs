// src/analyzer/mod.rs
// =============================================================================
// This module extracts SEO facts from HTML pages.
//
// Submodules:
// - record: the PageRecord type (one per fetched page)
// - page: PageAnalyzer, which builds a PageRecord from raw HTML
// =============================================================================

mod page;
mod record;

pub use page::PageAnalyzer;
pub use record::PageRecord;
