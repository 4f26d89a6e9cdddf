// src/issues/mod.rs
// =============================================================================
// SEO findings.
//
// An Issue is one problem found on one page: how bad it is (severity), what
// area it concerns (category), a message, and what to do about it.
//
// Issues are produced only by the rules in rules.rs, each of which looks at
// a single PageRecord. There is no cross-page state.
// =============================================================================

mod rules;

pub use rules::{detect_all_issues, detect_page_issues, Rule, RULES};

use serde::{Deserialize, Serialize};
use std::fmt;

/// How urgent a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Priority weight used when ranking issues.
    pub fn weight(self) -> u32 {
        match self {
            Severity::Critical => 10,
            Severity::Warning => 5,
            Severity::Info => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        };
        f.write_str(label)
    }
}

/// Which part of the page a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Title,
    MetaDescription,
    Headers,
    Images,
    Content,
    Technical,
}

impl Category {
    /// How much this area matters for search ranking, used when ranking issues.
    pub fn impact(self) -> u32 {
        match self {
            Category::Title => 10,
            Category::MetaDescription => 9,
            Category::Headers => 8,
            Category::Technical => 6,
            Category::Images => 4,
            Category::Content => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Title => "Title",
            Category::MetaDescription => "Meta Description",
            Category::Headers => "Headers",
            Category::Images => "Images",
            Category::Content => "Content",
            Category::Technical => "Technical",
        };
        f.write_str(label)
    }
}

/// One SEO finding on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    /// Human-readable description, may include a measured value
    pub message: String,
    /// The page this issue was found on
    pub url: String,
    /// What to do about it
    pub recommendation: String,
}

impl Issue {
    pub fn new(
        severity: Severity,
        category: Category,
        message: impl Into<String>,
        url: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            url: url.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Severity weight plus category impact. Higher means fix it first.
    pub fn priority_score(&self) -> u32 {
        self.severity.weight() + self.category.impact()
    }
}
