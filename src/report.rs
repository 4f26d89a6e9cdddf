// src/report.rs
// =============================================================================
// Turning pipeline output into something a person can act on.
//
// - prioritize(): the N issues to fix first (severity weight + category
//   impact, highest first, ties keep their original order)
// - page_score()/grade(): a 0-100 score and a letter grade per page
// - ScanSummary: the aggregate numbers for the end of a run
//
// Rendering (tables, JSON) stays in main.rs. Nothing here does I/O.
// =============================================================================

use serde::Serialize;

use crate::analyzer::PageRecord;
use crate::issues::{Issue, Severity};

/// The `n` most important issues, most important first.
///
/// Sorting is stable, so equally scored issues keep page order and rule
/// order.
pub fn prioritize(issues: &[Issue], n: usize) -> Vec<&Issue> {
    let mut ranked: Vec<&Issue> = issues.iter().collect();
    ranked.sort_by_key(|issue| std::cmp::Reverse(issue.priority_score()));
    ranked.truncate(n);
    ranked
}

/// Scores a page from 0 to 100.
///
/// | Area             | Points | Full marks when          |
/// |------------------|--------|--------------------------|
/// | Title            | 25     | 30-60 characters (15 otherwise, if present) |
/// | Meta description | 25     | 120-160 characters (15 otherwise, if present) |
/// | H1               | 20     | exactly one (10 for several) |
/// | Images           | 15     | scaled by alt coverage   |
/// | Content          | 15     | 300+ words (10 for 150+, 5 for any) |
pub fn page_score(record: &PageRecord) -> f64 {
    let mut score = 0.0;

    if !record.title.is_empty() {
        score += if (30..=60).contains(&record.title_length) {
            25.0
        } else {
            15.0
        };
    }

    if record.has_meta_description && record.meta_desc_length > 0 {
        score += if (120..=160).contains(&record.meta_desc_length) {
            25.0
        } else {
            15.0
        };
    }

    score += match record.h1_count {
        0 => 0.0,
        1 => 20.0,
        _ => 10.0,
    };

    score += record.alt_coverage() * 15.0;

    score += match record.word_count {
        0 => 0.0,
        n if n >= 300 => 15.0,
        n if n >= 150 => 10.0,
        _ => 5.0,
    };

    score.min(100.0)
}

/// Letter grade for a page score.
pub fn grade(score: f64) -> char {
    match score {
        s if s >= 90.0 => 'A',
        s if s >= 80.0 => 'B',
        s if s >= 70.0 => 'C',
        s if s >= 60.0 => 'D',
        _ => 'F',
    }
}

/// Score and grade for one page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageScore {
    pub url: String,
    pub score: f64,
    pub grade: char,
}

impl PageScore {
    pub fn for_record(record: &PageRecord) -> Self {
        let score = page_score(record);
        Self {
            url: record.url.clone(),
            score,
            grade: grade(score),
        }
    }
}

/// Aggregate numbers for one scan.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ScanSummary {
    pub pages_analyzed: usize,
    pub pages_discovered: usize,
    pub pages_failed: usize,
    pub total_issues: usize,
    pub critical: usize,
    pub warnings: usize,
    pub info: usize,
    pub average_score: f64,
}

impl ScanSummary {
    pub fn new(records: &[PageRecord], issues: &[Issue], discovered: usize, failed: usize) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();

        let average_score = if records.is_empty() {
            0.0
        } else {
            records.iter().map(page_score).sum::<f64>() / records.len() as f64
        };

        Self {
            pages_analyzed: records.len(),
            pages_discovered: discovered,
            pages_failed: failed,
            total_issues: issues.len(),
            critical: count(Severity::Critical),
            warnings: count(Severity::Warning),
            info: count(Severity::Info),
            average_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::Category;

    fn issue(severity: Severity, category: Category, message: &str) -> Issue {
        Issue::new(severity, category, message, "https://example.com/", "fix it")
    }

    #[test]
    fn test_prioritize_orders_by_score_and_keeps_ties_stable() {
        let issues = vec![
            issue(Severity::Info, Category::Technical, "canonical"),
            issue(Severity::Warning, Category::Content, "low content"),
            issue(Severity::Critical, Category::Headers, "h1 page a"),
            issue(Severity::Critical, Category::Title, "title"),
            issue(Severity::Critical, Category::Headers, "h1 page b"),
        ];

        let top: Vec<&str> = prioritize(&issues, 4)
            .iter()
            .map(|i| i.message.as_str())
            .collect();
        assert_eq!(top, vec!["title", "h1 page a", "h1 page b", "low content"]);
    }

    #[test]
    fn test_prioritize_with_large_n_returns_everything() {
        let issues = vec![issue(Severity::Info, Category::Content, "only")];
        assert_eq!(prioritize(&issues, 10).len(), 1);
        assert!(prioritize(&[], 10).is_empty());
    }

    #[test]
    fn test_perfect_page_scores_100() {
        let record = PageRecord {
            title: "t".repeat(40),
            title_length: 40,
            has_meta_description: true,
            meta_desc_length: 150,
            h1_count: 1,
            word_count: 800,
            ..PageRecord::default()
        };
        assert_eq!(page_score(&record), 100.0);
        assert_eq!(grade(page_score(&record)), 'A');
    }

    #[test]
    fn test_empty_page_only_gets_image_points() {
        let record = PageRecord::default();
        assert_eq!(page_score(&record), 15.0);
        assert_eq!(grade(15.0), 'F');
    }

    #[test]
    fn test_partial_scores() {
        let record = PageRecord {
            title: "short".to_string(),
            title_length: 5,
            h1_count: 2,
            total_images: 4,
            images_without_alt: 2,
            word_count: 200,
            ..PageRecord::default()
        };
        // 15 title + 0 meta + 10 h1 + 7.5 images + 10 content
        assert_eq!(page_score(&record), 42.5);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade(90.0), 'A');
        assert_eq!(grade(89.9), 'B');
        assert_eq!(grade(80.0), 'B');
        assert_eq!(grade(70.0), 'C');
        assert_eq!(grade(60.0), 'D');
        assert_eq!(grade(59.9), 'F');
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![PageRecord::default(), PageRecord::default()];
        let issues = vec![
            issue(Severity::Critical, Category::Title, "a"),
            issue(Severity::Warning, Category::Images, "b"),
            issue(Severity::Warning, Category::Content, "c"),
            issue(Severity::Info, Category::Technical, "d"),
        ];
        let summary = ScanSummary::new(&records, &issues, 7, 1);

        assert_eq!(summary.pages_analyzed, 2);
        assert_eq!(summary.pages_discovered, 7);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(summary.total_issues, 4);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.average_score, 15.0);
    }
}
