// src/issues/rules.rs
// =============================================================================
// The rule table.
//
// Each rule is a plain function: &PageRecord -> Vec<Issue>. Rules don't know
// about each other and RULES fixes the order they run in, which is also the
// order their issues appear in for a page.
//
// Good ranges (both ends included):
//   title            30..=60 characters
//   meta description 120..=160 characters
//   H1               exactly one
//   content          300+ words
// =============================================================================

use super::{Category, Issue, Severity};
use crate::analyzer::PageRecord;

/// A single independent check.
pub type Rule = fn(&PageRecord) -> Vec<Issue>;

/// Every rule, in evaluation order.
pub const RULES: &[Rule] = &[
    check_title,
    check_meta_description,
    check_headers,
    check_images,
    check_content,
    check_technical,
];

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const META_DESC_MIN: usize = 120;
const META_DESC_MAX: usize = 160;
const LOW_WORD_COUNT: usize = 150;
const GOOD_WORD_COUNT: usize = 300;

/// Run every rule against one page.
pub fn detect_page_issues(record: &PageRecord) -> Vec<Issue> {
    RULES.iter().flat_map(|rule| rule(record)).collect()
}

/// Run every rule against every page, keeping page order.
pub fn detect_all_issues(records: &[PageRecord]) -> Vec<Issue> {
    records.iter().flat_map(detect_page_issues).collect()
}

pub fn check_title(record: &PageRecord) -> Vec<Issue> {
    let url = &record.url;
    let length = record.title_length;

    let issue = if record.title.is_empty() {
        Issue::new(
            Severity::Critical,
            Category::Title,
            "Missing title tag",
            url,
            "Add a descriptive title tag (30-60 characters) that includes your main keyword",
        )
    } else if length < TITLE_MIN {
        Issue::new(
            Severity::Warning,
            Category::Title,
            format!("Title too short ({} characters)", length),
            url,
            "Expand title to 30-60 characters for better SEO impact",
        )
    } else if length > TITLE_MAX {
        Issue::new(
            Severity::Warning,
            Category::Title,
            format!("Title too long ({} characters)", length),
            url,
            "Shorten title to 30-60 characters to prevent truncation in search results",
        )
    } else {
        return Vec::new();
    };

    vec![issue]
}

pub fn check_meta_description(record: &PageRecord) -> Vec<Issue> {
    let url = &record.url;
    let length = record.meta_desc_length;

    let issue = if !record.has_meta_description {
        Issue::new(
            Severity::Critical,
            Category::MetaDescription,
            "Missing meta description",
            url,
            "Add a compelling meta description (120-160 characters) that encourages clicks",
        )
    } else if length < META_DESC_MIN {
        Issue::new(
            Severity::Warning,
            Category::MetaDescription,
            format!("Meta description too short ({} characters)", length),
            url,
            "Expand meta description to 120-160 characters for better search result display",
        )
    } else if length > META_DESC_MAX {
        Issue::new(
            Severity::Warning,
            Category::MetaDescription,
            format!("Meta description too long ({} characters)", length),
            url,
            "Shorten meta description to 120-160 characters to prevent truncation",
        )
    } else {
        return Vec::new();
    };

    vec![issue]
}

pub fn check_headers(record: &PageRecord) -> Vec<Issue> {
    let url = &record.url;
    let mut issues = Vec::new();

    if record.h1_count == 0 {
        issues.push(Issue::new(
            Severity::Critical,
            Category::Headers,
            "Missing H1 tag",
            url,
            "Add exactly one H1 tag that describes the main topic of the page",
        ));
    } else if record.h1_count > 1 {
        issues.push(Issue::new(
            Severity::Warning,
            Category::Headers,
            format!("Multiple H1 tags ({} found)", record.h1_count),
            url,
            "Use only one H1 tag per page. Convert additional H1s to H2 or H3 tags",
        ));
    }

    // Can fire together with "Missing H1 tag"
    if record.total_headings == 0 {
        issues.push(Issue::new(
            Severity::Warning,
            Category::Headers,
            "No header tags found",
            url,
            "Add header tags (H1, H2, H3) to structure your content and improve readability",
        ));
    }

    issues
}

pub fn check_images(record: &PageRecord) -> Vec<Issue> {
    if record.total_images == 0 || record.images_without_alt == 0 {
        return Vec::new();
    }

    vec![Issue::new(
        Severity::Warning,
        Category::Images,
        format!(
            "{} of {} images missing alt text",
            record.images_without_alt, record.total_images
        ),
        &record.url,
        "Add descriptive alt text to all images for better accessibility and SEO",
    )]
}

pub fn check_content(record: &PageRecord) -> Vec<Issue> {
    let url = &record.url;
    let words = record.word_count;

    let issue = if words < LOW_WORD_COUNT {
        Issue::new(
            Severity::Warning,
            Category::Content,
            format!("Low content volume ({} words)", words),
            url,
            "Add more substantive content (aim for 300+ words) to provide value to users",
        )
    } else if words < GOOD_WORD_COUNT {
        Issue::new(
            Severity::Info,
            Category::Content,
            format!("Moderate content volume ({} words)", words),
            url,
            "Consider expanding content to 300+ words for better SEO performance",
        )
    } else {
        return Vec::new();
    };

    vec![issue]
}

pub fn check_technical(record: &PageRecord) -> Vec<Issue> {
    let url = &record.url;
    let mut issues = Vec::new();

    if !record.has_viewport_meta {
        issues.push(Issue::new(
            Severity::Warning,
            Category::Technical,
            "Missing viewport meta tag",
            url,
            r#"Add viewport meta tag: <meta name="viewport" content="width=device-width, initial-scale=1">"#,
        ));
    }

    if record.lang_attribute.is_empty() {
        issues.push(Issue::new(
            Severity::Warning,
            Category::Technical,
            "Missing language attribute",
            url,
            r#"Add lang attribute to <html> tag (e.g., <html lang="en">)"#,
        ));
    }

    if record.canonical_url.is_empty() {
        issues.push(Issue::new(
            Severity::Info,
            Category::Technical,
            "Missing canonical URL",
            url,
            "Consider adding canonical URL to prevent duplicate content issues",
        ));
    }

    issues
}
