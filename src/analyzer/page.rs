// src/analyzer/page.rs
// =============================================================================
// This module turns raw HTML into a PageRecord.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM, the way a browser would (html5ever)
// - Never fails: broken markup is repaired, not rejected
// - Supports CSS selectors for finding elements
//
// So analyze_page() is total: whatever comes in, a complete record comes out.
// Missing elements simply leave their fields at the default value.
// =============================================================================

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::record::PageRecord;
use crate::scope;

// All selectors are compiled once. They are constants, so parsing them
// can only fail on a typo in this file.
struct Selectors {
    title: Selector,
    meta_description: Selector,
    h1: Selector,
    h2: Selector,
    h3: Selector,
    img: Selector,
    anchor: Selector,
    viewport: Selector,
    canonical: Selector,
    robots: Selector,
    json_ld: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            title: css("title"),
            meta_description: css(r#"meta[name="description"]"#),
            h1: css("h1"),
            h2: css("h2"),
            h3: css("h3"),
            img: css("img"),
            anchor: css("a[href]"),
            viewport: css(r#"meta[name="viewport"]"#),
            canonical: css(r#"link[rel~="canonical"]"#),
            robots: css(r#"meta[name="robots"]"#),
            json_ld: css(r#"script[type="application/ld+json"]"#),
        }
    }
}

fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("hard-coded CSS selector must parse")
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(Selectors::new);
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("hard-coded regex must compile"));

/// Extracts SEO facts from pages of one site.
#[derive(Debug, Clone)]
pub struct PageAnalyzer {
    domain: String,
}

impl PageAnalyzer {
    /// `domain` is the site's authority; it is copied into every record.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Analyze one page. Never fails.
    pub fn analyze_page(&self, url: &str, html: &str) -> PageRecord {
        let document = Html::parse_document(html);
        let s = &*SELECTORS;

        let mut record = PageRecord {
            url: url.to_string(),
            domain: self.domain.clone(),
            page_size_bytes: html.len(),
            ..PageRecord::default()
        };

        // Title
        record.title = document
            .select(&s.title)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default();
        record.title_length = record.title.chars().count();

        // Meta description: present only if the content is non-blank
        let description = first_attr(&document, &s.meta_description, "content")
            .map(|content| content.trim().to_string())
            .unwrap_or_default();
        if !description.is_empty() {
            record.has_meta_description = true;
            record.meta_desc_length = description.chars().count();
            record.meta_description = description;
        }

        // Headings
        let h1s: Vec<ElementRef> = document.select(&s.h1).collect();
        record.h1_count = h1s.len();
        record.h1_text = h1s.first().map(element_text).unwrap_or_default();
        record.h2_count = document.select(&s.h2).count();
        record.h3_count = document.select(&s.h3).count();
        record.total_headings = record.h1_count + record.h2_count + record.h3_count;

        // Images
        for img in document.select(&s.img) {
            record.total_images += 1;
            let has_alt = img
                .value()
                .attr("alt")
                .map(|alt| !alt.trim().is_empty())
                .unwrap_or(false);
            if !has_alt {
                record.images_without_alt += 1;
            }
        }

        // Links
        let page_authority = scope::authority_of(url);
        for anchor in document.select(&s.anchor) {
            record.total_links += 1;
            let href = anchor.value().attr("href").unwrap_or_default();
            match classify_link(href, &page_authority) {
                LinkKind::Internal => record.internal_links += 1,
                LinkKind::External => record.external_links += 1,
                LinkKind::Skipped => {}
            }
        }

        // Content
        record.word_count = count_words(&document);

        // Technical
        record.has_viewport_meta = document.select(&s.viewport).next().is_some();
        record.lang_attribute = document
            .root_element()
            .value()
            .attr("lang")
            .unwrap_or_default()
            .to_string();
        record.canonical_url = first_attr(&document, &s.canonical, "href")
            .unwrap_or_default()
            .to_string();
        record.robots_meta = first_attr(&document, &s.robots, "content")
            .unwrap_or_default()
            .to_string();
        record.schema_markup = document.select(&s.json_ld).next().is_some();

        record
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LinkKind {
    Internal,
    External,
    Skipped,
}

// Absolute http(s) links are compared by authority; everything else that
// isn't an anchor or javascript: is relative, hence internal.
fn classify_link(href: &str, page_authority: &str) -> LinkKind {
    if href.starts_with('#') || href.starts_with("javascript:") {
        LinkKind::Skipped
    } else if href.starts_with("http") {
        if scope::authority_of(href) == page_authority {
            LinkKind::Internal
        } else {
            LinkKind::External
        }
    } else {
        LinkKind::Internal
    }
}

// Attribute of the first element matching `selector`, if both exist
fn first_attr<'a>(document: &'a Html, selector: &Selector, attr: &str) -> Option<&'a str> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

// Counts \w+ tokens in the document text, ignoring anything inside
// <script> or <style>
fn count_words(document: &Html) -> usize {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| matches!(el.name(), "script" | "style"))
                .unwrap_or(false)
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    WORD.find_iter(&text.to_lowercase()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(html: &str) -> PageRecord {
        PageAnalyzer::new("example.com").analyze_page("https://example.com/page", html)
    }

    fn words(n: usize) -> String {
        vec!["lorem"; n].join(" ")
    }

    #[test]
    fn test_bare_page_gets_defaults() {
        let html = format!(
            r#"<html><body><p>{}</p>
            <img src="a.png"><img src="b.png" alt=""><img src="c.png" alt="   ">
            </body></html>"#,
            words(100)
        );
        let record = analyze(&html);

        assert_eq!(record.url, "https://example.com/page");
        assert_eq!(record.domain, "example.com");
        assert_eq!(record.title, "");
        assert_eq!(record.title_length, 0);
        assert!(!record.has_meta_description);
        assert_eq!(record.h1_count, 0);
        assert_eq!(record.total_headings, 0);
        assert_eq!(record.total_images, 3);
        assert_eq!(record.images_without_alt, 3);
        assert_eq!(record.word_count, 100);
        assert_eq!(record.page_size_bytes, html.len());
        assert!(!record.has_viewport_meta);
        assert_eq!(record.lang_attribute, "");
        assert_eq!(record.canonical_url, "");
    }

    #[test]
    fn test_full_head_is_extracted() {
        let html = r#"<!DOCTYPE html>
            <html lang="en">
            <head>
                <title>  Best Coffee Beans in Town | Example  </title>
                <meta name="description" content="  Fresh roasted beans.  ">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <meta name="robots" content="index, follow">
                <link rel="canonical" href="https://example.com/coffee">
                <script type="application/ld+json">{"@type": "Store"}</script>
            </head>
            <body><h1> Coffee </h1><h2>Beans</h2><h2>Roasts</h2><h3>Dark</h3></body>
            </html>"#;
        let record = analyze(html);

        assert_eq!(record.title, "Best Coffee Beans in Town | Example");
        assert_eq!(record.title_length, 35);
        assert!(record.has_meta_description);
        assert_eq!(record.meta_description, "Fresh roasted beans.");
        assert_eq!(record.meta_desc_length, 20);
        assert_eq!(record.h1_count, 1);
        assert_eq!(record.h1_text, "Coffee");
        assert_eq!(record.h2_count, 2);
        assert_eq!(record.h3_count, 1);
        assert_eq!(record.total_headings, 4);
        assert!(record.has_viewport_meta);
        assert_eq!(record.lang_attribute, "en");
        assert_eq!(record.canonical_url, "https://example.com/coffee");
        assert_eq!(record.robots_meta, "index, follow");
        assert!(record.schema_markup);
    }

    #[test]
    fn test_blank_meta_description_counts_as_missing() {
        let record = analyze(r#"<head><meta name="description" content="   "></head>"#);
        assert!(!record.has_meta_description);
        assert_eq!(record.meta_desc_length, 0);
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        let record = analyze("<title>Café Münster</title>");
        assert_eq!(record.title_length, 12);
    }

    #[test]
    fn test_link_classification() {
        let html = r##"<body>
            <a href="/about">About</a>
            <a href="contact.html">Contact</a>
            <a href="https://example.com/blog">Blog</a>
            <a href="https://twitter.com/example">Twitter</a>
            <a href="http://example.com:8080/admin">Other port</a>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">Menu</a>
            <a name="no-href">Not a link</a>
        </body>"##;
        let record = analyze(html);

        assert_eq!(record.total_links, 7);
        assert_eq!(record.internal_links, 3);
        assert_eq!(record.external_links, 2);
        assert!(record.internal_links + record.external_links <= record.total_links);
    }

    #[test]
    fn test_word_count_ignores_script_and_style() {
        let html = r#"<html><head>
            <style>body { color: red; } .hidden { display: none }</style>
            <script>var lots = "of words that should not count";</script>
            </head><body>
            <p>Three visible words</p>
            <script type="application/ld+json">{"name": "ignored too"}</script>
            </body></html>"#;
        assert_eq!(analyze(html).word_count, 3);
    }

    #[test]
    fn test_images_with_alt_text() {
        let html = r#"<img src="a.png" alt="A cat"><img src="b.png">"#;
        let record = analyze(html);
        assert_eq!(record.total_images, 2);
        assert_eq!(record.images_without_alt, 1);
        assert!(record.images_without_alt <= record.total_images);
    }

    #[test]
    fn test_first_h1_and_first_title_win() {
        let html = "<title>First</title><title>Second</title><h1>One</h1><h1>Two</h1>";
        let record = analyze(html);
        assert_eq!(record.title, "First");
        assert_eq!(record.h1_count, 2);
        assert_eq!(record.h1_text, "One");
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        let record = analyze("<html><body><h1>Unclosed <p>text <img alt='x'</div></div>");
        assert_eq!(record.h1_count, 1);
        assert!(record.word_count >= 2);

        let empty = analyze("");
        assert_eq!(empty.word_count, 0);
        assert_eq!(empty.page_size_bytes, 0);
    }

    #[test]
    fn test_classify_link() {
        assert_eq!(classify_link("#x", "example.com"), LinkKind::Skipped);
        assert_eq!(classify_link("javascript:go()", "example.com"), LinkKind::Skipped);
        assert_eq!(classify_link("mailto:a@b.c", "example.com"), LinkKind::Internal);
        assert_eq!(
            classify_link("https://example.com/x", "example.com"),
            LinkKind::Internal
        );
        assert_eq!(
            classify_link("https://cdn.example.com/x", "example.com"),
            LinkKind::External
        );
    }
}
