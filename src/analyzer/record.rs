// src/analyzer/record.rs
// =============================================================================
// PageRecord: the SEO facts extracted from one page.
//
// Every field always has a value (0, false or "" when the page doesn't have
// the element), so code reading a record never has to deal with missing data.
// Lengths are counted in characters (Unicode scalar values), not bytes.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Structured SEO facts for one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    // Identity
    pub url: String,
    pub domain: String,

    // <title>
    pub title: String,
    pub title_length: usize,

    // <meta name="description">
    pub has_meta_description: bool,
    pub meta_description: String,
    pub meta_desc_length: usize,

    // Headings
    pub h1_count: usize,
    /// Text of the first <h1>, trimmed
    pub h1_text: String,
    pub h2_count: usize,
    pub h3_count: usize,
    /// h1_count + h2_count + h3_count
    pub total_headings: usize,

    // Images
    pub total_images: usize,
    /// Images whose alt attribute is missing, empty or only whitespace
    pub images_without_alt: usize,

    // Links. Anchor-only and javascript: links are in total_links but in
    // neither internal_links nor external_links.
    pub total_links: usize,
    pub internal_links: usize,
    pub external_links: usize,

    // Content
    pub word_count: usize,
    pub page_size_bytes: usize,

    // Technical
    pub has_viewport_meta: bool,
    pub lang_attribute: String,
    pub canonical_url: String,
    pub robots_meta: String,
    /// At least one <script type="application/ld+json"> block
    pub schema_markup: bool,
}

impl PageRecord {
    /// Fraction of images that carry alt text, 1.0 when there are no images.
    pub fn alt_coverage(&self) -> f64 {
        if self.total_images == 0 {
            return 1.0;
        }
        let with_alt = self.total_images.saturating_sub(self.images_without_alt);
        with_alt as f64 / self.total_images as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_fully_populated() {
        let record = PageRecord::default();
        assert_eq!(record.title, "");
        assert_eq!(record.word_count, 0);
        assert!(!record.has_meta_description);
        assert!(!record.schema_markup);
    }

    #[test]
    fn test_alt_coverage() {
        let mut record = PageRecord::default();
        assert_eq!(record.alt_coverage(), 1.0);

        record.total_images = 4;
        record.images_without_alt = 1;
        assert_eq!(record.alt_coverage(), 0.75);
    }

    #[test]
    fn test_serializes_with_every_field() {
        let json = serde_json::to_value(PageRecord::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 24);
        assert_eq!(object["canonical_url"], "");
        assert_eq!(object["images_without_alt"], 0);
    }
}
