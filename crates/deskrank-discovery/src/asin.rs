//! Extraction of marketplace catalog numbers (ASINs) from free text.
//!
//! Adapters run this over article bodies, link lists and video descriptions
//! to turn product links into observation keys.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Canonical product-page links on the Japanese and US storefronts.
///
/// Short links (`amzn.to/...`, `amzn.asia/d/...`) are not matched: their
/// path is a redirect token, not a catalog number, and resolving it needs a
/// network round-trip.
static PRODUCT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)amazon\.(?:co\.jp|com)/(?:[^\s/?#]+/)*(?:dp|gp/product)/([A-Z0-9]{10})")
        .expect("valid product link regex")
});

/// Returns every distinct catalog number linked from `text`, uppercased, in
/// order of first appearance.
#[must_use]
pub fn extract_product_keys(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PRODUCT_LINK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_dp_link() {
        let keys = extract_product_keys("おすすめ https://www.amazon.co.jp/dp/B08XYZ1234 です");
        assert_eq!(keys, vec!["B08XYZ1234"]);
    }

    #[test]
    fn extracts_gp_product_link() {
        let keys = extract_product_keys("https://amazon.co.jp/gp/product/B0ABCDE123?th=1");
        assert_eq!(keys, vec!["B0ABCDE123"]);
    }

    #[test]
    fn extracts_link_with_slug_before_dp() {
        let keys = extract_product_keys(
            "https://www.amazon.co.jp/%E3%83%AD%E3%82%B8/dp/B0CHGXNJFM/ref=sr_1_1",
        );
        assert_eq!(keys, vec!["B0CHGXNJFM"]);
    }

    #[test]
    fn extracts_us_storefront_links() {
        let keys = extract_product_keys(
            "amazon.com/dp/B000000001 and amazon.com/gp/product/B000000002",
        );
        assert_eq!(keys, vec!["B000000001", "B000000002"]);
    }

    #[test]
    fn uppercases_and_deduplicates_in_first_seen_order() {
        let text = "amazon.co.jp/dp/b0second01 amazon.co.jp/dp/B0FIRST001 \
                    amazon.co.jp/dp/B0SECOND01";
        let keys = extract_product_keys(text);
        assert_eq!(keys, vec!["B0SECOND01", "B0FIRST001"]);
    }

    #[test]
    fn short_links_are_skipped() {
        let keys = extract_product_keys("https://amzn.to/3AbCdEf https://amzn.asia/d/abcdefghij");
        assert!(keys.is_empty(), "got {keys:?}");
    }

    #[test]
    fn text_without_links_yields_nothing() {
        assert!(extract_product_keys("デスクツアー 2025").is_empty());
        assert!(extract_product_keys("").is_empty());
    }
}
