//! Turning a discovered product into a pending catalog record.

use std::sync::LazyLock;

use chrono::NaiveDate;
use deskrank_core::{
    AmazonInfo, CatalogItem, CategoryAssignment, DiscoveredFrom, DiscoveredItem, ItemStatus,
    SocialScore,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::image::high_res_image_url;
use crate::merger::DiscoveryMerger;

const SHORT_DESCRIPTION_CHARS: usize = 30;

/// Leading bracketed promo tag, e.g. `【2025年モデル】`.
static PROMO_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^【[^】]*】\s*").expect("valid promo tag regex"));

/// Product metadata fetched from the marketplace page by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub asin: String,
    pub title: String,
    pub price: Option<u64>,
    /// Candidate image URLs in page order (main image first).
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Extracts a brand guess: the first word of the title once a leading
/// `【…】` tag is removed. Splits on ASCII and ideographic spaces.
#[must_use]
pub fn brand_from_title(title: &str) -> String {
    let cleaned = PROMO_TAG.replace(title, "");
    cleaned
        .split([' ', '\u{3000}'])
        .find(|word| !word.is_empty())
        .map_or_else(|| "Unknown".to_string(), str::to_string)
}

/// Picks the first candidate whose high-res rendition passes the image
/// checks. Falls back to the first candidate, flagged for review.
///
/// Returns `(image_url, needs_review)`.
fn choose_image(merger: &DiscoveryMerger, candidates: &[String]) -> (Option<String>, bool) {
    for candidate in candidates {
        let high_res = high_res_image_url(candidate);
        let check = merger.check_image_url(Some(&high_res));
        if check.is_valid() {
            return (Some(high_res), false);
        }
        tracing::debug!(url = %high_res, reason = %check, "image candidate rejected");
    }

    match candidates.first() {
        Some(first) => (Some(high_res_image_url(first)), true),
        None => (None, true),
    }
}

fn seeded_social_score(merger: &DiscoveryMerger, discovered: &DiscoveredItem) -> SocialScore {
    let mut social = SocialScore::default();

    match merger.seed_social_score(
        discovered.source_type,
        discovered.mention_count,
        discovered.total_engagement,
    ) {
        Ok(seed) => match seed.channel {
            Some(channel) => social.set(channel, seed.value),
            None => tracing::debug!(
                product_key = %discovered.product_key,
                source = %discovered.source_type,
                "source has no social channel; seed dropped"
            ),
        },
        Err(e) => tracing::warn!(
            product_key = %discovered.product_key,
            error = %e,
            "no seed score; keeping baseline social score"
        ),
    }

    social
}

pub(crate) fn admit(
    merger: &DiscoveryMerger,
    product: &ProductInfo,
    discovered: &DiscoveredItem,
    category_override: Option<&CategoryAssignment>,
    today: NaiveDate,
) -> CatalogItem {
    let category = category_override
        .cloned()
        .unwrap_or_else(|| merger.classify_category(&product.title));

    let (image_url, needs_image_review) = choose_image(merger, &product.image_urls);
    if needs_image_review {
        tracing::warn!(asin = %product.asin, "no usable image; flagged for review");
    }

    let url = format!("https://www.amazon.co.jp/dp/{}", product.asin);
    let affiliate_url = match merger.config().affiliate_tag.as_deref() {
        Some(tag) if !tag.is_empty() => format!("{url}?tag={tag}"),
        _ => url.clone(),
    };

    CatalogItem {
        id: format!("{}-{}", category.sub_category, product.asin.to_lowercase()),
        name: product.title.clone(),
        description: format!("{}で紹介された商品", discovered.source_title),
        short_description: product.title.chars().take(SHORT_DESCRIPTION_CHARS).collect(),
        image_url,
        needs_image_review,
        category: category.category,
        sub_category: category.sub_category,
        score: 0,
        rank: None,
        social_score: seeded_social_score(merger, discovered),
        amazon: AmazonInfo {
            asin: product.asin.clone(),
            url,
            affiliate_url,
            price: product.price.unwrap_or(0),
            extra: serde_json::Map::new(),
        },
        tags: Vec::new(),
        brand: Some(brand_from_title(&product.title)),
        featured: false,
        is_new: true,
        status: ItemStatus::Pending,
        score_override: None,
        created_at: today,
        updated_at: today,
        discovered_from: Some(DiscoveredFrom {
            source: discovered.source_type,
            url: discovered.source_url.clone(),
            title: discovered.source_title.clone(),
            mention_count: discovered.mention_count,
        }),
        extra: serde_json::Map::new(),
    }
}
