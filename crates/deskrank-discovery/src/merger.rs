//! Deduplication of observations into one record per product.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use deskrank_core::{
    normalize_product_key, CatalogItem, CategoryAssignment, DiscoveredItem, DiscoveryConfig,
    Observation, SourceType,
};

use crate::admit::{self, ProductInfo};
use crate::category::classify_category;
use crate::error::DiscoveryError;
use crate::image::{check_image_url, ImageCheck};
use crate::seed::{seed_social_score, SeedScore};

/// Folds observations into one [`DiscoveredItem`] per product key.
///
/// Observations are applied in arrival order. Keys are compared after
/// [`normalize_product_key`], on both the observation and the `exclusions`
/// side. Counts accumulate across all observations of a key regardless of
/// source; provenance (source, url, title) comes from the first one. Keys in
/// `exclusions` (products already in the catalog) never reach the output.
pub fn merge_observations<I>(
    observations: I,
    exclusions: &HashSet<String>,
) -> BTreeMap<String, DiscoveredItem>
where
    I: IntoIterator<Item = Observation>,
{
    let exclusions = normalized_keys(exclusions);

    observations
        .into_iter()
        .fold(BTreeMap::new(), |mut merged, mut observation| {
            observation.product_key = normalize_product_key(&observation.product_key);
            if exclusions.contains(&observation.product_key) {
                tracing::debug!(
                    product_key = %observation.product_key,
                    source = %observation.source_type,
                    "already cataloged; skipping"
                );
                return merged;
            }

            match merged.entry(observation.product_key.clone()) {
                Entry::Occupied(mut existing) => {
                    existing.get_mut().absorb(observation.engagement_delta);
                }
                Entry::Vacant(slot) => {
                    tracing::debug!(
                        product_key = %observation.product_key,
                        source = %observation.source_type,
                        "new product discovered"
                    );
                    slot.insert(DiscoveredItem::from_observation(observation));
                }
            }
            merged
        })
}

/// Merges per-source batches that were each already deduplicated.
///
/// Batches are applied in order, so the first batch containing a key supplies
/// its provenance. The exclusion contract of [`merge_observations`] applies.
pub fn combine<I>(batches: I, exclusions: &HashSet<String>) -> BTreeMap<String, DiscoveredItem>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = DiscoveredItem>,
{
    let exclusions = normalized_keys(exclusions);

    batches
        .into_iter()
        .flatten()
        .map(|mut item| {
            item.product_key = normalize_product_key(&item.product_key);
            item
        })
        .filter(|item| !exclusions.contains(&item.product_key))
        .fold(BTreeMap::new(), |mut merged, item| {
            match merged.entry(item.product_key.clone()) {
                Entry::Occupied(mut existing) => existing.get_mut().absorb_item(&item),
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
            }
            merged
        })
}

fn normalized_keys(keys: &HashSet<String>) -> HashSet<String> {
    keys.iter().map(|key| normalize_product_key(key)).collect()
}

/// Discovery operations bound to one set of tuning values.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryMerger {
    config: DiscoveryConfig,
}

impl DiscoveryMerger {
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] if `config` fails validation.
    pub fn new(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Most-mentioned products first, ties by key, capped at the configured
    /// admission limit.
    #[must_use]
    pub fn ranked_by_mentions(
        &self,
        merged: BTreeMap<String, DiscoveredItem>,
    ) -> Vec<DiscoveredItem> {
        // BTreeMap iteration is key-ordered and the sort is stable, so equal
        // mention counts stay in key order.
        let mut items: Vec<DiscoveredItem> = merged.into_values().collect();
        items.sort_by(|a, b| b.mention_count.cmp(&a.mention_count));
        items.truncate(self.config.admission_limit);
        items
    }

    /// Category for a product title; see [`classify_category`].
    #[must_use]
    pub fn classify_category(&self, title: &str) -> CategoryAssignment {
        classify_category(
            title,
            &self.config.categories,
            self.config.match_policy,
            &self.config.default_category,
        )
    }

    /// Seed social score for a freshly discovered product.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::UnsupportedSourceKind`] when no formula is
    /// configured for `source`.
    pub fn seed_social_score(
        &self,
        source: SourceType,
        mention_count: u64,
        total_engagement: u64,
    ) -> Result<SeedScore, DiscoveryError> {
        seed_social_score(
            &self.config.seed_formulas,
            source,
            mention_count,
            total_engagement,
        )
    }

    #[must_use]
    pub fn check_image_url(&self, url: Option<&str>) -> ImageCheck {
        check_image_url(
            url,
            &self.config.placeholder_patterns,
            self.config.min_image_size,
        )
    }

    /// Builds the pending catalog record for a discovered product.
    #[must_use]
    pub fn admit(
        &self,
        product: &ProductInfo,
        discovered: &DiscoveredItem,
        category_override: Option<&CategoryAssignment>,
        today: NaiveDate,
    ) -> CatalogItem {
        admit::admit(self, product, discovered, category_override, today)
    }
}

#[cfg(test)]
#[path = "merger_test.rs"]
mod tests;
