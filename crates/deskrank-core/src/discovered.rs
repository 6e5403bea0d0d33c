use serde::{Deserialize, Serialize};

use crate::SourceType;

/// Canonical form of a product key: trimmed, ASCII-uppercased.
///
/// Marketplace catalog numbers are case-insensitive but links carry them in
/// either case.
#[must_use]
pub fn normalize_product_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

/// One fact handed over by a source adapter: a product was referenced once,
/// with `engagement_delta` worth of reactions attached to the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub product_key: String,
    pub source_type: SourceType,
    pub engagement_delta: u64,
    pub title: String,
    pub url: String,
}

/// A product seen in one or more sources that is not in the catalog yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredItem {
    /// Marketplace catalog number (ASIN), unique per physical product.
    pub product_key: String,
    /// Source of the first observation.
    pub source_type: SourceType,
    pub source_url: String,
    pub source_title: String,
    /// Number of observations merged into this record. Always `>= 1`.
    pub mention_count: u64,
    pub total_engagement: u64,
}

impl DiscoveredItem {
    /// Starts a record from its first observation.
    #[must_use]
    pub fn from_observation(observation: Observation) -> Self {
        Self {
            product_key: observation.product_key,
            source_type: observation.source_type,
            source_url: observation.url,
            source_title: observation.title,
            mention_count: 1,
            total_engagement: observation.engagement_delta,
        }
    }

    /// Folds a later observation of the same product into this record.
    ///
    /// Provenance fields stay with the first observation.
    pub fn absorb(&mut self, engagement_delta: u64) {
        self.mention_count = self.mention_count.saturating_add(1);
        self.total_engagement = self.total_engagement.saturating_add(engagement_delta);
    }

    /// Folds another partially merged record of the same product into this one.
    pub fn absorb_item(&mut self, other: &DiscoveredItem) {
        self.mention_count = self.mention_count.saturating_add(other.mention_count);
        self.total_engagement = self.total_engagement.saturating_add(other.total_engagement);
    }
}
