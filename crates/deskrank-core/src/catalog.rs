use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{SocialChannel, SourceType};

/// Baseline Amazon channel score for products with no bestseller signal.
pub const DEFAULT_AMAZON_SOCIAL_SCORE: u8 = 50;

/// Display status of a catalog item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Hidden,
    /// Auto-discovered and waiting for a curator.
    Pending,
}

/// Per-channel partial scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialScore {
    pub twitter: u8,
    pub youtube: u8,
    pub amazon: u8,
    pub note: u8,
    pub zenn: u8,
    pub hatena: u8,
}

impl Default for SocialScore {
    fn default() -> Self {
        Self {
            twitter: 0,
            youtube: 0,
            amazon: DEFAULT_AMAZON_SOCIAL_SCORE,
            note: 0,
            zenn: 0,
            hatena: 0,
        }
    }
}

impl SocialScore {
    #[must_use]
    pub fn get(&self, channel: SocialChannel) -> u8 {
        match channel {
            SocialChannel::Twitter => self.twitter,
            SocialChannel::Youtube => self.youtube,
            SocialChannel::Amazon => self.amazon,
            SocialChannel::Note => self.note,
            SocialChannel::Zenn => self.zenn,
            SocialChannel::Hatena => self.hatena,
        }
    }

    /// Writes `value` into `channel`, clamped to 100.
    pub fn set(&mut self, channel: SocialChannel, value: u8) {
        let value = value.min(100);
        match channel {
            SocialChannel::Twitter => self.twitter = value,
            SocialChannel::Youtube => self.youtube = value,
            SocialChannel::Amazon => self.amazon = value,
            SocialChannel::Note => self.note = value,
            SocialChannel::Zenn => self.zenn = value,
            SocialChannel::Hatena => self.hatena = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonInfo {
    pub asin: String,
    pub url: String,
    pub affiliate_url: String,
    #[serde(default)]
    pub price: u64,
    /// Fields not modelled here (`priceUpdatedAt`, ...), kept verbatim so a
    /// read-modify-write round trip does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Where an auto-discovered item was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredFrom {
    pub source: SourceType,
    pub url: String,
    pub title: String,
    pub mention_count: u64,
}

/// A product in the ranked catalog.
///
/// Only the fields scoring, ranking and discovery admission touch are
/// modelled; everything else lands in `extra` and is written back as-is. The
/// serialized shape follows the catalog's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub needs_image_review: bool,
    pub category: String,
    pub sub_category: String,
    /// Computed score in `[0, 100]`.
    #[serde(default)]
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default)]
    pub social_score: SocialScore,
    pub amazon: AmazonInfo,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub status: ItemStatus,
    /// Manual score; `None` means the computed score is used.
    #[serde(default)]
    pub score_override: Option<u8>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovered_from: Option<DiscoveredFrom>,
    /// Site-only fields (`nameEn`, `images`, `mediaReferences`, ...) passed
    /// through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogItem {
    /// The score shown to visitors: the manual override when set, else the
    /// computed score.
    #[must_use]
    pub fn effective_score(&self) -> u8 {
        self.score_override.unwrap_or(self.score)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.status != ItemStatus::Hidden
    }
}
