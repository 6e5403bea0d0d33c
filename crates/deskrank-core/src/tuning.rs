//! Tuning tables for the score calculator and the discovery merger.
//!
//! Every section of the YAML tuning file is optional; missing sections fall
//! back to the defaults defined here. The defaults are seed values sized for
//! the Japanese desk-gadget niche and are expected to be recalibrated.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, SourceType};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Root of the tuning file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub scoring: ScoringConfig,
    pub discovery: DiscoveryConfig,
}

impl Tuning {
    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.discovery.validate()
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub ceilings: NormalizationCeilings,
    pub weights: ScoreWeights,
    pub rounding: RoundingPolicy,
    pub engagement_mix: EngagementMix,
}

impl ScoringConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a zero ceiling, a negative or
    /// non-finite weight, or weights that do not sum to 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ceilings = [
            ("mention_count", self.ceilings.mention_count),
            ("mention_engagement", self.ceilings.mention_engagement),
            ("view_magnitude", self.ceilings.view_magnitude),
            ("view_engagement", self.ceilings.view_engagement),
        ];
        for (name, ceiling) in ceilings {
            if ceiling == 0 {
                return Err(ConfigError::Validation(format!(
                    "ceiling for {name} must be greater than zero"
                )));
            }
        }

        let weights = [
            ("mention_count", self.weights.mention_count),
            ("mention_engagement", self.weights.mention_engagement),
            ("view_magnitude", self.weights.view_magnitude),
            ("view_engagement", self.weights.view_engagement),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "weight for {name} must be a finite non-negative number, got {weight}"
                )));
            }
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::Validation(format!(
                "score weights must sum to 1.0, got {sum}"
            )));
        }

        Ok(())
    }
}

/// Raw values that map to a normalized factor of exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationCeilings {
    pub mention_count: u64,
    pub mention_engagement: u64,
    pub view_magnitude: u64,
    pub view_engagement: u64,
}

impl Default for NormalizationCeilings {
    fn default() -> Self {
        Self {
            mention_count: 1_000,
            mention_engagement: 5_000,
            view_magnitude: 100_000,
            view_engagement: 10_000,
        }
    }
}

/// Share of each normalized factor in the final score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub mention_count: f64,
    pub mention_engagement: f64,
    pub view_magnitude: f64,
    pub view_engagement: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            mention_count: 0.30,
            mention_engagement: 0.20,
            view_magnitude: 0.30,
            view_engagement: 0.20,
        }
    }
}

impl ScoreWeights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.mention_count + self.mention_engagement + self.view_magnitude + self.view_engagement
    }
}

/// How a fractional score is rounded to an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingPolicy {
    /// `12.5 -> 13`, `13.5 -> 14`.
    #[default]
    HalfUp,
    /// `12.5 -> 12`, `13.5 -> 14`.
    HalfEven,
}

impl RoundingPolicy {
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            RoundingPolicy::HalfUp => value.round(),
            RoundingPolicy::HalfEven => value.round_ties_even(),
        }
    }
}

/// Multipliers used when folding raw reaction counts into engagement totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementMix {
    /// Weight of a reshare relative to a like in mention engagement.
    pub reshare_weight: u64,
    /// Weight of a comment relative to a like in view engagement.
    pub comment_weight: u64,
}

impl Default for EngagementMix {
    fn default() -> Self {
        Self {
            reshare_weight: 2,
            comment_weight: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Which keyword wins when several match a product title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// The first matching entry in table order.
    FirstMatch,
    /// The longest matching keyword; table order breaks ties.
    #[default]
    LongestMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub category: String,
    pub sub_category: String,
}

impl CategoryAssignment {
    #[must_use]
    pub fn new(category: &str, sub_category: &str) -> Self {
        Self {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
        }
    }
}

impl Default for CategoryAssignment {
    fn default() -> Self {
        Self::new("device", "other")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Substring searched for in the product title (case-sensitive).
    pub keyword: String,
    pub category: String,
    pub sub_category: String,
}

impl CategoryRule {
    fn new(keyword: &str, category: &str, sub_category: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            category: category.to_string(),
            sub_category: sub_category.to_string(),
        }
    }

    #[must_use]
    pub fn assignment(&self) -> CategoryAssignment {
        CategoryAssignment::new(&self.category, &self.sub_category)
    }
}

/// Seed social score for one source:
/// `min(base + mentions * per_mention + round(engagement / engagement_divisor), 100)`.
///
/// The engagement term is dropped when `engagement_divisor` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFormula {
    #[serde(default)]
    pub base: u64,
    #[serde(default)]
    pub per_mention: u64,
    #[serde(default)]
    pub engagement_divisor: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub match_policy: MatchPolicy,
    /// Ordered keyword table. Order matters under [`MatchPolicy::FirstMatch`]
    /// and for ties under [`MatchPolicy::LongestMatch`].
    pub categories: Vec<CategoryRule>,
    pub default_category: CategoryAssignment,
    /// Sources without an entry have no seed score.
    pub seed_formulas: BTreeMap<SourceType, SeedFormula>,
    /// Case-insensitive substrings marking an image URL as a placeholder.
    pub placeholder_patterns: Vec<String>,
    /// Smallest acceptable `_SX/_SY/_SL` size token in an image URL.
    pub min_image_size: u32,
    /// Associate tag appended to marketplace links, if any.
    pub affiliate_tag: Option<String>,
    /// Upper bound on discoveries handed to admission per run.
    pub admission_limit: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            categories: default_category_rules(),
            default_category: CategoryAssignment::default(),
            seed_formulas: default_seed_formulas(),
            placeholder_patterns: default_placeholder_patterns(),
            min_image_size: 100,
            affiliate_tag: None,
            admission_limit: 50,
        }
    }
}

impl DiscoveryConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for empty or duplicate keywords, a
    /// zero engagement divisor, or a zero admission limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for rule in &self.categories {
            if rule.keyword.is_empty() {
                return Err(ConfigError::Validation(
                    "category keyword must be non-empty".to_string(),
                ));
            }
            if !seen.insert(rule.keyword.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category keyword: '{}'",
                    rule.keyword
                )));
            }
        }

        for (source, formula) in &self.seed_formulas {
            if formula.engagement_divisor == Some(0) {
                return Err(ConfigError::Validation(format!(
                    "seed formula for {source} has a zero engagement divisor"
                )));
            }
        }

        if self.admission_limit == 0 {
            return Err(ConfigError::Validation(
                "admission_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("キーボード", "device", "keyboard"),
        CategoryRule::new("マウス", "device", "mouse"),
        CategoryRule::new("トラックボール", "device", "trackball"),
        CategoryRule::new("モニター", "device", "monitor"),
        CategoryRule::new("ディスプレイ", "device", "monitor"),
        CategoryRule::new("ヘッドホン", "device", "headphone"),
        CategoryRule::new("イヤホン", "device", "earphone"),
        CategoryRule::new("マイク", "device", "microphone"),
        CategoryRule::new("Webカメラ", "device", "webcam"),
        CategoryRule::new("ウェブカメラ", "device", "webcam"),
        CategoryRule::new("スピーカー", "device", "speaker"),
        CategoryRule::new("デスク", "furniture", "desk"),
        CategoryRule::new("チェア", "furniture", "chair"),
        CategoryRule::new("椅子", "furniture", "chair"),
        CategoryRule::new("モニターアーム", "furniture", "monitor-arm"),
        CategoryRule::new("アーム", "furniture", "monitor-arm"),
        CategoryRule::new("ライト", "lighting", "desk-light"),
        CategoryRule::new("照明", "lighting", "ambient-light"),
        CategoryRule::new("デスクマット", "lighting", "desk-mat"),
        CategoryRule::new("DAC", "audio", "dac-amp"),
        CategoryRule::new("アンプ", "audio", "dac-amp"),
        CategoryRule::new("Bluetooth レシーバー", "audio", "bluetooth-receiver"),
        CategoryRule::new("充電器", "accessory", "charger"),
        CategoryRule::new("電源タップ", "accessory", "charger"),
        CategoryRule::new("USBハブ", "accessory", "hub"),
        CategoryRule::new("ドック", "accessory", "hub"),
        CategoryRule::new("ケーブル", "accessory", "cable"),
    ]
}

fn default_seed_formulas() -> BTreeMap<SourceType, SeedFormula> {
    BTreeMap::from([
        (
            SourceType::Youtube,
            SeedFormula {
                base: 0,
                per_mention: 0,
                engagement_divisor: Some(1_000),
            },
        ),
        (
            SourceType::Note,
            SeedFormula {
                base: 0,
                per_mention: 10,
                engagement_divisor: None,
            },
        ),
        (
            SourceType::Zenn,
            SeedFormula {
                base: 0,
                per_mention: 10,
                engagement_divisor: Some(1),
            },
        ),
        (
            SourceType::Hatena,
            SeedFormula {
                base: 0,
                per_mention: 10,
                engagement_divisor: Some(10),
            },
        ),
        (
            SourceType::AmazonBestseller,
            SeedFormula {
                base: 70,
                per_mention: 0,
                engagement_divisor: Some(100),
            },
        ),
    ])
}

fn default_placeholder_patterns() -> Vec<String> {
    [
        "no-img",
        "no_image",
        "placeholder",
        "G/01/x-locale/common/transparent-pixel",
        "images/I/01RmK",
        "sprite",
        "blank",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Load and validate a tuning file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TuningFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let tuning: Tuning = serde_yaml::from_str(&content)?;
    tuning.validate()?;

    Ok(tuning)
}

#[cfg(test)]
#[path = "tuning_test.rs"]
mod tests;
