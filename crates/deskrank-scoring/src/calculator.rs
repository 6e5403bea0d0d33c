//! Weighted-sum score calculator.

use deskrank_core::{ConfigError, EngagementFactors, NormalizedFactors, ScoringConfig};
use serde::{Deserialize, Serialize};

/// Previously stored per-source 0-100 scores, used when raw counts are gone.
///
/// `mention_source` is the score of the mention-heavy source (posts on X),
/// `view_source` the score of the view-heavy source (video).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub mention_source: u8,
    pub view_source: u8,
}

/// Maps [`EngagementFactors`] onto a 0-100 popularity score.
///
/// Holds only its configuration, so one instance can be shared freely across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl ScoreCalculator {
    /// Builds a calculator from validated tuning values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `config` fails
    /// [`ScoringConfig::validate`].
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Divides each raw field by its ceiling and saturates at 1.0.
    #[must_use]
    pub fn normalize(&self, factors: &EngagementFactors) -> NormalizedFactors {
        let ceilings = &self.config.ceilings;
        NormalizedFactors {
            mention_count: saturating_ratio(factors.mention_count, ceilings.mention_count),
            mention_engagement: saturating_ratio(
                factors.mention_engagement,
                ceilings.mention_engagement,
            ),
            view_magnitude: saturating_ratio(factors.view_magnitude, ceilings.view_magnitude),
            view_engagement: saturating_ratio(factors.view_engagement, ceilings.view_engagement),
        }
    }

    /// `round(100 × Σ weight × normalized)`, using the configured rounding
    /// policy and clamped to `[0, 100]`.
    #[must_use]
    pub fn score(&self, factors: &EngagementFactors) -> u8 {
        self.score_normalized(&self.normalize(factors))
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn score_normalized(&self, normalized: &NormalizedFactors) -> u8 {
        let weights = &self.config.weights;
        let weighted = normalized.mention_count * weights.mention_count
            + normalized.mention_engagement * weights.mention_engagement
            + normalized.view_magnitude * weights.view_magnitude
            + normalized.view_engagement * weights.view_engagement;

        // Clamped to [0, 100] first, so the cast cannot truncate.
        self.config
            .rounding
            .apply(snap_to_half(weighted * 100.0))
            .clamp(0.0, 100.0) as u8
    }

    /// Re-inflates stored per-source scores into pseudo-raw factors:
    /// `raw = composite / 100 × ceiling`, rounded half-up.
    ///
    /// This is lossy. The mention-source score is spread over both mention
    /// fields and the view-source score over both view fields, so scoring the
    /// result does not reproduce the original score when the original raw
    /// fields were unbalanced. Composites above 100 are treated as 100.
    #[must_use]
    pub fn factors_from_composite_score(&self, composite: CompositeScore) -> EngagementFactors {
        let ceilings = &self.config.ceilings;
        EngagementFactors {
            mention_count: reinflate(composite.mention_source, ceilings.mention_count),
            mention_engagement: reinflate(composite.mention_source, ceilings.mention_engagement),
            view_magnitude: reinflate(composite.view_source, ceilings.view_magnitude),
            view_engagement: reinflate(composite.view_source, ceilings.view_engagement),
        }
    }
}

/// Values within [`TIE_EPSILON`] of an `x.5` tie are treated as the tie.
///
/// `0.3 × 0.75 × 100` evaluates to `22.499…` in binary floating point; without
/// snapping the rounding policy would never see the tie.
const TIE_EPSILON: f64 = 1e-9;

fn snap_to_half(value: f64) -> f64 {
    let nearest_half = (value * 2.0).round() / 2.0;
    if (value - nearest_half).abs() < TIE_EPSILON {
        nearest_half
    } else {
        value
    }
}

fn saturating_ratio(raw: u64, ceiling: u64) -> f64 {
    if ceiling == 0 {
        return if raw == 0 { 0.0 } else { 1.0 };
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = raw as f64 / ceiling as f64;
    ratio.min(1.0)
}

fn reinflate(composite: u8, ceiling: u64) -> u64 {
    let composite = u128::from(composite.min(100));
    let raw = (composite * u128::from(ceiling) + 50) / 100;
    u64::try_from(raw).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
