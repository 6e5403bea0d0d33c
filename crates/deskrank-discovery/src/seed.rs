//! Per-source seed social scores for newly discovered products.
//!
//! The seed only stands in until the product is scored from fresh engagement
//! data by the score calculator.

use std::collections::BTreeMap;

use deskrank_core::{SeedFormula, SocialChannel, SourceType};

use crate::error::DiscoveryError;

/// A seed value and the social channel it belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedScore {
    pub source: SourceType,
    /// `None` for sources that have no channel of their own.
    pub channel: Option<SocialChannel>,
    /// In `[0, 100]`.
    pub value: u8,
}

/// Looks up the formula for `source` and evaluates it.
///
/// A product with neither mentions nor engagement seeds at 0 whatever the
/// formula's base; otherwise the result is
/// `min(base + mentions × per_mention + round(engagement / divisor), 100)`.
///
/// # Errors
///
/// Returns [`DiscoveryError::UnsupportedSourceKind`] when `formulas` has no
/// entry for `source`.
pub fn seed_social_score(
    formulas: &BTreeMap<SourceType, SeedFormula>,
    source: SourceType,
    mention_count: u64,
    total_engagement: u64,
) -> Result<SeedScore, DiscoveryError> {
    let formula = formulas
        .get(&source)
        .ok_or(DiscoveryError::UnsupportedSourceKind(source))?;

    Ok(SeedScore {
        source,
        channel: source.social_channel(),
        value: evaluate(formula, mention_count, total_engagement),
    })
}

fn evaluate(formula: &SeedFormula, mention_count: u64, total_engagement: u64) -> u8 {
    if mention_count == 0 && total_engagement == 0 {
        return 0;
    }

    let engagement_term = formula
        .engagement_divisor
        .map_or(0, |divisor| div_round_half_up(total_engagement, divisor));

    let total = formula
        .base
        .saturating_add(mention_count.saturating_mul(formula.per_mention))
        .saturating_add(engagement_term);

    u8::try_from(total.min(100)).unwrap_or(100)
}

fn div_round_half_up(numerator: u64, divisor: u64) -> u64 {
    if divisor == 0 {
        return 0;
    }
    let remainder = numerator % divisor;
    numerator / divisor + u64::from(remainder >= divisor - remainder)
}

#[cfg(test)]
mod tests {
    use deskrank_core::DiscoveryConfig;

    use super::*;

    fn seed(source: SourceType, mentions: u64, engagement: u64) -> u8 {
        let config = DiscoveryConfig::default();
        seed_social_score(&config.seed_formulas, source, mentions, engagement)
            .expect("source has a default formula")
            .value
    }

    #[test]
    fn youtube_scales_views_by_thousand() {
        assert_eq!(seed(SourceType::Youtube, 1, 42_000), 42);
        // 1.5 rounds up.
        assert_eq!(seed(SourceType::Youtube, 1, 1_500), 2);
        assert_eq!(seed(SourceType::Youtube, 1, 1_499), 1);
        assert_eq!(seed(SourceType::Youtube, 3, 5_000_000), 100);
    }

    #[test]
    fn note_counts_mentions_only() {
        assert_eq!(seed(SourceType::Note, 3, 9_999), 30);
        assert_eq!(seed(SourceType::Note, 11, 0), 100);
    }

    #[test]
    fn zenn_adds_raw_engagement() {
        assert_eq!(seed(SourceType::Zenn, 2, 15), 35);
        assert_eq!(seed(SourceType::Zenn, 2, 500), 100);
    }

    #[test]
    fn hatena_adds_tenth_of_engagement() {
        assert_eq!(seed(SourceType::Hatena, 1, 45), 15);
        assert_eq!(seed(SourceType::Hatena, 1, 44), 14);
    }

    #[test]
    fn bestseller_starts_from_seventy() {
        assert_eq!(seed(SourceType::AmazonBestseller, 1, 0), 70);
        assert_eq!(seed(SourceType::AmazonBestseller, 1, 1_250), 83);
        assert_eq!(seed(SourceType::AmazonBestseller, 1, 1_000_000), 100);
    }

    #[test]
    fn zero_inputs_floor_at_zero_for_every_configured_source() {
        let config = DiscoveryConfig::default();
        for source in config.seed_formulas.keys().copied() {
            assert_eq!(seed(source, 0, 0), 0, "{source}");
        }
    }

    #[test]
    fn huge_inputs_saturate_at_hundred() {
        let config = DiscoveryConfig::default();
        for source in config.seed_formulas.keys().copied() {
            assert_eq!(seed(source, u64::MAX, u64::MAX), 100, "{source}");
        }
    }

    #[test]
    fn unconfigured_source_is_unsupported() {
        let config = DiscoveryConfig::default();
        let err = seed_social_score(&config.seed_formulas, SourceType::Makuake, 1, 300)
            .unwrap_err();
        assert!(
            matches!(err, DiscoveryError::UnsupportedSourceKind(SourceType::Makuake)),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn seed_carries_target_channel() {
        let config = DiscoveryConfig::default();
        let s = seed_social_score(&config.seed_formulas, SourceType::AmazonBestseller, 1, 0)
            .unwrap();
        assert_eq!(s.channel, Some(SocialChannel::Amazon));
        assert_eq!(s.source, SourceType::AmazonBestseller);
    }

    #[test]
    fn rounding_helper_handles_extremes() {
        assert_eq!(div_round_half_up(u64::MAX, u64::MAX), 1);
        assert_eq!(div_round_half_up(u64::MAX, 1), u64::MAX);
        assert_eq!(div_round_half_up(5, 10), 1);
        assert_eq!(div_round_half_up(4, 10), 0);
        assert_eq!(div_round_half_up(7, 0), 0);
    }
}
