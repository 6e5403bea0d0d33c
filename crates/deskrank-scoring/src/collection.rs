//! Mapping from per-source collection summaries to engagement factors and
//! the per-channel social breakdown shown next to each item.

use deskrank_core::catalog::DEFAULT_AMAZON_SOCIAL_SCORE;
use deskrank_core::{EngagementFactors, EngagementMix, SocialScore};
use serde::{Deserialize, Serialize};

/// Aggregated result of a mention search (posts on X) for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSummary {
    pub post_count: u64,
    pub total_likes: u64,
    pub total_reshares: u64,
    pub total_replies: u64,
}

/// Aggregated result of a video search for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub video_count: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

/// Builds score factors from whatever the adapters returned.
///
/// A missing summary (adapter failed or was skipped) contributes zeros.
#[must_use]
pub fn factors_from_collection(
    mentions: Option<&MentionSummary>,
    views: Option<&ViewSummary>,
    mix: &EngagementMix,
) -> EngagementFactors {
    let mentions = mentions.copied().unwrap_or_default();
    let views = views.copied().unwrap_or_default();

    EngagementFactors {
        mention_count: mentions.post_count,
        mention_engagement: mentions
            .total_likes
            .saturating_add(mentions.total_reshares.saturating_mul(mix.reshare_weight)),
        view_magnitude: views.total_views,
        view_engagement: views
            .total_likes
            .saturating_add(views.total_comments.saturating_mul(mix.comment_weight)),
    }
}

/// Recomputes the twitter and youtube channels from fresh summaries.
///
/// - twitter: `round((posts + likes / 10) / 10)`
/// - youtube: `round((videos × 10 + views / 1000) / 10)`
///
/// Both are capped at 100. The amazon channel and the discovery-seeded
/// blog channels are carried over from `previous`; an absent or zero amazon
/// channel starts at its baseline.
#[must_use]
pub fn social_breakdown(
    mentions: Option<&MentionSummary>,
    views: Option<&ViewSummary>,
    previous: Option<&SocialScore>,
) -> SocialScore {
    let mentions = mentions.copied().unwrap_or_default();
    let views = views.copied().unwrap_or_default();

    #[allow(clippy::cast_precision_loss)]
    let twitter = (mentions.post_count as f64 + mentions.total_likes as f64 / 10.0) / 10.0;
    #[allow(clippy::cast_precision_loss)]
    let youtube = (views.video_count as f64 * 10.0 + views.total_views as f64 / 1_000.0) / 10.0;

    let carried = previous.copied().unwrap_or_default();
    SocialScore {
        twitter: capped_channel(twitter),
        youtube: capped_channel(youtube),
        amazon: previous
            .map(|p| p.amazon)
            .filter(|&amazon| amazon > 0)
            .unwrap_or(DEFAULT_AMAZON_SOCIAL_SCORE),
        note: carried.note,
        zenn: carried.zenn,
        hatena: carried.hatena,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn capped_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_summaries_produce_zero_factors() {
        let f = factors_from_collection(None, None, &EngagementMix::default());
        assert_eq!(f, EngagementFactors::default());
    }

    #[test]
    fn reshares_and_comments_are_weighted() {
        let mentions = MentionSummary {
            post_count: 12,
            total_likes: 100,
            total_reshares: 30,
            total_replies: 999,
        };
        let views = ViewSummary {
            video_count: 3,
            total_views: 45_000,
            total_likes: 800,
            total_comments: 50,
        };
        let f = factors_from_collection(Some(&mentions), Some(&views), &EngagementMix::default());
        assert_eq!(f.mention_count, 12);
        // 100 + 30 * 2; replies are not counted.
        assert_eq!(f.mention_engagement, 160);
        assert_eq!(f.view_magnitude, 45_000);
        // 800 + 50 * 3
        assert_eq!(f.view_engagement, 950);
    }

    #[test]
    fn custom_mix_is_applied() {
        let mentions = MentionSummary {
            total_likes: 10,
            total_reshares: 10,
            ..MentionSummary::default()
        };
        let mix = EngagementMix {
            reshare_weight: 5,
            comment_weight: 1,
        };
        let f = factors_from_collection(Some(&mentions), None, &mix);
        assert_eq!(f.mention_engagement, 60);
    }

    #[test]
    fn breakdown_from_summaries() {
        let mentions = MentionSummary {
            post_count: 40,
            total_likes: 600,
            ..MentionSummary::default()
        };
        let views = ViewSummary {
            video_count: 2,
            total_views: 30_000,
            ..ViewSummary::default()
        };
        let social = social_breakdown(Some(&mentions), Some(&views), None);
        // (40 + 60) / 10 = 10
        assert_eq!(social.twitter, 10);
        // (20 + 30) / 10 = 5
        assert_eq!(social.youtube, 5);
        assert_eq!(social.amazon, DEFAULT_AMAZON_SOCIAL_SCORE);
    }

    #[test]
    fn breakdown_caps_channels_at_hundred() {
        let mentions = MentionSummary {
            post_count: 5_000,
            total_likes: 90_000,
            ..MentionSummary::default()
        };
        let social = social_breakdown(Some(&mentions), None, None);
        assert_eq!(social.twitter, 100);
        assert_eq!(social.youtube, 0);
    }

    #[test]
    fn breakdown_carries_previous_amazon_and_blog_channels() {
        let previous = SocialScore {
            twitter: 90,
            youtube: 90,
            amazon: 82,
            note: 30,
            zenn: 12,
            hatena: 7,
        };
        let social = social_breakdown(None, None, Some(&previous));
        assert_eq!(social.twitter, 0);
        assert_eq!(social.youtube, 0);
        assert_eq!(social.amazon, 82);
        assert_eq!(social.note, 30);
        assert_eq!(social.zenn, 12);
        assert_eq!(social.hatena, 7);
    }

    #[test]
    fn zero_amazon_channel_resets_to_baseline() {
        let previous = SocialScore {
            amazon: 0,
            note: 20,
            ..SocialScore::default()
        };
        let social = social_breakdown(None, None, Some(&previous));
        assert_eq!(social.amazon, DEFAULT_AMAZON_SOCIAL_SCORE);
        assert_eq!(social.note, 20);
    }
}
