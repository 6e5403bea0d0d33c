//! Popularity scoring for deskrank.
//!
//! Turns raw engagement counts into a bounded 0-100 score with a fixed
//! weighted sum over saturating per-factor ratios, and orders the catalog by
//! the resulting (or manually overridden) scores.

pub mod calculator;
pub mod collection;
pub mod ranking;

pub use calculator::{CompositeScore, ScoreCalculator};
pub use collection::{factors_from_collection, social_breakdown, MentionSummary, ViewSummary};
pub use ranking::{
    apply_score, assign_ranks, rank_catalog, rank_category, rescore_catalog, RankedItem,
    ScoreUpdate,
};
