//! Shared domain types and configuration for deskrank.
//!
//! Everything in here is plain data: engagement factors, discovery records,
//! the catalog entity as far as scoring and discovery touch it, and the
//! tuning tables both engines are constructed from.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod discovered;
pub mod engagement;
pub mod error;
pub mod source;
pub mod tuning;

pub use app_config::{AppConfig, Environment};
pub use catalog::{AmazonInfo, CatalogItem, DiscoveredFrom, ItemStatus, SocialScore};
pub use config::{load_app_config, load_app_config_from_env};
pub use discovered::{normalize_product_key, DiscoveredItem, Observation};
pub use engagement::{EngagementFactors, NormalizedFactors};
pub use error::{ConfigError, CoreError};
pub use source::{SocialChannel, SourceType};
pub use tuning::{
    load_tuning, CategoryAssignment, CategoryRule, DiscoveryConfig, EngagementMix, MatchPolicy,
    NormalizationCeilings, RoundingPolicy, ScoreWeights, ScoringConfig, SeedFormula, Tuning,
};
