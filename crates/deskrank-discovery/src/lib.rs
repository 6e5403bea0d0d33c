//! Product discovery for deskrank.
//!
//! Source adapters report every product reference they find as an
//! [`Observation`](deskrank_core::Observation). This crate folds those into one
//! [`DiscoveredItem`](deskrank_core::DiscoveredItem) per product, drops
//! products already in the catalog, and prepares the survivors for admission:
//! category inference, seed social scores, image placeholder checks and the
//! final catalog record.

pub mod admit;
pub mod asin;
pub mod category;
pub mod error;
pub mod image;
pub mod merger;
pub mod seed;

pub use admit::ProductInfo;
pub use asin::extract_product_keys;
pub use category::classify_category;
pub use error::DiscoveryError;
pub use image::{high_res_image_url, ImageCheck};
pub use merger::{combine, merge_observations, DiscoveryMerger};
pub use seed::{seed_social_score, SeedScore};
