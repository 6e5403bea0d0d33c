use serde::{Deserialize, Serialize};

/// Raw engagement magnitudes for one product over one evaluation cycle.
///
/// Values are unbounded here; the score calculator saturates them against
/// its configured ceilings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementFactors {
    /// Number of discrete posts referencing the product.
    pub mention_count: u64,
    /// Weighted reactions to those posts (likes + 2×reshares by default).
    pub mention_engagement: u64,
    /// Total views of video content featuring the product.
    pub view_magnitude: u64,
    /// Weighted reactions to that video content (likes + 3×comments by default).
    pub view_engagement: u64,
}

/// [`EngagementFactors`] mapped onto `[0.0, 1.0]` per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFactors {
    pub mention_count: f64,
    pub mention_engagement: f64,
    pub view_magnitude: f64,
    pub view_engagement: f64,
}
