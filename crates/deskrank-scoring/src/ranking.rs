//! Catalog ordering and score write-back.

use std::collections::HashMap;

use deskrank_core::{CatalogItem, EngagementFactors};
use serde::Serialize;

use crate::calculator::ScoreCalculator;

/// One row of a ranking view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    /// 1-based position.
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub effective_score: u8,
    /// `true` when a manual override supplied `effective_score`.
    pub overridden: bool,
}

/// Outcome of writing a freshly computed score into an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreUpdate {
    /// The computed score is now the effective score.
    Applied { previous: u8, score: u8 },
    /// The computed score was stored but a manual override still wins.
    Advisory { computed: u8, override_score: u8 },
}

/// Ranks every visible item by effective score, highest first.
///
/// Hidden items are skipped. Ties are broken by id so the order is stable
/// across runs.
#[must_use]
pub fn rank_catalog(items: &[CatalogItem]) -> Vec<RankedItem> {
    rank_where(items, |_| true)
}

/// Same as [`rank_catalog`], restricted to one top-level category.
#[must_use]
pub fn rank_category(items: &[CatalogItem], category: &str) -> Vec<RankedItem> {
    rank_where(items, |item| item.category == category)
}

fn rank_where<F>(items: &[CatalogItem], include: F) -> Vec<RankedItem>
where
    F: Fn(&CatalogItem) -> bool,
{
    let mut visible: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| item.is_visible() && include(item))
        .collect();

    visible.sort_by(|a, b| {
        b.effective_score()
            .cmp(&a.effective_score())
            .then_with(|| a.id.cmp(&b.id))
    });

    visible
        .into_iter()
        .zip(1_u32..)
        .map(|(item, rank)| RankedItem {
            rank,
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            sub_category: item.sub_category.clone(),
            effective_score: item.effective_score(),
            overridden: item.score_override.is_some(),
        })
        .collect()
}

/// Writes the catalog-wide rank into each item; hidden items lose their rank.
pub fn assign_ranks(items: &mut [CatalogItem]) {
    let ranks: HashMap<String, u32> = rank_catalog(items)
        .into_iter()
        .map(|ranked| (ranked.id, ranked.rank))
        .collect();

    for item in items.iter_mut() {
        item.rank = ranks.get(&item.id).copied();
    }
}

/// Stores `computed` as the item's score.
///
/// The stored value is always updated; when a manual override is present the
/// update is only advisory and the caller decides what to surface.
pub fn apply_score(item: &mut CatalogItem, computed: u8) -> ScoreUpdate {
    let previous = item.score;
    item.score = computed.min(100);

    match item.score_override {
        Some(override_score) => ScoreUpdate::Advisory {
            computed: item.score,
            override_score,
        },
        None => ScoreUpdate::Applied {
            previous,
            score: item.score,
        },
    }
}

/// Scores every item that has fresh factors and writes the result back.
///
/// Items without an entry in `factors` keep their stored score. Returns the
/// update for each item that was scored, in catalog order.
pub fn rescore_catalog(
    calculator: &ScoreCalculator,
    items: &mut [CatalogItem],
    factors: &HashMap<String, EngagementFactors>,
) -> Vec<(String, ScoreUpdate)> {
    let mut updates = Vec::new();

    for item in items.iter_mut() {
        let Some(item_factors) = factors.get(&item.id) else {
            tracing::debug!(item = %item.id, "no fresh factors; keeping stored score");
            continue;
        };

        let computed = calculator.score(item_factors);
        let update = apply_score(item, computed);
        match update {
            ScoreUpdate::Applied { previous, score } => {
                tracing::info!(item = %item.id, previous, score, "score updated");
            }
            ScoreUpdate::Advisory {
                computed,
                override_score,
            } => {
                tracing::info!(
                    item = %item.id,
                    computed,
                    override_score,
                    "score computed but masked by manual override"
                );
            }
        }
        updates.push((item.id.clone(), update));
    }

    updates
}
