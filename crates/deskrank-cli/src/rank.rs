//! `rank` command handler.

use std::collections::HashMap;
use std::path::Path;

use deskrank_core::{CatalogItem, EngagementFactors, Tuning};
use deskrank_scoring::{
    assign_ranks, factors_from_collection, rank_catalog, rank_category, rescore_catalog,
    social_breakdown, MentionSummary, RankedItem, ScoreCalculator, ViewSummary,
};
use serde::Deserialize;

use crate::catalog::{read_catalog, read_json, write_catalog};

/// What the collectors returned for one catalog item. Either half may be
/// missing when its adapter failed.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Collected {
    #[serde(default)]
    pub(crate) mentions: Option<MentionSummary>,
    #[serde(default)]
    pub(crate) views: Option<ViewSummary>,
}

/// Refreshes scores and social breakdowns from collected summaries, then
/// writes catalog-wide ranks.
pub(crate) fn refresh(
    calculator: &ScoreCalculator,
    items: &mut [CatalogItem],
    collected: &HashMap<String, Collected>,
) {
    let mix = calculator.config().engagement_mix;
    let mut factors: HashMap<String, EngagementFactors> = HashMap::new();

    for item in items.iter_mut() {
        let Some(summary) = collected.get(&item.id) else {
            continue;
        };
        let mentions = summary.mentions.as_ref();
        let views = summary.views.as_ref();

        item.social_score = social_breakdown(mentions, views, Some(&item.social_score));
        factors.insert(
            item.id.clone(),
            factors_from_collection(mentions, views, &mix),
        );
    }

    let updates = rescore_catalog(calculator, items, &factors);
    tracing::info!(rescored = updates.len(), "catalog rescored");
    assign_ranks(items);
}

pub(crate) fn ranking(items: &[CatalogItem], category: Option<&str>) -> Vec<RankedItem> {
    match category {
        Some(category) => rank_category(items, category),
        None => rank_catalog(items),
    }
}

/// # Errors
///
/// Returns an error if the catalog or summaries cannot be read, or the
/// scoring tuning is invalid.
pub(crate) fn run_rank(
    tuning: &Tuning,
    catalog_path: &Path,
    category: Option<&str>,
    collected_path: Option<&Path>,
    write: bool,
) -> anyhow::Result<()> {
    let mut catalog = read_catalog(catalog_path)?;

    if let Some(path) = collected_path {
        let calculator = ScoreCalculator::new(tuning.scoring.clone())?;
        let collected: HashMap<String, Collected> = read_json(path, "collected summaries")?;
        refresh(&calculator, &mut catalog.items, &collected);
    } else if write {
        assign_ranks(&mut catalog.items);
    }

    if write {
        write_catalog(catalog_path, &catalog)?;
    }

    let ranked = ranking(&catalog.items, category);
    if ranked.is_empty() {
        println!(
            "no visible items{}",
            category
                .map(|c| format!(" in category '{c}'"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    println!("{:<6}{:<8}{:<36}NAME", "RANK", "SCORE", "ID");
    for row in &ranked {
        let marker = if row.overridden { "*" } else { "" };
        let score = format!("{}{marker}", row.effective_score);
        println!("{:<6}{score:<8}{:<36}{}", row.rank, row.id, row.name);
    }

    Ok(())
}
