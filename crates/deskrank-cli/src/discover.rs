//! `discover` command handler.
//!
//! Reads adapter observations, drops products the catalog already has, and
//! prints the ranked candidates. When fetched product info is supplied the
//! candidates are also turned into pending catalog records.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use deskrank_core::{normalize_product_key, CatalogItem, DiscoveredItem, Observation, Tuning};
use deskrank_discovery::{merge_observations, DiscoveryMerger, ProductInfo};
use serde::Serialize;

use crate::catalog::{catalog_product_keys, read_catalog_or_empty, read_json};

#[derive(Debug, Serialize)]
pub(crate) struct DiscoverReport {
    pub(crate) discovered: Vec<DiscoveredItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) admitted: Vec<CatalogItem>,
}

pub(crate) fn discover(
    merger: &DiscoveryMerger,
    observations: Vec<Observation>,
    exclusions: &HashSet<String>,
    products: Option<&HashMap<String, ProductInfo>>,
    today: NaiveDate,
) -> DiscoverReport {
    let observed = observations.len();
    let merged = merge_observations(observations, exclusions);
    tracing::info!(observed, unique = merged.len(), "observations merged");

    let discovered = merger.ranked_by_mentions(merged);

    let admitted = products.map_or_else(Vec::new, |products| {
        discovered
            .iter()
            .filter_map(|item| {
                let Some(product) = products.get(&item.product_key) else {
                    tracing::warn!(
                        product_key = %item.product_key,
                        "no product info; not admitted"
                    );
                    return None;
                };
                Some(merger.admit(product, item, None, today))
            })
            .collect()
    });

    DiscoverReport {
        discovered,
        admitted,
    }
}

/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, or the
/// discovery tuning is invalid.
pub(crate) fn run_discover(
    tuning: Tuning,
    observations_path: &Path,
    catalog_path: &Path,
    products_path: Option<&Path>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = tuning.discovery;
    if let Some(limit) = limit {
        config.admission_limit = limit;
    }
    let merger = DiscoveryMerger::new(config)?;

    let observations: Vec<Observation> = read_json(observations_path, "observations")?;
    let catalog = read_catalog_or_empty(catalog_path)?;
    let exclusions = catalog_product_keys(&catalog.items);
    let products = products_path
        .map(|path| read_json::<HashMap<String, ProductInfo>>(path, "product info"))
        .transpose()?
        .map(|products| {
            products
                .into_iter()
                .map(|(key, info)| (normalize_product_key(&key), info))
                .collect::<HashMap<_, _>>()
        });

    let today = chrono::Local::now().date_naive();
    let report = discover(&merger, observations, &exclusions, products.as_ref(), today);

    tracing::info!(
        discovered = report.discovered.len(),
        admitted = report.admitted.len(),
        "discovery finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
