//! Behavioural properties of observation merging and category inference.

use std::collections::HashSet;

use deskrank_core::{CategoryAssignment, Observation, SourceType};
use deskrank_discovery::{merge_observations, DiscoveryMerger};

fn obs(key: &str, source: SourceType, delta: u64, url: &str) -> Observation {
    Observation {
        product_key: key.to_string(),
        source_type: source,
        engagement_delta: delta,
        title: format!("title for {url}"),
        url: url.to_string(),
    }
}

#[test]
fn observations_from_three_sources_accumulate() {
    let merged = merge_observations(
        vec![
            obs("B0DESK0001", SourceType::Note, 10, "u1"),
            obs("B0DESK0001", SourceType::Youtube, 20, "u2"),
            obs("B0DESK0001", SourceType::Hatena, 30, "u3"),
        ],
        &HashSet::new(),
    );

    let item = &merged["B0DESK0001"];
    assert_eq!(item.mention_count, 3);
    assert_eq!(item.total_engagement, 60);
    assert_eq!(item.source_type, SourceType::Note);
}

#[test]
fn excluded_key_never_appears_however_often_observed() {
    let exclusions = HashSet::from(["B0DESK0001".to_string()]);
    let observations = (0..25).map(|i| obs("B0DESK0001", SourceType::Zenn, i, "u"));

    let merged = merge_observations(observations, &exclusions);
    assert!(merged.is_empty());
}

#[test]
fn provenance_comes_from_first_observation() {
    let merged = merge_observations(
        vec![
            obs("B0DESK0001", SourceType::Hatena, 1, "u1"),
            obs("B0DESK0001", SourceType::Youtube, 2, "u2"),
        ],
        &HashSet::new(),
    );

    let item = &merged["B0DESK0001"];
    assert_eq!(item.source_url, "u1");
    assert_eq!(item.source_title, "title for u1");
    assert_eq!(item.source_type, SourceType::Hatena);
}

#[test]
fn counts_do_not_depend_on_arrival_order() {
    let observations = vec![
        obs("B0DESK0001", SourceType::Note, 3, "a"),
        obs("B0DESK0002", SourceType::Zenn, 8, "b"),
        obs("B0DESK0001", SourceType::Youtube, 1_000, "c"),
        obs("B0DESK0003", SourceType::Hatena, 0, "d"),
        obs("B0DESK0002", SourceType::Note, 2, "e"),
    ];
    let forward = merge_observations(observations.clone(), &HashSet::new());
    let backward = merge_observations(observations.into_iter().rev(), &HashSet::new());

    assert_eq!(
        forward.keys().collect::<Vec<_>>(),
        backward.keys().collect::<Vec<_>>()
    );
    for (key, item) in &forward {
        let other = &backward[key];
        assert_eq!(item.mention_count, other.mention_count, "{key}");
        assert_eq!(item.total_engagement, other.total_engagement, "{key}");
    }
}

#[test]
fn title_without_keyword_falls_back_to_default_pair() {
    let merger = DiscoveryMerger::default();
    assert_eq!(
        merger.classify_category("Anker Nano Charger 65W"),
        CategoryAssignment::new("device", "other")
    );
}

#[test]
fn every_merged_record_has_at_least_one_mention() {
    let merged = merge_observations(
        vec![
            obs("B0DESK0001", SourceType::Note, 0, "a"),
            obs("B0DESK0002", SourceType::Note, 0, "b"),
        ],
        &HashSet::new(),
    );
    assert!(merged.values().all(|item| item.mention_count >= 1));
}
