//! Keyword-based category inference from product titles.

use deskrank_core::{CategoryAssignment, CategoryRule, MatchPolicy};

/// Picks a category for `title` by case-sensitive substring search over
/// `rules`.
///
/// Under [`MatchPolicy::FirstMatch`] the first rule in table order whose
/// keyword occurs in the title wins, so a broad keyword listed before a more
/// specific one (`モニター` before `モニターアーム`) shadows it. Under
/// [`MatchPolicy::LongestMatch`] the longest matching keyword wins and table
/// order only breaks ties. With no match the result is `fallback`.
#[must_use]
pub fn classify_category(
    title: &str,
    rules: &[CategoryRule],
    policy: MatchPolicy,
    fallback: &CategoryAssignment,
) -> CategoryAssignment {
    let mut matching = rules.iter().filter(|rule| title.contains(&rule.keyword));

    let chosen = match policy {
        MatchPolicy::FirstMatch => matching.next(),
        MatchPolicy::LongestMatch => matching.fold(None, |best: Option<&CategoryRule>, rule| {
            match best {
                Some(current) if keyword_len(current) >= keyword_len(rule) => Some(current),
                _ => Some(rule),
            }
        }),
    };

    chosen.map_or_else(|| fallback.clone(), CategoryRule::assignment)
}

fn keyword_len(rule: &CategoryRule) -> usize {
    rule.keyword.chars().count()
}

#[cfg(test)]
mod tests {
    use deskrank_core::DiscoveryConfig;

    use super::*;

    fn classify(title: &str, policy: MatchPolicy) -> CategoryAssignment {
        let config = DiscoveryConfig::default();
        classify_category(title, &config.categories, policy, &config.default_category)
    }

    #[test]
    fn simple_keyword_match() {
        let got = classify("ロジクール MX Master 3S ワイヤレスマウス", MatchPolicy::LongestMatch);
        assert_eq!(got, CategoryAssignment::new("device", "mouse"));
    }

    #[test]
    fn no_keyword_falls_back_to_default_pair() {
        for policy in [MatchPolicy::FirstMatch, MatchPolicy::LongestMatch] {
            let got = classify("Anker Nano 65W", policy);
            assert_eq!(got, CategoryAssignment::new("device", "other"), "{policy:?}");
        }
    }

    #[test]
    fn empty_title_falls_back() {
        let got = classify("", MatchPolicy::FirstMatch);
        assert_eq!(got, CategoryAssignment::default());
    }

    #[test]
    fn first_match_lets_broad_keyword_shadow_specific_one() {
        let got = classify("エルゴトロン LX デスクマウント モニターアーム", MatchPolicy::FirstMatch);
        // "モニター" precedes "モニターアーム" in the table.
        assert_eq!(got, CategoryAssignment::new("device", "monitor"));
    }

    #[test]
    fn longest_match_prefers_specific_keyword() {
        let got = classify("エルゴトロン LX モニターアーム", MatchPolicy::LongestMatch);
        assert_eq!(got, CategoryAssignment::new("furniture", "monitor-arm"));
    }

    #[test]
    fn longest_match_desk_mat_over_desk() {
        let got = classify("大判 デスクマット 900x400", MatchPolicy::LongestMatch);
        assert_eq!(got, CategoryAssignment::new("lighting", "desk-mat"));
        let got = classify("大判 デスクマット 900x400", MatchPolicy::FirstMatch);
        assert_eq!(got, CategoryAssignment::new("furniture", "desk"));
    }

    #[test]
    fn longest_match_ties_keep_table_order() {
        let rules = vec![
            CategoryRule {
                keyword: "ABC".to_string(),
                category: "first".to_string(),
                sub_category: "a".to_string(),
            },
            CategoryRule {
                keyword: "XYZ".to_string(),
                category: "second".to_string(),
                sub_category: "b".to_string(),
            },
        ];
        let got = classify_category(
            "XYZ and ABC",
            &rules,
            MatchPolicy::LongestMatch,
            &CategoryAssignment::default(),
        );
        assert_eq!(got.category, "first");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let got = classify("usb dac headphone amp", MatchPolicy::LongestMatch);
        assert_eq!(got, CategoryAssignment::default());
        let got = classify("FiiO K7 DAC", MatchPolicy::LongestMatch);
        assert_eq!(got, CategoryAssignment::new("audio", "dac-amp"));
    }

    #[test]
    fn length_is_counted_in_characters() {
        let got = classify("マイク付き Webカメラ", MatchPolicy::LongestMatch);
        assert_eq!(got, CategoryAssignment::new("device", "webcam"));
        // "DAC" and "アンプ" are both three characters; table order decides.
        let got = classify("アンプ内蔵 DAC", MatchPolicy::LongestMatch);
        assert_eq!(got, CategoryAssignment::new("audio", "dac-amp"));
    }
}
