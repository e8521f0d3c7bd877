//! Property tests for taxonomy construction: deduplication and ordering.

use proptest::prelude::*;
use serde_json::{json, Value};

use holmap_store::FeatureStore;
use holmap_taxonomy::TaxonomyBuilder;

const TAXONOMIES: [&str; 3] = ["Type", "Era", "Owner"];
const CATEGORIES: [&str; 4] = ["Park", "Museum", "Church", "Market"];

/// One membership: (taxonomy index, taxonomy pos, category index, category pos).
fn membership() -> impl Strategy<Value = (usize, i64, usize, i64)> {
    (0..TAXONOMIES.len(), 0i64..4, 0..CATEGORIES.len(), 0i64..4)
}

fn doc(features: &[Vec<(usize, i64, usize, i64)>]) -> Value {
    let features: Vec<Value> = features
        .iter()
        .enumerate()
        .map(|(n, memberships)| {
            let taxonomies: Vec<Value> = memberships
                .iter()
                .map(|&(t, tpos, c, cpos)| {
                    json!({
                        "id": TAXONOMIES[t].to_lowercase(),
                        "name": TAXONOMIES[t],
                        "pos": tpos,
                        "categories": [{
                            "id": CATEGORIES[c].to_lowercase(),
                            "name": CATEGORIES[c],
                            "pos": cpos,
                        }]
                    })
                })
                .collect();
            json!({
                "type": "Feature",
                "id": format!("f{n}"),
                "properties": { "name": format!("Feature {n}"), "taxonomies": taxonomies }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

proptest! {
    #[test]
    fn prop_each_pair_built_once(
        features in prop::collection::vec(prop::collection::vec(membership(), 0..4), 1..12)
    ) {
        let store = FeatureStore::from_value(&doc(&features), "prop.json").unwrap();
        let set = TaxonomyBuilder::new(false).build(&store);

        for (t, tax_name) in TAXONOMIES.iter().enumerate() {
            let matching: Vec<_> = set.taxonomies().iter().filter(|x| x.name == *tax_name).collect();
            let referenced = features.iter().flatten().any(|m| m.0 == t);
            prop_assert_eq!(matching.len(), usize::from(referenced));
            let Some(tax_idx) = set.taxonomies().iter().position(|x| x.name == *tax_name) else {
                continue;
            };

            for (c, cat_name) in CATEGORIES.iter().enumerate() {
                let cats: Vec<_> = set.categories_of(tax_idx).filter(|x| x.name == *cat_name).collect();
                let members: std::collections::BTreeSet<String> = features
                    .iter()
                    .enumerate()
                    .filter(|(_, ms)| ms.iter().any(|m| m.0 == t && m.2 == c))
                    .map(|(n, _)| format!("f{n}"))
                    .collect();
                if members.is_empty() {
                    prop_assert!(cats.is_empty());
                } else {
                    prop_assert_eq!(cats.len(), 1);
                    prop_assert_eq!(cats[0].features.len(), members.len());
                }
            }
        }
    }

    #[test]
    fn prop_sorted_by_pos_ties_first_seen(
        features in prop::collection::vec(prop::collection::vec(membership(), 1..4), 1..12)
    ) {
        let store = FeatureStore::from_value(&doc(&features), "prop.json").unwrap();
        let set = TaxonomyBuilder::new(false).build(&store);

        // First-seen order and winning pos, replayed from the input.
        let mut first_seen: Vec<(&str, i64)> = Vec::new();
        for &(t, tpos, _, _) in features.iter().flatten() {
            if !first_seen.iter().any(|(n, _)| *n == TAXONOMIES[t]) {
                first_seen.push((TAXONOMIES[t], tpos));
            }
        }
        let mut expected = first_seen.clone();
        expected.sort_by_key(|(_, pos)| *pos);
        let built: Vec<(&str, i64)> = set.taxonomies().iter().map(|t| (t.name.as_str(), t.pos)).collect();
        prop_assert_eq!(built, expected);

        for tax in 0..set.len() {
            let positions: Vec<i64> = set.categories_of(tax).map(|c| c.pos).collect();
            prop_assert!(positions.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
