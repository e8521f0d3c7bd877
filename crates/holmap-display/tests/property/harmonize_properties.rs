//! Property tests for tri-state harmonisation, both the pure reduction
//! and the controller driving the navigation tree.

use proptest::prelude::*;
use serde_json::Value;

use holmap_core::models::TriState;
use holmap_core::traits::NullRenderer;
use holmap_display::{category_state, harmonize, DisplayController};
use holmap_store::FeatureStore;
use holmap_taxonomy::TaxonomyBuilder;
use test_fixtures::{collection, point_feature};

const CATEGORIES: [&str; 3] = ["Park", "Museum", "Church"];

fn fixture(assignments: &[usize]) -> Value {
    let features = assignments
        .iter()
        .enumerate()
        .map(|(n, &c)| {
            point_feature(&format!("f{n}"), &format!("Feature {n}"), &[("Type", CATEGORIES[c])])
        })
        .collect();
    collection(features)
}

proptest! {
    #[test]
    fn prop_category_state_counts(checks in prop::collection::vec(any::<bool>(), 1..20)) {
        let checked = checks.iter().filter(|&&c| c).count();
        let expected = if checked == 0 {
            TriState::Unchecked
        } else if checked == checks.len() {
            TriState::Checked
        } else {
            TriState::Indeterminate
        };
        prop_assert_eq!(category_state(&checks), expected);
    }

    #[test]
    fn prop_all_checked_iff_every_category_checked(
        tree in prop::collection::vec(prop::collection::vec(any::<bool>(), 1..6), 1..6)
    ) {
        let (cats, all) = harmonize(&tree);
        prop_assert_eq!(all.is_checked(), cats.iter().all(|c| c.is_checked()));
        if cats.iter().any(|c| c.is_indeterminate()) {
            prop_assert_eq!(all, TriState::Indeterminate);
        }
    }

    #[test]
    fn prop_tree_matches_feature_flags(
        assignments in prop::collection::vec(0..CATEGORIES.len(), 1..12),
        toggles in prop::collection::vec((0..12usize, any::<bool>()), 0..30),
    ) {
        let store = FeatureStore::from_value(&fixture(&assignments), "prop.json").unwrap();
        let taxonomies = TaxonomyBuilder::new(false).build(&store);
        let mut ctl = DisplayController::new(store, taxonomies, Box::new(NullRenderer));

        for (n, show) in toggles {
            if let Some(feature) = ctl.get_feature_index_by_id(&format!("f{}", n % assignments.len())) {
                ctl.show_hide_feature(show, feature, None);
            }
        }

        for cat in &ctl.nav().categories {
            let checks: Vec<bool> = cat
                .features()
                .map(|f| ctl.store().get(f).unwrap().showing())
                .collect();
            prop_assert!(cat.entries.iter().all(|e| e.checked == ctl.store().get(e.feature).unwrap().showing()));
            prop_assert_eq!(cat.checkbox, category_state(&checks));
        }
        let all_checked = ctl.nav().categories.iter().all(|c| c.checkbox.is_checked());
        prop_assert_eq!(ctl.nav().all.is_checked(), all_checked);
    }
}
