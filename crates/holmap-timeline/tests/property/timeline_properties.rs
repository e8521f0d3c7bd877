//! Property tests for timeline set algebra across consecutive windows.

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::{json, Value};

use holmap_core::config::TimelineConfig;
use holmap_core::models::FeatureStyle;
use holmap_display::DisplayController;
use holmap_store::FeatureStore;
use holmap_taxonomy::TaxonomyBuilder;
use holmap_timeline::{ManualScheduler, Step, TimelineEngine};
use test_fixtures::{base_feature, collection, point_feature, RecordingRenderer};

const FEATURES: usize = 8;

fn ids(set: &BTreeSet<usize>) -> Vec<String> {
    set.iter().map(|n| format!("f{n}")).collect()
}

fn doc(a: &BTreeSet<usize>, b: &BTreeSet<usize>) -> Value {
    let mut features = vec![base_feature(
        "Prop",
        json!([
            { "tp": "1900/1909/A", "featIds": ids(a) },
            { "tp": "1910/1919/B", "featIds": ids(b) },
        ]),
    )];
    // Base is index 0, so feature fN lands at index N + 1.
    for n in 0..FEATURES {
        features.push(point_feature(&format!("f{n}"), &format!("Feature {n}"), &[("Type", "Park")]));
    }
    collection(features)
}

fn window() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..FEATURES, 0..FEATURES)
}

proptest! {
    #[test]
    fn prop_step_applies_set_difference(a in window(), b in window()) {
        let store = FeatureStore::from_value(&doc(&a, &b), "prop.json").unwrap();
        let taxonomies = TaxonomyBuilder::new(false).build(&store);
        let mut engine = TimelineEngine::from_store(
            &store,
            &TimelineConfig::default(),
            Box::new(ManualScheduler::new()),
        );
        let renderer = RecordingRenderer::new();
        let mut ctl = DisplayController::new(store, taxonomies, Box::new(renderer.clone()));

        let shift = |s: &BTreeSet<usize>| -> BTreeSet<usize> { s.iter().map(|n| n + 1).collect() };
        let (a, b) = (shift(&a), shift(&b));

        prop_assert!(engine.toggle_timeline(&mut ctl, true));
        renderer.clear();
        let t = engine.try_timeline_step(&mut ctl, Step::Forward).unwrap();

        let expected_shown: BTreeSet<usize> = b.difference(&a).copied().collect();
        let expected_hidden: BTreeSet<usize> = a.difference(&b).copied().collect();
        let expected_kept: BTreeSet<usize> = a.intersection(&b).copied().collect();
        prop_assert_eq!(&t.shown, &expected_shown);
        prop_assert_eq!(&t.hidden, &expected_hidden);
        prop_assert_eq!(&t.kept, &expected_kept);

        // Retained features never pass through the hidden style.
        for &f in &expected_kept {
            prop_assert!(renderer.styles_of(f).iter().all(|s| s.is_visible()));
        }
        for &f in &expected_shown {
            let is_selected = matches!(renderer.last_style(f), Some(FeatureStyle::Selected { .. }));
            prop_assert!(is_selected);
        }
        let showing: BTreeSet<usize> = ctl.showing_features().into_iter().collect();
        prop_assert_eq!(showing, b);
    }
}
