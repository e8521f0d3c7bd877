//! Selection, hit testing, taxonomy switching and user-added data.

use serde_json::json;

use holmap_core::models::{FeatureStyle, Geometry, DRAWN_FEATURES_CATEGORY_ID};
use holmap_display::DisplayController;
use holmap_store::FeatureStore;
use holmap_taxonomy::TaxonomyBuilder;
use test_fixtures::{
    city_with_timeline, collection, feature_with_geometry, parks_and_museums, point_feature,
    polygon_feature, RecordingRenderer,
};

fn controller(doc: serde_json::Value, all: bool) -> (DisplayController, RecordingRenderer) {
    let store = FeatureStore::from_value(&doc, "fixture.json").unwrap();
    let taxonomies = TaxonomyBuilder::new(all).build(&store);
    let renderer = RecordingRenderer::new();
    let ctl = DisplayController::new(store, taxonomies, Box::new(renderer.clone()))
        .with_link_prefix("docs/");
    (ctl, renderer)
}

fn idx(ctl: &DisplayController, id: &str) -> usize {
    ctl.get_feature_index_by_id(id).unwrap()
}

#[test]
fn selection_uses_showing_category_and_exposes_info() {
    let (mut ctl, renderer) = controller(parks_and_museums(), false);
    let royal = idx(&ctl, "royal");
    ctl.show_hide_feature(true, royal, None);

    assert_eq!(ctl.set_selected_feature(royal, true), Some(royal));
    assert!(matches!(
        renderer.last_style(royal),
        Some(FeatureStyle::Selected { category: 1, .. })
    ));
    assert_eq!(ctl.nav().scroll_target, Some((1, royal)));

    let info = ctl.selected_feature_info().unwrap();
    assert_eq!(info.title, "Royal BC Museum");
    assert_eq!(info.desc, "<p>Royal BC Museum</p>");
    assert_eq!(info.links, vec!["docs/royal.html"]);
}

#[test]
fn selecting_another_feature_restores_previous_style() {
    let (mut ctl, renderer) = controller(parks_and_museums(), false);
    let beacon = idx(&ctl, "beacon");
    let ross = idx(&ctl, "ross");
    ctl.show_hide_feature(true, beacon, None);
    ctl.set_selected_feature(beacon, false);
    ctl.set_selected_feature(ross, false);

    assert!(matches!(
        renderer.last_style(beacon),
        Some(FeatureStyle::Category { category: 0, .. })
    ));
    assert!(!ctl.store().get(beacon).unwrap().selected());
    assert!(ctl.store().get(ross).unwrap().selected());
    assert_eq!(ctl.nav().selected_entries().count(), 1);
}

#[test]
fn deselecting_a_hidden_feature_keeps_it_hidden() {
    let (mut ctl, renderer) = controller(parks_and_museums(), false);
    let ross = idx(&ctl, "ross");
    ctl.set_selected_feature(ross, false);
    ctl.deselect_feature();
    assert_eq!(renderer.last_style(ross), Some(FeatureStyle::Hidden));
    assert!(ctl.selected_feature_info().is_none());
}

#[test]
fn select_by_id_shows_selects_and_centers() {
    let (mut ctl, renderer) = controller(parks_and_museums(), false);
    let maritime = idx(&ctl, "maritime");
    assert_eq!(ctl.select_feature_by_id("maritime"), Some(maritime));
    assert!(ctl.store().get(maritime).unwrap().showing());
    assert_eq!(ctl.selected_feature(), Some(maritime));
    assert_eq!(renderer.fits().last(), Some(&vec![maritime]));

    assert_eq!(ctl.select_feature_by_id("nowhere"), None);
}

#[test]
fn hits_prefer_points_then_smallest_area() {
    let doc = collection(vec![
        polygon_feature("big", "Big", &[("Type", "Zone")], 10.0),
        polygon_feature("small", "Small", &[("Type", "Zone")], 2.0),
        point_feature("pin", "Pin", &[("Type", "Marker")]),
        feature_with_geometry(
            "road",
            "Road",
            &[("Type", "Marker")],
            json!({ "type": "LineString", "coordinates": [[0.0, 0.0], [5.0, 5.0]] }),
        ),
    ]);
    let (mut ctl, _) = controller(doc, false);
    let big = idx(&ctl, "big");
    let small = idx(&ctl, "small");
    let pin = idx(&ctl, "pin");

    ctl.show_hide_all_features(true);
    assert_eq!(ctl.select_feature_from_hits(&[big, small]), Some(small));
    assert_eq!(ctl.select_feature_from_hits(&[small, pin, big]), Some(pin));

    ctl.show_hide_feature(false, pin, None);
    assert_eq!(ctl.select_feature_from_hits(&[pin]), None);
}

#[test]
fn change_taxonomy_hides_everything_and_rebuilds_nav() {
    let (mut ctl, _) = controller(city_with_timeline(), true);
    ctl.show_hide_all_features(true);
    let era = ctl.get_taxonomy_index_by_id("era").unwrap();

    assert!(ctl.change_taxonomy(era));
    assert!(ctl.showing_features().is_empty());
    assert_eq!(ctl.nav().taxonomy, Some(era));
    assert_eq!(ctl.nav().categories.len(), 2);

    assert!(!ctl.change_taxonomy(era));
    assert!(!ctl.change_taxonomy(42));
}

#[test]
fn all_taxonomy_shows_every_feature() {
    let (mut ctl, _) = controller(city_with_timeline(), true);
    let all = ctl.taxonomies().all_taxonomy_index().unwrap();
    ctl.change_taxonomy(all);
    assert_eq!(ctl.nav().categories.len(), 5);
    assert_eq!(ctl.show_hide_all_features(true), 4);
}

#[test]
fn drawn_features_get_their_own_category() {
    let (mut ctl, _) = controller(parks_and_museums(), false);
    let first = ctl
        .add_drawn_feature("Bike Path", "Drawn", Geometry::point(1.0, 2.0))
        .unwrap();
    assert_eq!(ctl.store().get(first).unwrap().id, "bikePath");
    assert!(ctl.taxonomy_has_category(0, DRAWN_FEATURES_CATEGORY_ID));
    assert!(ctl.store().get(first).unwrap().showing());
    assert_eq!(ctl.selected_feature(), Some(first));

    let second = ctl
        .add_drawn_feature("Bike Path", "Drawn", Geometry::point(3.0, 4.0))
        .unwrap();
    assert_eq!(ctl.store().get(second).unwrap().id, "bikePathx");
    let cat = ctl.get_category_index_by_id(DRAWN_FEATURES_CATEGORY_ID).unwrap();
    assert_eq!(ctl.nav().category(cat).unwrap().entries.len(), 2);
}

#[test]
fn add_taxonomy_switches_to_it() {
    let (mut ctl, _) = controller(parks_and_museums(), false);
    let tax = ctl.add_taxonomy("Walking tours").unwrap();
    assert_eq!(ctl.active_taxonomy(), Some(tax));
    assert!(ctl.nav().categories.is_empty());
    assert!(ctl.add_taxonomy("").is_none());

    let cat = ctl.add_category("Harbour Loop", "Along the water").unwrap();
    assert_eq!(ctl.get_category_index_by_id("harbourLoop"), Some(cat));
}
