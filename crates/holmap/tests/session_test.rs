//! HolMap session: loading, startup query, taxonomy switching, reload.

use std::cell::RefCell;
use std::rc::Rc;

use holmap::{resolve_taxonomy, HolMap, HolMapConfig, HolMapError};
use holmap_core::models::{FeatureStyle, Geometry, StartupQuery};
use holmap_store::{FileSource, StaticSource};
use holmap_timeline::{ManualScheduler, Step};
use test_fixtures::{city_with_timeline, collection, parks_and_museums, RecordingRenderer};

// City store indices: base 0, fort 1, church 2, hall 3, market 4.
const FORT: usize = 1;
const CHURCH: usize = 2;
const HALL: usize = 3;
const MARKET: usize = 4;

struct Harness {
    map: HolMap,
    renderer: RecordingRenderer,
    scheduler: ManualScheduler,
}

fn open(json: serde_json::Value, config: HolMapConfig) -> Harness {
    let renderer = RecordingRenderer::new();
    let scheduler = ManualScheduler::new();
    let map = HolMap::from_geojson_str(
        &json.to_string(),
        "city.json",
        config,
        Box::new(renderer.clone()),
        Box::new(scheduler.clone()),
    )
    .unwrap();
    Harness { map, renderer, scheduler }
}

fn city() -> Harness {
    open(city_with_timeline(), HolMapConfig::default())
}

fn showing(map: &HolMap) -> Vec<usize> {
    map.display().showing_features()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn load_builds_taxonomies_nav_and_timeline() {
    let h = city();
    assert_eq!(h.map.map_title(), Some("Old Town"));
    assert_eq!(h.map.source_id(), "city.json");
    assert_eq!(h.map.display().taxonomies().len(), 2);
    assert_eq!(h.map.display().active_taxonomy(), Some(0));
    let names: Vec<&str> = h.map.display().nav().categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Military", "Religious", "Civic"]);
    assert_eq!(h.map.timeline().points().len(), 3);
    assert!(!h.map.timeline().is_enabled());
    assert!(showing(&h.map).is_empty());
}

#[test]
fn initial_taxonomy_comes_from_config() {
    let mut config = HolMapConfig::default();
    config.layer.initial_taxonomy_id = "era".to_string();
    let h = open(city_with_timeline(), config);
    assert_eq!(h.map.display().active_taxonomy(), Some(1));
    assert_eq!(h.map.display().nav().categories.len(), 2);
}

#[test]
fn unknown_initial_taxonomy_falls_back_to_first() {
    let mut config = HolMapConfig::default();
    config.layer.initial_taxonomy_id = "nope".to_string();
    let h = open(city_with_timeline(), config);
    assert_eq!(h.map.display().active_taxonomy(), Some(0));
}

#[test]
fn map_without_taxonomies_is_a_user_facing_error() {
    let json = collection(vec![serde_json::json!({
        "type": "Feature",
        "id": "lonely",
        "geometry": null,
        "properties": { "name": "Lonely" }
    })]);
    let err = HolMap::from_geojson_str(
        &json.to_string(),
        "empty.json",
        HolMapConfig::default(),
        Box::new(RecordingRenderer::new()),
        Box::new(ManualScheduler::new()),
    )
    .unwrap_err();
    assert!(err.is_user_facing());
    assert!(matches!(err, HolMapError::MissingData { ref dataset, .. } if dataset == "taxonomies"));
    assert_eq!(err.to_string(), "taxonomies not found in the JSON file empty.json");
}

#[tokio::test]
async fn load_from_file_and_static_sources() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parks.json");
    std::fs::write(&path, parks_and_museums().to_string()).unwrap();

    let from_file = HolMap::load(
        &FileSource::new(&path),
        HolMapConfig::default(),
        Box::new(RecordingRenderer::new()),
        Box::new(ManualScheduler::new()),
    )
    .await
    .unwrap();
    assert_eq!(from_file.display().store().len(), 6);

    let from_memory = HolMap::load(
        &StaticSource::new("inline", city_with_timeline().to_string()),
        HolMapConfig::default(),
        Box::new(RecordingRenderer::new()),
        Box::new(ManualScheduler::new()),
    )
    .await
    .unwrap();
    assert_eq!(from_memory.source_id(), "inline");
}

#[test]
fn synthesized_base_carries_the_built_taxonomies() {
    let h = open(parks_and_museums(), HolMapConfig::default());
    let store = h.map.display().store();
    assert!(store.base_is_synthesized());

    let base = store.base().unwrap();
    assert_eq!(base.id, "holMap");
    assert_eq!(base.taxonomies.len(), 1);
    assert_eq!(base.taxonomies[0].id, "type");
    let names: Vec<&str> = base.taxonomies[0].categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Park", "Museum"]);

    let taxonomies = h.map.display().taxonomies();
    assert!(taxonomies.first_category_of(0, store.base_index()).is_none());
    assert!(!taxonomies.features_of(0).contains(&store.base_index()));
}

#[test]
fn stored_base_keeps_its_own_properties() {
    let h = city();
    let store = h.map.display().store();
    assert!(!store.base_is_synthesized());
    assert!(store.base().unwrap().taxonomies.is_empty());
}

#[test]
fn resolve_taxonomy_accepts_index_id_and_all_alias() {
    let mut config = HolMapConfig::default();
    config.layer.all_features_taxonomy = true;
    let h = open(city_with_timeline(), config);
    let set = h.map.display().taxonomies();
    assert_eq!(resolve_taxonomy(set, "1"), Some(1));
    assert_eq!(resolve_taxonomy(set, "7"), None);
    assert_eq!(resolve_taxonomy(set, " era "), Some(1));
    assert_eq!(resolve_taxonomy(set, "holTaxonomyAll"), Some(2));
    assert_eq!(resolve_taxonomy(set, "holAllTaxonomies"), Some(2));
    assert_eq!(resolve_taxonomy(set, ""), None);
}

// ---------------------------------------------------------------------------
// Startup query
// ---------------------------------------------------------------------------

#[test]
fn startup_single_feature_is_shown_selected_and_framed() {
    let mut h = city();
    let outcome = h.map.apply_startup_query(&StartupQuery::parse("featIds=fort"));
    assert_eq!(outcome.shown, 1);
    assert_eq!(showing(&h.map), vec![FORT]);
    assert_eq!(h.map.display().selected_feature(), Some(FORT));
    assert!(h.renderer.last_style(FORT).is_some_and(|s| s.is_selected()));
    assert_eq!(h.renderer.fits().last(), Some(&vec![FORT]));
    let info = h.map.selected_feature_info().unwrap();
    assert_eq!(info.title, "Fort Victoria");
}

#[test]
fn startup_several_features_are_shown_without_selection() {
    let mut h = city();
    let outcome = h.map.apply_startup_query(&StartupQuery::parse("featIds=fort;market"));
    assert_eq!(outcome.shown, 2);
    assert_eq!(showing(&h.map), vec![FORT, MARKET]);
    assert_eq!(h.map.display().selected_feature(), None);
    assert_eq!(h.renderer.fits().last(), Some(&vec![FORT, MARKET]));
}

#[test]
fn startup_categories_go_through_the_category_handler() {
    let mut h = city();
    let outcome = h.map.apply_startup_query(&StartupQuery::parse("catIds=civic;unknown"));
    assert_eq!(outcome.shown, 1);
    assert_eq!(showing(&h.map), vec![HALL, MARKET]);
    assert!(h.map.display().nav().categories[2].checkbox.is_checked());
    assert!(h.map.display().status().is_idle());
}

#[test]
fn startup_switches_taxonomy_before_showing() {
    let mut h = city();
    let outcome = h
        .map
        .apply_startup_query(&StartupQuery::parse("taxonomy=era&catIds=colonial&featIds=hall"));
    assert_eq!(h.map.display().active_taxonomy(), Some(1));
    assert_eq!(outcome.shown, 2);
    assert_eq!(showing(&h.map), vec![FORT, CHURCH, HALL]);
    // One category plus one feature counts as more than one shown item.
    assert_eq!(h.map.display().selected_feature(), None);
}

#[test]
fn configured_taxonomy_wins_over_the_query() {
    let mut config = HolMapConfig::default();
    config.layer.initial_taxonomy_id = "era".to_string();
    let mut h = open(city_with_timeline(), config);
    assert_eq!(h.map.display().active_taxonomy(), Some(1));

    let outcome = h
        .map
        .apply_startup_query(&StartupQuery::parse("taxonomy=type&featIds=market"));
    assert_eq!(h.map.display().active_taxonomy(), Some(1));
    assert_eq!(outcome.shown, 1);
    assert_eq!(h.map.display().selected_feature(), Some(MARKET));
}

#[test]
fn startup_ignores_features_outside_the_active_taxonomy() {
    let mut h = city();
    let outcome = h.map.apply_startup_query(&StartupQuery::parse("featIds=holMap;ghost"));
    assert_eq!(outcome.shown, 0);
    assert!(showing(&h.map).is_empty());
}

#[test]
fn startup_clears_what_was_showing() {
    let mut h = city();
    h.map.display_mut().show_hide_feature(true, CHURCH, None);
    h.map.apply_startup_query(&StartupQuery::parse("featIds=fort"));
    assert_eq!(showing(&h.map), vec![FORT]);
    assert_eq!(h.renderer.last_style(CHURCH), Some(FeatureStyle::Hidden));
}

#[test]
fn startup_doc_and_flags() {
    let mut config = HolMapConfig::default();
    config.layer.startup_doc = "intro.html".to_string();
    let mut h = open(city_with_timeline(), config);

    let outcome = h.map.apply_startup_query(&StartupQuery::default());
    assert_eq!(outcome.doc_path.as_deref(), Some("intro.html"));
    assert!(!outcome.drawing && !outcome.upload && !outcome.track_location);

    let outcome = h
        .map
        .apply_startup_query(&StartupQuery::parse("docPath=fort.html&drawing=1&upload=1&currLoc=1"));
    assert_eq!(outcome.doc_path.as_deref(), Some("fort.html"));
    assert!(outcome.drawing && outcome.upload && outcome.track_location);
    assert!(h.map.drawing_enabled());
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

#[test]
fn drawn_features_need_drawing_enabled() {
    let mut h = city();
    let square = Geometry::point(-123.0, 48.0);
    assert_eq!(h.map.add_drawn_feature("Bike Rack", "", square.clone()), None);

    h.map.apply_startup_query(&StartupQuery::parse("drawing=yes"));
    let f = h.map.add_drawn_feature("Bike Rack", "", square).unwrap();
    assert_eq!(h.map.display().store().get(f).unwrap().id, "bikeRack");
    assert_eq!(h.map.display().selected_feature(), Some(f));
}

#[test]
fn taxonomy_editing_follows_config() {
    let mut h = city();
    assert_eq!(h.map.add_taxonomy("Walks"), None);
    assert_eq!(h.map.add_category("Harbour", ""), None);

    let mut config = HolMapConfig::default();
    config.layer.allow_taxonomy_editing = true;
    let mut h = open(city_with_timeline(), config);
    let tax = h.map.add_taxonomy("Walks").unwrap();
    assert_eq!(h.map.display().active_taxonomy(), Some(tax));
    assert_eq!(h.map.add_category("Harbour", "Along the water"), Some(0));
}

// ---------------------------------------------------------------------------
// Taxonomy switching and search
// ---------------------------------------------------------------------------

#[test]
fn change_taxonomy_stops_playback_and_forgets_the_window() {
    let mut h = city();
    assert!(h.map.toggle_timeline(true));
    assert!(h.map.timeline_play());
    assert_eq!(h.scheduler.active().len(), 1);

    assert!(h.map.change_taxonomy(1));
    assert!(!h.map.timeline().is_playing());
    assert!(h.scheduler.active().is_empty());
    assert!(h.map.timeline().last_showing().is_empty());
    assert!(showing(&h.map).is_empty());
    assert!(!h.map.change_taxonomy(1));
}

#[test]
fn search_filters_and_clears_the_nav_tree() {
    let mut h = city();
    assert_eq!(h.map.search("church"), 1);
    assert!(h.map.display().nav().all_hidden);
    h.map.clear_search();
    assert!(!h.map.display().nav().all_hidden);
    assert!(h.map.display().nav().categories.iter().all(|c| !c.hidden));
}

// ---------------------------------------------------------------------------
// Reload
// ---------------------------------------------------------------------------

#[test]
fn reload_cancels_playback_and_swaps_everything() {
    let mut h = city();
    h.map.toggle_timeline(true);
    h.map.timeline_play();
    h.map.display_mut().set_selected_feature(FORT, false);

    h.map
        .reload_from_str(&parks_and_museums().to_string(), "parks.json")
        .unwrap();
    assert!(h.scheduler.active().is_empty());
    assert_eq!(h.scheduler.cancelled().len(), 1);
    assert!(!h.map.timeline().is_playing());
    assert!(!h.map.timeline().is_enabled());
    assert!(!h.map.timeline().has_timeline());
    assert_eq!(h.map.source_id(), "parks.json");
    assert_eq!(h.map.display().store().len(), 6);
    assert_eq!(h.map.display().selected_feature(), None);
    assert!(showing(&h.map).is_empty());
    assert_eq!(h.map.display().nav().categories.len(), 2);
}

#[test]
fn failed_reload_while_playing_restores_normal_styles() {
    let mut h = city();
    let events = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);
    h.map
        .parts_mut()
        .0
        .subscribe(move |e| log.borrow_mut().push(e.playing));

    assert!(h.map.toggle_timeline(true));
    assert!(h.map.timeline_play());
    assert!(h.map.on_tick());
    assert!(h.renderer.last_style(HALL).is_some_and(|s| s.is_selected()));

    assert!(h.map.reload_from_str("not json", "bad.json").is_err());
    assert!(!h.map.timeline().is_playing());
    assert!(h.scheduler.active().is_empty());
    assert!(matches!(
        h.renderer.last_style(HALL),
        Some(FeatureStyle::Category { .. })
    ));
    assert_eq!(showing(&h.map), vec![CHURCH, HALL]);
    assert_eq!(events.borrow().last(), Some(&false));
}

#[test]
fn failed_reload_keeps_the_current_generation() {
    let mut h = city();
    assert!(h.map.reload_from_str("{\"type\":\"Topology\"}", "bad.json").is_err());
    assert!(h.map.reload_from_str("not json", "bad.json").is_err());
    assert_eq!(h.map.source_id(), "city.json");
    assert_eq!(h.map.display().store().len(), 5);
    assert_eq!(h.map.timeline().points().len(), 3);
}

// ---------------------------------------------------------------------------
// Full lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_session_lifecycle() {
    let mut h = city();
    h.map.apply_startup_query(&StartupQuery::parse("catIds=religious"));
    assert_eq!(showing(&h.map), vec![CHURCH]);

    // Timeline takes over the display from the first window on.
    assert!(h.map.toggle_timeline(true));
    assert_eq!(showing(&h.map), vec![FORT, CHURCH]);
    assert!(h.map.timeline_step(Step::Forward));
    assert_eq!(showing(&h.map), vec![CHURCH, HALL]);

    // Auto-play from window 1 to the end, then the tick after the last
    // window stops.
    assert!(h.map.timeline_play());
    assert!(h.map.on_tick());
    assert_eq!(h.map.timeline().index(), 2);
    assert_eq!(showing(&h.map), vec![FORT, HALL, MARKET]);
    assert!(!h.map.on_tick());
    assert!(!h.map.timeline().is_playing());
    assert!(matches!(
        h.renderer.last_style(MARKET),
        Some(FeatureStyle::Category { .. })
    ));

    // Picking from hits prefers the point over the hall polygon.
    assert_eq!(h.map.select_feature_from_hits(&[HALL, MARKET]), Some(MARKET));

    assert!(h.map.toggle_timeline(false));
    assert_eq!(h.map.timeline().index(), 0);
    assert!(h.map.change_taxonomy(1));
    assert!(showing(&h.map).is_empty());
}
