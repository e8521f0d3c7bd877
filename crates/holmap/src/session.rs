//! HolMap: one loaded map and everything displayed from it.

use tracing::{error, info, warn};

use holmap_core::errors::{HolMapError, HolMapResult};
use holmap_core::models::{FeatureInfo, Geometry, TimelinePoint};
use holmap_core::traits::{MapRenderer, PlaybackScheduler};
use holmap_core::HolMapConfig;
use holmap_display::{DisplayController, SearchFilter};
use holmap_store::{FeatureSource, FeatureStore};
use holmap_taxonomy::{read_taxonomies, TaxonomySet};
use holmap_timeline::{build_points, Step, TimelineEngine};

use crate::startup::resolve_taxonomy;

/// Everything derived from one load of the source, built completely
/// before it replaces the previous generation.
struct Generation {
    store: FeatureStore,
    taxonomies: TaxonomySet,
    active: usize,
    points: Vec<TimelinePoint>,
}

impl Generation {
    fn build(mut store: FeatureStore, config: &HolMapConfig) -> HolMapResult<Self> {
        let taxonomies = read_taxonomies(Some(&store), config.layer.all_features_taxonomy);
        if taxonomies.is_empty() {
            let err = HolMapError::missing_data("taxonomies", store.source_id());
            error!(error = %err, "map cannot be displayed");
            return Err(err);
        }
        store.fill_base_taxonomies(taxonomies.to_refs());
        let active = resolve_taxonomy(&taxonomies, &config.layer.initial_taxonomy_id).unwrap_or(0);
        let points = store
            .raw_timeline()
            .map(|raw| build_points(raw, &store))
            .unwrap_or_default();
        info!(
            source = store.source_id(),
            features = store.len(),
            taxonomies = taxonomies.len(),
            timeline_points = points.len(),
            "map data loaded"
        );
        Ok(Self { store, taxonomies, active, points })
    }
}

/// A loaded map session.
pub struct HolMap {
    pub(crate) config: HolMapConfig,
    pub(crate) display: DisplayController,
    pub(crate) timeline: TimelineEngine,
    pub(crate) drawing_enabled: bool,
    pub(crate) upload_enabled: bool,
}

impl std::fmt::Debug for HolMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolMap")
            .field("display", &self.display)
            .field("timeline", &self.timeline)
            .finish_non_exhaustive()
    }
}

impl HolMap {
    /// Load from a feature source.
    pub async fn load<S: FeatureSource>(
        source: &S,
        config: HolMapConfig,
        renderer: Box<dyn MapRenderer>,
        scheduler: Box<dyn PlaybackScheduler>,
    ) -> HolMapResult<Self> {
        let store = source.load().await?;
        Self::from_store(store, config, renderer, scheduler)
    }

    /// Load from GeoJSON text already in memory.
    pub fn from_geojson_str(
        json: &str,
        source_id: &str,
        config: HolMapConfig,
        renderer: Box<dyn MapRenderer>,
        scheduler: Box<dyn PlaybackScheduler>,
    ) -> HolMapResult<Self> {
        let store = FeatureStore::from_geojson_str(json, source_id)?;
        Self::from_store(store, config, renderer, scheduler)
    }

    pub fn from_store(
        store: FeatureStore,
        config: HolMapConfig,
        renderer: Box<dyn MapRenderer>,
        scheduler: Box<dyn PlaybackScheduler>,
    ) -> HolMapResult<Self> {
        let generation = Generation::build(store, &config)?;
        let mut display = DisplayController::new(generation.store, generation.taxonomies, renderer)
            .with_link_prefix(config.layer.link_prefix.clone());
        if generation.active != 0 {
            display.change_taxonomy(generation.active);
        }
        let timeline = TimelineEngine::new(generation.points, &config.timeline, scheduler);
        Ok(Self {
            drawing_enabled: config.layer.allow_drawing,
            upload_enabled: config.layer.allow_upload,
            config,
            display,
            timeline,
        })
    }

    // -----------------------------------------------------------------------
    // Reload
    // -----------------------------------------------------------------------

    /// Replace the loaded data with a new version of the source.
    ///
    /// Playback is stopped first, returning the current window to its
    /// normal style. If the new data fails to load the current generation
    /// stays on screen and the error is returned.
    pub async fn reload<S: FeatureSource>(&mut self, source: &S) -> HolMapResult<()> {
        self.timeline.stop(&mut self.display);
        let store = source.load().await?;
        self.swap_in(store)
    }

    pub fn reload_from_str(&mut self, json: &str, source_id: &str) -> HolMapResult<()> {
        self.timeline.stop(&mut self.display);
        let store = FeatureStore::from_geojson_str(json, source_id)?;
        self.swap_in(store)
    }

    fn swap_in(&mut self, store: FeatureStore) -> HolMapResult<()> {
        let generation = Generation::build(store, &self.config)?;
        self.display
            .replace_data(generation.store, generation.taxonomies, generation.active);
        self.timeline.reset(generation.points);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &HolMapConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplayController {
        &self.display
    }

    /// Direct access for navigation-tree events the facade does not wrap.
    pub fn display_mut(&mut self) -> &mut DisplayController {
        &mut self.display
    }

    pub fn timeline(&self) -> &TimelineEngine {
        &self.timeline
    }

    /// Both halves at once, e.g. to run the tokio playback driver.
    pub fn parts_mut(&mut self) -> (&mut TimelineEngine, &mut DisplayController) {
        (&mut self.timeline, &mut self.display)
    }

    pub fn map_title(&self) -> Option<&str> {
        self.display.store().map_title()
    }

    pub fn source_id(&self) -> &str {
        self.display.store().source_id()
    }

    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    pub fn upload_enabled(&self) -> bool {
        self.upload_enabled
    }

    pub fn selected_feature_info(&self) -> Option<FeatureInfo> {
        self.display.selected_feature_info()
    }

    // -----------------------------------------------------------------------
    // Taxonomies and search
    // -----------------------------------------------------------------------

    /// Switch the active taxonomy. Playback stops, since the switch hides
    /// every feature the timeline put on the map.
    pub fn change_taxonomy(&mut self, tax: usize) -> bool {
        if self.timeline.is_playing() {
            self.timeline.stop(&mut self.display);
        }
        let changed = self.display.change_taxonomy(tax);
        if changed {
            self.timeline.forget_showing();
        }
        changed
    }

    pub fn add_taxonomy(&mut self, name: &str) -> Option<usize> {
        if !self.config.layer.allow_taxonomy_editing {
            warn!(name, "taxonomy editing is disabled");
            return None;
        }
        if self.timeline.is_playing() {
            self.timeline.stop(&mut self.display);
        }
        let tax = self.display.add_taxonomy(name)?;
        self.timeline.forget_showing();
        Some(tax)
    }

    pub fn add_category(&mut self, name: &str, desc: &str) -> Option<usize> {
        if !self.config.layer.allow_taxonomy_editing {
            warn!(name, "taxonomy editing is disabled");
            return None;
        }
        self.display.add_category(name, desc)
    }

    /// Store a shape the user drew. Needs drawing enabled by config or by
    /// the startup query.
    pub fn add_drawn_feature(&mut self, name: &str, desc: &str, geometry: Geometry) -> Option<usize> {
        if !self.drawing_enabled {
            warn!(name, "drawing is disabled");
            return None;
        }
        self.display.add_drawn_feature(name, desc, geometry)
    }

    /// Filter the navigation tree by feature label. Returns the number of
    /// matching entries; a blank query clears the filter.
    pub fn search(&mut self, query: &str) -> usize {
        SearchFilter::new(query).apply(self.display.nav_mut())
    }

    pub fn clear_search(&mut self) {
        SearchFilter::clear(self.display.nav_mut());
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn select_feature_by_id(&mut self, id: &str) -> Option<usize> {
        self.display.select_feature_by_id(id)
    }

    pub fn select_feature_from_hits(&mut self, hits: &[usize]) -> Option<usize> {
        self.display.select_feature_from_hits(hits)
    }

    pub fn deselect_feature(&mut self) {
        self.display.deselect_feature();
    }

    // -----------------------------------------------------------------------
    // Timeline
    // -----------------------------------------------------------------------

    pub fn toggle_timeline(&mut self, enable: bool) -> bool {
        self.timeline.toggle_timeline(&mut self.display, enable)
    }

    pub fn timeline_change(&mut self, index: usize) -> bool {
        self.timeline.timeline_change(&mut self.display, index)
    }

    pub fn timeline_step(&mut self, step: Step) -> bool {
        self.timeline.timeline_step(&mut self.display, step)
    }

    pub fn timeline_play(&mut self) -> bool {
        self.timeline.timeline_play(&mut self.display)
    }

    /// Host callback for the scheduled playback timer.
    pub fn on_tick(&mut self) -> bool {
        self.timeline.on_tick(&mut self.display)
    }

    pub fn stop_timeline(&mut self) {
        self.timeline.stop(&mut self.display);
    }
}
