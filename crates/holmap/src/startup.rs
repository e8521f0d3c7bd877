//! Startup query handling: initial taxonomy and pre-shown content.

use serde::Serialize;
use tracing::{debug, info};

use holmap_core::models::{StartupQuery, ALL_TAXONOMIES_ALIAS, ALL_TAXONOMIES_ID};
use holmap_taxonomy::TaxonomySet;

use crate::session::HolMap;

/// What a startup query asked of the page beyond the map itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StartupOutcome {
    /// Categories plus features pre-shown.
    pub shown: usize,
    /// Document to open in the side panel.
    pub doc_path: Option<String>,
    pub drawing: bool,
    pub upload: bool,
    pub track_location: bool,
}

/// Resolve a taxonomy reference: a numeric index, a taxonomy id, or one
/// of the synthetic "all" aliases. Blank and unknown values resolve to
/// `None`.
pub fn resolve_taxonomy(taxonomies: &TaxonomySet, value: &str) -> Option<usize> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(index) = value.parse::<usize>() {
        return (index < taxonomies.len()).then_some(index);
    }
    if value == ALL_TAXONOMIES_ALIAS || value == ALL_TAXONOMIES_ID {
        return taxonomies.all_taxonomy_index();
    }
    taxonomies.taxonomy_index_by_id(value)
}

impl HolMap {
    /// Apply the page's query-string controls to a freshly loaded map.
    ///
    /// Switches to the requested taxonomy unless the config names one,
    /// clears the display, then pre-shows the listed categories and
    /// features of the active taxonomy. A lone pre-shown feature stays
    /// selected; when more than one category or feature was shown there
    /// is no selection.
    pub fn apply_startup_query(&mut self, query: &StartupQuery) -> StartupOutcome {
        if self.config.layer.initial_taxonomy_id.trim().is_empty() {
            if let Some(tax) = resolve_taxonomy(self.display.taxonomies(), &query.taxonomy) {
                self.change_taxonomy(tax);
            }
        }

        self.display.deselect_feature();
        self.display.show_hide_all_features(false);
        self.timeline.forget_showing();

        let doc_path = [&query.doc_path, &self.config.layer.startup_doc]
            .into_iter()
            .find(|path| !path.is_empty())
            .cloned();

        let mut shown = 0;
        if let Some(tax) = self.display.active_taxonomy() {
            for id in &query.cat_ids {
                let Some(position) = self.display.get_category_index_by_id(id) else {
                    debug!(category = %id, "startup category not in the active taxonomy");
                    continue;
                };
                if self.display.category_checkbox_changed(position, true) {
                    shown += 1;
                }
            }

            let mut features = Vec::new();
            for id in &query.feat_ids {
                if !self.display.taxonomy_has_feature(tax, id) {
                    debug!(feature = %id, "startup feature not in the active taxonomy");
                    continue;
                }
                let Some(feature) = self.display.get_feature_index_by_id(id) else {
                    continue;
                };
                let category = self.display.get_curr_first_cat_num(id);
                if self.display.show_hide_feature(true, feature, category) {
                    self.display.set_selected_feature(feature, true);
                    features.push(feature);
                    shown += 1;
                }
            }
            if shown > 1 {
                self.display.deselect_feature();
            }
            self.display.center_on_features(&features);
        }

        self.drawing_enabled |= query.drawing;
        self.upload_enabled |= query.upload;
        let outcome = StartupOutcome {
            shown,
            doc_path,
            drawing: self.drawing_enabled,
            upload: self.upload_enabled,
            track_location: query.curr_loc,
        };
        info!(shown, doc = ?outcome.doc_path, "startup query applied");
        outcome
    }
}
