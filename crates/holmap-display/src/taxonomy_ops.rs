use tracing::{info, warn};

use holmap_core::ids::id_from_name;
use holmap_core::models::{
    CategoryRef, Feature, Geometry, TaxonomyRef, DRAWN_FEATURES_CATEGORY_ID,
    DRAWN_FEATURES_CATEGORY_NAME,
};

use crate::controller::DisplayController;
use crate::nav::NavTree;

impl DisplayController {
    /// Make taxonomy `tax` active: hide everything, switch, rebuild the
    /// navigation tree. No-op for the current or an unknown index.
    pub fn change_taxonomy(&mut self, tax: usize) -> bool {
        if tax >= self.taxonomies.len() || Some(tax) == self.active {
            return false;
        }
        if !self.status.is_idle() {
            warn!(taxonomy = tax, status = %self.status, "cannot change taxonomy mid-operation");
            return false;
        }
        self.deselect_feature();
        self.show_hide_all_features(false);
        self.active = Some(tax);
        self.rebuild_nav();
        info!(taxonomy = tax, "active taxonomy changed");
        true
    }

    pub(crate) fn rebuild_nav(&mut self) {
        self.nav = match self.active {
            Some(tax) => NavTree::build(&self.store, &self.taxonomies, tax),
            None => NavTree::default(),
        };
    }

    /// Create an empty taxonomy and switch to it.
    pub fn add_taxonomy(&mut self, name: &str) -> Option<usize> {
        match self.taxonomies.add_taxonomy(name) {
            Ok(tax) => {
                if self.active.is_none() {
                    self.active = Some(tax);
                    self.rebuild_nav();
                } else {
                    self.change_taxonomy(tax);
                }
                Some(tax)
            }
            Err(e) => {
                warn!(name, error = %e, "add_taxonomy failed");
                None
            }
        }
    }

    /// Create an empty category in the active taxonomy. Returns its
    /// position.
    pub fn add_category(&mut self, name: &str, desc: &str) -> Option<usize> {
        let tax = self.active?;
        match self.taxonomies.add_category(tax, name, desc) {
            Ok(position) => {
                self.rebuild_nav();
                Some(position)
            }
            Err(e) => {
                warn!(name, error = %e, "add_category failed");
                None
            }
        }
    }

    /// Add a user-drawn shape to the store under the active taxonomy's
    /// drawn-features category (created on first use), then show and
    /// select it.
    pub fn add_drawn_feature(&mut self, name: &str, desc: &str, geometry: Geometry) -> Option<usize> {
        let tax = self.active?;
        let position = match self.taxonomies.category_index_by_id(tax, DRAWN_FEATURES_CATEGORY_ID) {
            Some(p) => p,
            None => match self.taxonomies.insert_category(
                tax,
                DRAWN_FEATURES_CATEGORY_ID.to_string(),
                DRAWN_FEATURES_CATEGORY_NAME,
                "",
            ) {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "cannot create drawn-features category");
                    return None;
                }
            },
        };
        let cat_id = self.taxonomies.category_id_at(tax, position)?;
        let taxonomy = self.taxonomies.taxonomy(tax)?;

        let mut base_id = id_from_name(name);
        if base_id.is_empty() {
            base_id = "drawnFeature".to_string();
        }
        let mut feature = Feature::new(base_id, name);
        feature.desc = desc.to_string();
        feature.geometry = Some(geometry);
        feature.taxonomies = vec![TaxonomyRef {
            id: taxonomy.id.clone(),
            name: taxonomy.name.clone(),
            pos: taxonomy.pos,
            categories: vec![CategoryRef {
                id: DRAWN_FEATURES_CATEGORY_ID.to_string(),
                name: DRAWN_FEATURES_CATEGORY_NAME.to_string(),
                ..CategoryRef::default()
            }],
        }];

        let idx = self.store.push(feature);
        self.taxonomies.add_feature_to_category(cat_id, idx);
        self.rebuild_nav();
        let id = self.store.get(idx).map(|f| f.id.clone())?;
        info!(feature = id.as_str(), "drawn feature added");
        self.select_feature_by_id(&id)
    }
}
