use tracing::{debug, warn};

use holmap_core::models::FeatureInfo;

use crate::controller::DisplayController;

impl DisplayController {
    /// Select `feature`, replacing any previous selection. The "selected"
    /// style uses the category the feature is shown with, or its first
    /// category in the active taxonomy. Returns the selected index.
    pub fn set_selected_feature(&mut self, feature: usize, jump_in_nav: bool) -> Option<usize> {
        self.deselect_feature();
        let tax = self.active?;
        let Some(f) = self.store.get(feature) else {
            warn!(feature, "cannot select unknown feature");
            return None;
        };
        let Some(category) = f
            .showing_cat()
            .or_else(|| self.taxonomies.first_category_of(tax, feature))
        else {
            warn!(feature, taxonomy = tax, "feature has no category in the active taxonomy");
            return None;
        };

        let style = self.selected_style(tax, category);
        self.renderer.set_style(feature, &style);
        if let Some(f) = self.store.get_mut(feature) {
            f.set_selected(true);
        }
        self.selected = Some(feature);
        self.nav.select(category, feature, jump_in_nav);
        debug!(feature, category, "feature selected");
        Some(feature)
    }

    /// Clear the selection, restoring the feature's plain style.
    pub fn deselect_feature(&mut self) {
        let Some(feature) = self.selected.take() else {
            return;
        };
        if let Some(f) = self.store.get_mut(feature) {
            f.set_selected(false);
        }
        self.apply_display_style(feature);
        self.nav.clear_selection();
    }

    /// Show and select the feature with `id` if the active taxonomy has it.
    pub fn select_feature_by_id(&mut self, id: &str) -> Option<usize> {
        let feature = self.store.index_of(id)?;
        let Some(category) = self
            .active
            .and_then(|tax| self.taxonomies.first_category_of(tax, feature))
        else {
            debug!(id, "feature not in active taxonomy; not selected");
            return Some(feature);
        };
        self.show_hide_feature(true, feature, Some(category));
        self.set_selected_feature(feature, true);
        self.center_on_features(&[feature]);
        Some(feature)
    }

    /// Select the best of the features found under a map pixel.
    ///
    /// Only showing features count. Lines and points always win over
    /// areas; among areas the smallest extent wins.
    pub fn select_feature_from_hits(&mut self, hits: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &idx in hits {
            let Some(f) = self.store.get(idx).filter(|f| f.showing()) else {
                continue;
            };
            let Some(geometry) = &f.geometry else {
                continue;
            };
            if !geometry.kind.is_areal() {
                best = Some((idx, 0.0));
            } else {
                let size = geometry.extent.map(|e| e.area()).unwrap_or(f64::MAX);
                if best.map_or(true, |(_, s)| size < s) {
                    best = Some((idx, size));
                }
            }
        }
        let (feature, _) = best?;
        self.set_selected_feature(feature, true)
    }

    /// Info-panel content for the current selection.
    pub fn selected_feature_info(&self) -> Option<FeatureInfo> {
        let feature = self.selected?;
        let f = self.store.get(feature)?;
        Some(FeatureInfo {
            feature,
            title: f.name.clone(),
            desc: f.desc.clone(),
            links: f
                .links
                .iter()
                .map(|l| format!("{}{}", self.link_prefix, l))
                .collect(),
        })
    }
}
