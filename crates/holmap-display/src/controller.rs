//! Show/hide state machine.
//!
//! Every single-feature change runs
//! `SHOWHIDING_FEATURES → HARMONIZING_FEATURE_CHECKBOXES →
//! HARMONIZING_CATEGORY_CHECKBOXES` and then returns to the status it was
//! entered with. `SHOWHIDING_CATEGORY` wraps a whole category loop.
//! User-driven handlers run only while the status is `IDLE`.

use tracing::{debug, trace, warn};

use holmap_core::errors::DisplayError;
use holmap_core::models::{CheckboxChange, DisplayStatus, FeatureStyle};
use holmap_core::traits::MapRenderer;
use holmap_store::FeatureStore;
use holmap_taxonomy::TaxonomySet;

use crate::nav::NavTree;
use crate::observer::NavObserver;

pub struct DisplayController {
    pub(crate) store: FeatureStore,
    pub(crate) taxonomies: TaxonomySet,
    pub(crate) active: Option<usize>,
    pub(crate) nav: NavTree,
    pub(crate) status: DisplayStatus,
    pub(crate) selected: Option<usize>,
    pub(crate) renderer: Box<dyn MapRenderer>,
    pub(crate) observer: Option<Box<dyn NavObserver>>,
    pub(crate) link_prefix: String,
}

impl std::fmt::Debug for DisplayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayController")
            .field("features", &self.store.len())
            .field("taxonomies", &self.taxonomies.len())
            .field("active", &self.active)
            .field("status", &self.status)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl DisplayController {
    /// Take ownership of a freshly loaded store and its taxonomies. The
    /// first taxonomy, if any, becomes active.
    pub fn new(store: FeatureStore, taxonomies: TaxonomySet, renderer: Box<dyn MapRenderer>) -> Self {
        let active = (!taxonomies.is_empty()).then_some(0);
        let nav = match active {
            Some(tax) => NavTree::build(&store, &taxonomies, tax),
            None => NavTree::default(),
        };
        Self {
            store,
            taxonomies,
            active,
            nav,
            status: DisplayStatus::Idle,
            selected: None,
            renderer,
            observer: None,
            link_prefix: String::new(),
        }
    }

    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn NavObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) -> Option<Box<dyn NavObserver>> {
        self.observer.take()
    }

    /// Swap in a new generation of data in one step. Display state of the
    /// new store starts cleared; the observer and renderer are kept.
    pub fn replace_data(&mut self, store: FeatureStore, taxonomies: TaxonomySet, active: usize) {
        let active = (active < taxonomies.len()).then_some(active);
        self.nav = match active {
            Some(tax) => NavTree::build(&store, &taxonomies, tax),
            None => NavTree::default(),
        };
        self.store = store;
        self.taxonomies = taxonomies;
        self.active = active;
        self.selected = None;
        self.status = DisplayStatus::Idle;
        debug!(features = self.store.len(), taxonomies = self.taxonomies.len(), "display data replaced");
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn taxonomies(&self) -> &TaxonomySet {
        &self.taxonomies
    }

    pub fn nav(&self) -> &NavTree {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavTree {
        &mut self.nav
    }

    pub fn status(&self) -> DisplayStatus {
        self.status
    }

    pub fn active_taxonomy(&self) -> Option<usize> {
        self.active
    }

    pub fn selected_feature(&self) -> Option<usize> {
        self.selected
    }

    pub fn link_prefix(&self) -> &str {
        &self.link_prefix
    }

    /// Indices of every feature currently showing.
    pub fn showing_features(&self) -> Vec<usize> {
        self.store
            .iter()
            .filter(|(_, f)| f.showing())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn get_feature_index_by_id(&self, id: &str) -> Option<usize> {
        self.store.index_of(id)
    }

    pub fn get_taxonomy_index_by_id(&self, id: &str) -> Option<usize> {
        self.taxonomies.taxonomy_index_by_id(id)
    }

    /// Position of a category in the active taxonomy.
    pub fn get_category_index_by_id(&self, id: &str) -> Option<usize> {
        self.taxonomies.category_index_by_id(self.active?, id)
    }

    pub fn taxonomy_has_category(&self, tax: usize, id: &str) -> bool {
        self.taxonomies.has_category(tax, id)
    }

    pub fn taxonomy_has_feature(&self, tax: usize, id: &str) -> bool {
        self.store
            .index_of(id)
            .is_some_and(|f| self.taxonomies.has_feature(tax, f))
    }

    /// First category of the active taxonomy containing the feature.
    pub fn get_curr_first_cat_num(&self, id: &str) -> Option<usize> {
        let f = self.store.index_of(id)?;
        self.taxonomies.first_category_of(self.active?, f)
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    pub(crate) fn set_status(&mut self, status: DisplayStatus) {
        if self.status != status {
            trace!(from = %self.status, to = %status, "display status");
            self.status = status;
        }
    }

    /// Feature operations never nest inside another feature operation;
    /// they may run from IDLE or inside a category loop.
    fn can_start_feature_op(&self) -> bool {
        matches!(
            self.status,
            DisplayStatus::Idle | DisplayStatus::ShowhidingCategory
        )
    }

    /// Fire a checkbox change at the observer, which may call back into
    /// the controller.
    pub(crate) fn notify(&mut self, change: CheckboxChange) {
        if let Some(mut observer) = self.observer.take() {
            observer.checkbox_changed(self, change);
            if self.observer.is_none() {
                self.observer = Some(observer);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Styles
    // -----------------------------------------------------------------------

    pub(crate) fn active_or_err(&self) -> Result<usize, DisplayError> {
        self.active.ok_or(DisplayError::NoActiveTaxonomy)
    }

    pub(crate) fn check_feature(&self, feature: usize) -> Result<(), DisplayError> {
        if feature < self.store.len() {
            Ok(())
        } else {
            Err(DisplayError::FeatureOutOfRange {
                index: feature,
                len: self.store.len(),
            })
        }
    }

    pub(crate) fn category_style(&self, tax: usize, category: usize) -> FeatureStyle {
        let cat = self.taxonomies.category_at(tax, category);
        FeatureStyle::category(
            category,
            cat.and_then(|c| c.icon.clone()),
            cat.and_then(|c| c.icon_dim),
        )
    }

    pub(crate) fn selected_style(&self, tax: usize, category: usize) -> FeatureStyle {
        let cat = self.taxonomies.category_at(tax, category);
        FeatureStyle::Selected {
            category,
            icon: cat.and_then(|c| c.icon.clone()),
            icon_dim: cat.and_then(|c| c.icon_dim),
        }
    }

    /// Re-apply the plain style matching the feature's current flags.
    pub fn apply_display_style(&mut self, feature: usize) {
        let Some(f) = self.store.get(feature) else {
            return;
        };
        let style = match (f.showing_cat(), self.active) {
            (Some(cat), Some(tax)) if f.showing() => self.category_style(tax, cat),
            _ => FeatureStyle::Hidden,
        };
        self.renderer.set_style(feature, &style);
    }

    /// Apply the "selected" look without changing the selection.
    pub fn highlight_feature(&mut self, feature: usize) -> bool {
        let Some(tax) = self.active else {
            return false;
        };
        let Some(category) = self
            .store
            .get(feature)
            .and_then(|f| f.showing_cat())
            .or_else(|| self.taxonomies.first_category_of(tax, feature))
        else {
            return false;
        };
        let style = self.selected_style(tax, category);
        self.renderer.set_style(feature, &style);
        true
    }

    /// Fit the view to the features that have a geometry.
    pub fn center_on_features(&mut self, features: &[usize]) -> bool {
        let with_geometry: Vec<usize> = features
            .iter()
            .copied()
            .filter(|&i| self.store.get(i).is_some_and(|f| f.geometry.is_some()))
            .collect();
        if with_geometry.is_empty() {
            return false;
        }
        self.renderer.fit_features(&with_geometry);
        true
    }

    // -----------------------------------------------------------------------
    // Show / hide
    // -----------------------------------------------------------------------

    /// Show or hide one feature, resolving its category in the active
    /// taxonomy when `category` is `None`.
    pub fn show_hide_feature(&mut self, show: bool, feature: usize, category: Option<usize>) -> bool {
        match self.try_show_hide_feature(show, feature, category) {
            Ok(()) => true,
            Err(e) => {
                warn!(show, feature, error = %e, "show_hide_feature failed");
                false
            }
        }
    }

    pub fn try_show_hide_feature(
        &mut self,
        show: bool,
        feature: usize,
        category: Option<usize>,
    ) -> Result<(), DisplayError> {
        if !self.can_start_feature_op() {
            return Err(DisplayError::Busy {
                status: self.status,
            });
        }
        let outer = self.status;
        let result = self.show_hide_feature_inner(show, feature, category);
        self.set_status(outer);
        result
    }

    fn show_hide_feature_inner(
        &mut self,
        show: bool,
        feature: usize,
        category: Option<usize>,
    ) -> Result<(), DisplayError> {
        let tax = self.active_or_err()?;
        self.check_feature(feature)?;
        if !self.taxonomies.has_feature(tax, feature) {
            return Err(DisplayError::NotInActiveTaxonomy { feature });
        }
        let category = match category {
            Some(c) if self.taxonomies.category_id_at(tax, c).is_some() => c,
            Some(c) => {
                return Err(DisplayError::CategoryOutOfRange {
                    index: c,
                    taxonomy: tax,
                })
            }
            None => self
                .taxonomies
                .first_category_of(tax, feature)
                .ok_or(DisplayError::NotInActiveTaxonomy { feature })?,
        };

        self.set_status(DisplayStatus::ShowhidingFeatures);
        if show {
            let style = self.category_style(tax, category);
            self.renderer.set_style(feature, &style);
            if let Some(f) = self.store.get_mut(feature) {
                f.mark_shown(category);
            }
        } else {
            if self.selected == Some(feature) {
                self.deselect_feature();
            }
            self.renderer.set_style(feature, &FeatureStyle::Hidden);
            if let Some(f) = self.store.get_mut(feature) {
                f.mark_hidden();
            }
        }

        self.set_status(DisplayStatus::HarmonizingFeatureCheckboxes);
        for cat in self.nav.set_feature_checked(feature, show) {
            self.notify(CheckboxChange::Feature {
                category: cat,
                feature,
                checked: show,
            });
        }

        self.set_status(DisplayStatus::HarmonizingCategoryCheckboxes);
        for change in self.nav.harmonize() {
            self.notify(change);
        }
        Ok(())
    }

    /// Hide every showing feature (any taxonomy), or show every feature of
    /// the active taxonomy. Returns how many features changed.
    pub fn show_hide_all_features(&mut self, show: bool) -> usize {
        let candidates: Vec<usize> = if show {
            match self.active {
                Some(tax) => self.taxonomies.features_of(tax),
                None => Vec::new(),
            }
        } else {
            (0..self.store.len()).collect()
        };

        let mut changed = 0;
        for feature in candidates {
            let showing = self.store.get(feature).is_some_and(|f| f.showing());
            if showing == show {
                continue;
            }
            if show {
                if self.show_hide_feature(true, feature, None) {
                    changed += 1;
                }
            } else if self.hide_anywhere(feature) {
                changed += 1;
            }
        }
        debug!(show, changed, "show_hide_all_features");
        changed
    }

    /// Hide a feature even when it is not in the active taxonomy.
    fn hide_anywhere(&mut self, feature: usize) -> bool {
        let in_active = self
            .active
            .is_some_and(|tax| self.taxonomies.has_feature(tax, feature));
        if in_active {
            return self.show_hide_feature(false, feature, None);
        }
        if !self.can_start_feature_op() {
            return false;
        }
        if self.selected == Some(feature) {
            self.deselect_feature();
        }
        self.renderer.set_style(feature, &FeatureStyle::Hidden);
        match self.store.get_mut(feature) {
            Some(f) => {
                f.mark_hidden();
                true
            }
            None => false,
        }
    }

    /// Show or hide every feature listed under category `category` of the
    /// navigation tree, then fit the view to them.
    pub fn show_hide_category(&mut self, show: bool, category: usize) -> bool {
        match self.try_show_hide_category(show, category) {
            Ok(()) => true,
            Err(e) => {
                warn!(show, category, error = %e, "show_hide_category failed");
                false
            }
        }
    }

    pub fn try_show_hide_category(&mut self, show: bool, category: usize) -> Result<(), DisplayError> {
        if !self.status.is_idle() {
            return Err(DisplayError::Busy {
                status: self.status,
            });
        }
        let tax = self.active_or_err()?;
        if self.taxonomies.category_id_at(tax, category).is_none() {
            return Err(DisplayError::CategoryOutOfRange {
                index: category,
                taxonomy: tax,
            });
        }
        let features: Vec<usize> = self
            .nav
            .category(category)
            .ok_or(DisplayError::CategoryNotRendered { index: category })?
            .features()
            .collect();

        self.set_status(DisplayStatus::ShowhidingCategory);
        for &feature in &features {
            if let Err(e) = self.try_show_hide_feature(show, feature, Some(category)) {
                warn!(feature, category, error = %e, "feature skipped in category change");
            }
        }
        self.center_on_features(&features);
        self.set_status(DisplayStatus::Idle);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // User-driven handlers (no-ops unless IDLE)
    // -----------------------------------------------------------------------

    /// A feature checkbox in the navigation tree was toggled.
    pub fn feature_checkbox_changed(&mut self, category: usize, feature: usize, checked: bool) -> bool {
        if !self.status.is_idle() {
            trace!(feature, status = %self.status, "ignoring programmatic feature change");
            return false;
        }
        let mut ok = self.show_hide_feature(checked, feature, Some(category));
        if checked {
            ok = ok && self.set_selected_feature(feature, false).is_some();
            self.center_on_features(&[feature]);
        }
        ok
    }

    /// A feature label in the navigation tree was clicked.
    pub fn feature_label_clicked(&mut self, category: usize, feature: usize) -> bool {
        if !self.status.is_idle() {
            return false;
        }
        let ok = self.show_hide_feature(true, feature, Some(category))
            && self.set_selected_feature(feature, false).is_some();
        self.center_on_features(&[feature]);
        ok
    }

    /// A category checkbox was toggled.
    pub fn category_checkbox_changed(&mut self, category: usize, checked: bool) -> bool {
        if !self.status.is_idle() {
            trace!(category, status = %self.status, "ignoring programmatic category change");
            return false;
        }
        self.show_hide_category(checked, category)
    }

    /// The "all" checkbox was toggled.
    pub fn all_checkbox_changed(&mut self, checked: bool) -> usize {
        if !self.status.is_idle() {
            return 0;
        }
        self.show_hide_all_features(checked)
    }
}
