//! The navigation tree: one node per rendered category of the active
//! taxonomy, one checkbox entry per menu-visible feature.
//!
//! A feature belonging to several categories has one entry in each, and
//! all of them are bound to the same feature index.

use serde::Serialize;

use holmap_core::models::{CheckboxChange, TriState};
use holmap_store::FeatureStore;
use holmap_taxonomy::TaxonomySet;

use crate::harmonize::{all_state, category_state};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavEntry {
    pub feature: usize,
    pub label: String,
    pub checked: bool,
    /// Filtered out by the current search.
    pub hidden: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavCategory {
    /// Position of the category in the active taxonomy.
    pub position: usize,
    pub id: String,
    pub name: String,
    pub desc: String,
    pub entries: Vec<NavEntry>,
    pub checkbox: TriState,
    pub hidden: bool,
    /// Header checkbox hidden, entries shown directly (search mode).
    pub headless: bool,
    pub expanded: bool,
}

impl NavCategory {
    pub fn features(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.feature)
    }

    fn checks(&self) -> Vec<bool> {
        self.entries.iter().map(|e| e.checked).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavTree {
    pub taxonomy: Option<usize>,
    pub categories: Vec<NavCategory>,
    pub all: TriState,
    pub all_hidden: bool,
    /// Entry the host should scroll into view, as `(category, feature)`.
    pub scroll_target: Option<(usize, usize)>,
}

impl NavTree {
    /// Render the tree for taxonomy `tax`. Entry check states mirror the
    /// features' current `showing` flags.
    pub fn build(store: &FeatureStore, taxonomies: &TaxonomySet, tax: usize) -> Self {
        let categories = taxonomies
            .categories_of(tax)
            .enumerate()
            .filter_map(|(position, cat)| {
                let entries: Vec<NavEntry> = cat
                    .features
                    .iter()
                    .filter_map(|&idx| {
                        let feature = store.get(idx)?;
                        feature.show_on_menu.then(|| NavEntry {
                            feature: idx,
                            label: feature.label().to_string(),
                            checked: feature.showing(),
                            hidden: false,
                            selected: feature.selected(),
                        })
                    })
                    .collect();
                (!entries.is_empty()).then(|| NavCategory {
                    position,
                    id: cat.id.clone(),
                    name: cat.name.clone(),
                    desc: cat.desc.clone(),
                    entries,
                    checkbox: TriState::Unchecked,
                    hidden: false,
                    headless: false,
                    expanded: false,
                })
            })
            .collect();

        let mut tree = Self {
            taxonomy: Some(tax),
            categories,
            ..Self::default()
        };
        tree.harmonize();
        tree
    }

    pub fn category(&self, position: usize) -> Option<&NavCategory> {
        self.categories.iter().find(|c| c.position == position)
    }

    fn category_mut(&mut self, position: usize) -> Option<&mut NavCategory> {
        self.categories.iter_mut().find(|c| c.position == position)
    }

    /// Every entry bound to `feature`, as `(category position, entry)`.
    pub fn entries_for(&self, feature: usize) -> impl Iterator<Item = (usize, &NavEntry)> + '_ {
        self.categories.iter().flat_map(move |c| {
            c.entries
                .iter()
                .filter(move |e| e.feature == feature)
                .map(move |e| (c.position, e))
        })
    }

    /// Set every checkbox bound to `feature`. Returns the categories whose
    /// entry actually changed.
    pub fn set_feature_checked(&mut self, feature: usize, checked: bool) -> Vec<usize> {
        let mut changed = Vec::new();
        for cat in &mut self.categories {
            for entry in cat.entries.iter_mut().filter(|e| e.feature == feature) {
                if entry.checked != checked {
                    entry.checked = checked;
                    changed.push(cat.position);
                }
            }
        }
        changed
    }

    /// Recompute every category checkbox and the "all" checkbox from the
    /// entries. Returns the checkboxes whose state changed.
    pub fn harmonize(&mut self) -> Vec<CheckboxChange> {
        let mut changes = Vec::new();
        for cat in &mut self.categories {
            let state = category_state(&cat.checks());
            if cat.checkbox != state {
                cat.checkbox = state;
                changes.push(CheckboxChange::Category {
                    category: cat.position,
                    state,
                });
            }
        }
        let states: Vec<TriState> = self.categories.iter().map(|c| c.checkbox).collect();
        let all = all_state(&states);
        if self.all != all {
            self.all = all;
            changes.push(CheckboxChange::All { state: all });
        }
        changes
    }

    /// Mark the entry of `feature` under `category` selected and expand
    /// that category.
    pub fn select(&mut self, category: usize, feature: usize, jump: bool) {
        self.clear_selection();
        if let Some(cat) = self.category_mut(category) {
            cat.expanded = true;
            for entry in cat.entries.iter_mut().filter(|e| e.feature == feature) {
                entry.selected = true;
            }
        }
        if jump {
            self.scroll_target = Some((category, feature));
        }
    }

    pub fn clear_selection(&mut self) {
        for entry in self.categories.iter_mut().flat_map(|c| c.entries.iter_mut()) {
            entry.selected = false;
        }
        self.scroll_target = None;
    }

    pub fn selected_entries(&self) -> impl Iterator<Item = (usize, &NavEntry)> + '_ {
        self.categories.iter().flat_map(|c| {
            c.entries
                .iter()
                .filter(|e| e.selected)
                .map(move |e| (c.position, e))
        })
    }
}
