//! Taxonomy construction.
//!
//! Every feature's `taxonomies` property is scanned, the base feature
//! included: it may define categories nobody belongs to yet, but it is
//! never listed as a member itself.

use tracing::{debug, error, info};

use holmap_core::errors::TaxonomyError;
use holmap_core::models::{
    Category, CategoryId, CategoryRef, Feature, Taxonomy, ALL_TAXONOMIES_ID, ALL_TAXONOMIES_NAME,
};
use holmap_store::FeatureStore;

use crate::set::TaxonomySet;

#[derive(Debug, Clone, Copy, Default)]
pub struct TaxonomyBuilder {
    all_features_taxonomy: bool,
}

impl TaxonomyBuilder {
    pub fn new(all_features_taxonomy: bool) -> Self {
        Self {
            all_features_taxonomy,
        }
    }

    pub fn build(&self, store: &FeatureStore) -> TaxonomySet {
        let mut taxonomies: Vec<Taxonomy> = Vec::new();
        let mut categories: Vec<Category> = Vec::new();

        for (idx, feature) in store.iter() {
            for tax_ref in &feature.taxonomies {
                let tax = match taxonomies.iter().position(|t| t.name == tax_ref.name) {
                    Some(t) => t,
                    None => {
                        taxonomies.push(Taxonomy {
                            id: tax_ref.id.clone(),
                            name: tax_ref.name.clone(),
                            pos: tax_ref.pos,
                            categories: Vec::new(),
                        });
                        taxonomies.len() - 1
                    }
                };
                for cat_ref in &tax_ref.categories {
                    let existing = taxonomies[tax]
                        .categories
                        .iter()
                        .copied()
                        .find(|id| categories[id.0].name == cat_ref.name);
                    let cat = existing.unwrap_or_else(|| {
                        let id = CategoryId(categories.len());
                        categories.push(new_category(cat_ref));
                        taxonomies[tax].categories.push(id);
                        id
                    });
                    let members = &mut categories[cat.0].features;
                    if !feature.is_base() && !members.contains(&idx) {
                        members.push(idx);
                    }
                }
            }
        }

        // Vec::sort_by_key is stable, so equal positions keep first-seen order.
        taxonomies.sort_by_key(|t| t.pos);
        for tax in &mut taxonomies {
            tax.categories.sort_by_key(|id| categories[id.0].pos);
        }
        for cat in &mut categories {
            sort_by_display_name(&mut cat.features, store.features());
        }

        if self.all_features_taxonomy && taxonomies.len() > 1 {
            let pos = taxonomies
                .iter()
                .map(|t| t.pos)
                .max()
                .unwrap_or(0)
                .saturating_add(1);
            let shared = taxonomies
                .iter()
                .flat_map(|t| t.categories.iter().copied())
                .collect();
            taxonomies.push(Taxonomy {
                id: ALL_TAXONOMIES_ID.to_string(),
                name: ALL_TAXONOMIES_NAME.to_string(),
                pos,
                categories: shared,
            });
            debug!(pos, "synthesised combined taxonomy");
        }

        info!(
            taxonomies = taxonomies.len(),
            categories = categories.len(),
            "taxonomies built"
        );
        TaxonomySet::from_parts(taxonomies, categories)
    }
}

fn new_category(cat_ref: &CategoryRef) -> Category {
    Category {
        id: cat_ref.id.clone(),
        name: cat_ref.name.clone(),
        desc: cat_ref.desc.clone(),
        pos: cat_ref.pos,
        icon: cat_ref.icon.clone(),
        icon_dim: cat_ref.icon_dim,
        features: Vec::new(),
    }
}

/// Case-insensitive ordering by navigation label, ties by load order.
fn sort_by_display_name(members: &mut [usize], features: &[Feature]) {
    members.sort_by_cached_key(|&i| {
        features
            .get(i)
            .map(|f| f.label().to_lowercase())
            .unwrap_or_default()
    });
}

/// Build taxonomies for `store`, failing when there is no store at all.
pub fn try_read_taxonomies(
    store: Option<&FeatureStore>,
    all_features_taxonomy: bool,
) -> Result<TaxonomySet, TaxonomyError> {
    let store = store.ok_or(TaxonomyError::NoFeatures)?;
    Ok(TaxonomyBuilder::new(all_features_taxonomy).build(store))
}

/// Build taxonomies for `store`.
///
/// A missing store is logged and yields an empty set; callers treat an
/// empty result as missing data.
pub fn read_taxonomies(store: Option<&FeatureStore>, all_features_taxonomy: bool) -> TaxonomySet {
    try_read_taxonomies(store, all_features_taxonomy).unwrap_or_else(|e| {
        error!(error = %e, "cannot read taxonomies");
        TaxonomySet::default()
    })
}
