use serde::Serialize;
use tracing::debug;

use holmap_core::errors::TaxonomyError;
use holmap_core::ids::{id_from_name, make_unique};
use holmap_core::models::{
    Category, CategoryId, CategoryRef, Taxonomy, TaxonomyRef, ALL_TAXONOMIES_ID,
};

/// Taxonomies plus the arena holding every category they reference.
///
/// Category positions used by the display layer are positions inside a
/// taxonomy's `categories` list, not arena ids.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaxonomySet {
    taxonomies: Vec<Taxonomy>,
    categories: Vec<Category>,
}

impl TaxonomySet {
    pub(crate) fn from_parts(taxonomies: Vec<Taxonomy>, categories: Vec<Category>) -> Self {
        Self {
            taxonomies,
            categories,
        }
    }

    pub fn len(&self) -> usize {
        self.taxonomies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxonomies.is_empty()
    }

    pub fn taxonomies(&self) -> &[Taxonomy] {
        &self.taxonomies
    }

    pub fn taxonomy(&self, index: usize) -> Option<&Taxonomy> {
        self.taxonomies.get(index)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.0)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Arena id of the category at `position` inside taxonomy `tax`.
    pub fn category_id_at(&self, tax: usize, position: usize) -> Option<CategoryId> {
        self.taxonomies.get(tax)?.categories.get(position).copied()
    }

    pub fn category_at(&self, tax: usize, position: usize) -> Option<&Category> {
        self.category(self.category_id_at(tax, position)?)
    }

    /// Categories of taxonomy `tax` in display order.
    pub fn categories_of(&self, tax: usize) -> impl Iterator<Item = &Category> + '_ {
        self.taxonomies
            .get(tax)
            .map(|t| t.categories.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.categories.get(id.0))
    }

    /// Index of the synthetic "All" taxonomy, if one was built.
    pub fn all_taxonomy_index(&self) -> Option<usize> {
        self.taxonomies.iter().position(|t| t.id == ALL_TAXONOMIES_ID)
    }

    pub fn taxonomy_index_by_id(&self, id: &str) -> Option<usize> {
        self.taxonomies.iter().position(|t| t.id == id)
    }

    /// Position of the category with `id` inside taxonomy `tax`.
    pub fn category_index_by_id(&self, tax: usize, id: &str) -> Option<usize> {
        self.categories_of(tax).position(|c| c.id == id)
    }

    pub fn has_category(&self, tax: usize, id: &str) -> bool {
        self.category_index_by_id(tax, id).is_some()
    }

    pub fn has_feature(&self, tax: usize, feature: usize) -> bool {
        self.first_category_of(tax, feature).is_some()
    }

    /// Position of the first category in taxonomy `tax` listing `feature`.
    /// Ties are broken by category order, never by feature order.
    pub fn first_category_of(&self, tax: usize, feature: usize) -> Option<usize> {
        self.categories_of(tax).position(|c| c.contains(feature))
    }

    /// Every feature in taxonomy `tax`, each listed once, in category order.
    pub fn features_of(&self, tax: usize) -> Vec<usize> {
        let mut seen = Vec::new();
        for cat in self.categories_of(tax) {
            for &f in &cat.features {
                if !seen.contains(&f) {
                    seen.push(f);
                }
            }
        }
        seen
    }

    /// Membership-record form of the built taxonomies, without feature
    /// lists and without the synthetic "All" taxonomy.
    pub fn to_refs(&self) -> Vec<TaxonomyRef> {
        self.taxonomies
            .iter()
            .filter(|t| t.id != ALL_TAXONOMIES_ID)
            .map(|t| TaxonomyRef {
                id: t.id.clone(),
                name: t.name.clone(),
                pos: t.pos,
                categories: t
                    .categories
                    .iter()
                    .filter_map(|&id| self.category(id))
                    .map(|c| CategoryRef {
                        id: c.id.clone(),
                        name: c.name.clone(),
                        desc: c.desc.clone(),
                        pos: c.pos,
                        icon: c.icon.clone(),
                        icon_dim: c.icon_dim,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Add an empty user-defined taxonomy. Returns its index.
    pub fn add_taxonomy(&mut self, name: &str) -> Result<usize, TaxonomyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaxonomyError::EmptyName);
        }
        let id = make_unique(id_from_name(name), |candidate| {
            candidate.is_empty() || self.taxonomies.iter().any(|t| t.id == candidate)
        });
        let pos = self
            .taxonomies
            .iter()
            .map(|t| t.pos)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.taxonomies.push(Taxonomy {
            id,
            name: name.to_string(),
            pos,
            categories: Vec::new(),
        });
        debug!(taxonomy = name, "taxonomy added");
        Ok(self.taxonomies.len() - 1)
    }

    /// Add an empty category to taxonomy `tax`. The category is also
    /// listed by the "All" taxonomy when one exists. Returns its position
    /// inside `tax`.
    pub fn add_category(
        &mut self,
        tax: usize,
        name: &str,
        desc: &str,
    ) -> Result<usize, TaxonomyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaxonomyError::EmptyName);
        }
        if tax >= self.taxonomies.len() {
            return Err(TaxonomyError::UnknownTaxonomy { index: tax });
        }
        let id = make_unique(id_from_name(name), |candidate| {
            candidate.is_empty() || self.has_category(tax, candidate)
        });
        self.insert_category(tax, id, name, desc)
    }

    /// Add a category with a fixed id (e.g. the drawn-features category).
    pub fn insert_category(
        &mut self,
        tax: usize,
        id: String,
        name: &str,
        desc: &str,
    ) -> Result<usize, TaxonomyError> {
        let pos = self
            .categories_of(tax)
            .map(|c| c.pos)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let cat_id = CategoryId(self.categories.len());
        self.categories.push(Category {
            id,
            name: name.to_string(),
            desc: desc.to_string(),
            pos,
            icon: None,
            icon_dim: None,
            features: Vec::new(),
        });
        let all = self.all_taxonomy_index().filter(|&all| all != tax);
        let taxonomy = self
            .taxonomies
            .get_mut(tax)
            .ok_or(TaxonomyError::UnknownTaxonomy { index: tax })?;
        taxonomy.categories.push(cat_id);
        let position = taxonomy.categories.len() - 1;
        if let Some(all) = all {
            self.taxonomies[all].categories.push(cat_id);
        }
        debug!(taxonomy = tax, category = name, "category added");
        Ok(position)
    }

    /// List `feature` in the category. Returns false if it already was.
    pub fn add_feature_to_category(&mut self, id: CategoryId, feature: usize) -> bool {
        match self.categories.get_mut(id.0) {
            Some(cat) if !cat.contains(feature) => {
                cat.features.push(feature);
                true
            }
            _ => false,
        }
    }
}
