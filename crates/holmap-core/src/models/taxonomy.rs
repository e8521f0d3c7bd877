//! Taxonomy and category records.
//!
//! Categories live in a single arena owned by the taxonomy set; a
//! taxonomy lists arena ids, so the synthetic "All" taxonomy shares the
//! very same category records as the taxonomies it unions.

use serde::{Deserialize, Serialize};

pub const ALL_TAXONOMIES_ID: &str = "holAllTaxonomies";
/// Alternative query-string spelling for the synthetic taxonomy.
pub const ALL_TAXONOMIES_ALIAS: &str = "holTaxonomyAll";
pub const ALL_TAXONOMIES_NAME: &str = "All";
pub const DRAWN_FEATURES_CATEGORY_ID: &str = "drawnFeatures";
pub const DRAWN_FEATURES_CATEGORY_NAME: &str = "Drawn features";

/// Index of a category in the category arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub pos: i64,
    pub icon: Option<String>,
    pub icon_dim: Option<[u32; 2]>,
    /// Indices into the feature store, ordered by display name.
    pub features: Vec<usize>,
}

impl Category {
    pub fn contains(&self, feature: usize) -> bool {
        self.features.contains(&feature)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub id: String,
    pub name: String,
    pub pos: i64,
    pub categories: Vec<CategoryId>,
}
