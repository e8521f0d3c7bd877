mod display;
mod feature;
mod geometry;
mod query;
mod style;
mod taxonomy;
mod timeline;

pub use display::{CheckboxChange, DisplayStatus, TriState};
pub use feature::{
    CategoryRef, DateRange, Feature, FeatureInfo, TaxonomyRef, BASE_FEATURE_ID, UNNAMED_FEATURE,
};
pub use geometry::{Extent, Geometry, GeometryKind};
pub use query::StartupQuery;
pub use style::{color_for_category, color_with_alpha, FeatureStyle, TEN_COLORS};
pub use taxonomy::{
    Category, CategoryId, Taxonomy, ALL_TAXONOMIES_ALIAS, ALL_TAXONOMIES_ID,
    ALL_TAXONOMIES_NAME, DRAWN_FEATURES_CATEGORY_ID, DRAWN_FEATURES_CATEGORY_NAME,
};
pub use timeline::{TimelineEvent, TimelinePoint, TimelineTransition};
