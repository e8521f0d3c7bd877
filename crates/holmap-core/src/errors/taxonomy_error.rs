/// Taxonomy construction and editing errors.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("no feature collection to read taxonomies from")]
    NoFeatures,

    #[error("taxonomy name is empty")]
    EmptyName,

    #[error("taxonomy {index} does not exist")]
    UnknownTaxonomy { index: usize },
}
