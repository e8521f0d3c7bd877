/// Feature store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a GeoJSON FeatureCollection: {0}")]
    NotAFeatureCollection(String),

    #[error("duplicate feature id: {id}")]
    DuplicateId { id: String },
}
