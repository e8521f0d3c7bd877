use super::{DisplayError, StoreError, TaxonomyError, TimelineError};

/// Top-level error type for the holmap engine.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum HolMapError {
    /// The only user-facing error kind: a dataset the map cannot work
    /// without is absent from the loaded source.
    #[error("{dataset} not found in the JSON file {source_id}")]
    MissingData { dataset: String, source_id: String },

    #[error("display error: {0}")]
    Display(#[from] DisplayError),

    #[error("timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("feature store error: {0}")]
    Store(#[from] StoreError),

    #[error("taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HolMapError {
    /// Convenience constructor for [`HolMapError::MissingData`].
    pub fn missing_data(dataset: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self::MissingData {
            dataset: dataset.into(),
            source_id: source_id.into(),
        }
    }

    /// Whether this error should be surfaced to the end user rather than
    /// only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::MissingData { .. })
    }
}

/// Convenience type alias.
pub type HolMapResult<T> = Result<T, HolMapError>;
