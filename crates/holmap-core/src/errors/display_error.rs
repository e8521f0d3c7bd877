use crate::models::DisplayStatus;

/// Display-state subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("feature {index} out of range ({len} features loaded)")]
    FeatureOutOfRange { index: usize, len: usize },

    #[error("category {index} out of range in taxonomy {taxonomy}")]
    CategoryOutOfRange { index: usize, taxonomy: usize },

    #[error("feature {feature} is not part of the active taxonomy")]
    NotInActiveTaxonomy { feature: usize },

    #[error("no taxonomy is active")]
    NoActiveTaxonomy,

    #[error("display controller busy ({status})")]
    Busy { status: DisplayStatus },

    #[error("category {index} has no rendered navigation node")]
    CategoryNotRendered { index: usize },
}
