mod display_error;
mod holmap_error;
mod store_error;
mod taxonomy_error;
mod timeline_error;

pub use display_error::DisplayError;
pub use holmap_error::{HolMapError, HolMapResult};
pub use store_error::StoreError;
pub use taxonomy_error::TaxonomyError;
pub use timeline_error::TimelineError;
