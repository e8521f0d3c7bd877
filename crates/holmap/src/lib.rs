//! # holmap
//!
//! Session facade for the holmap navigation engine. A [`HolMap`] owns one
//! generation of loaded data (feature store, taxonomies, navigation tree,
//! timeline) and drives it through the operations a map page needs:
//! startup query handling, taxonomy switching, search, selection, the
//! timeline and reloads.

pub mod renderer;
pub mod session;
pub mod startup;

pub use renderer::TracingRenderer;
pub use session::HolMap;
pub use startup::{resolve_taxonomy, StartupOutcome};

pub use holmap_core::{HolMapConfig, HolMapError, HolMapResult};
