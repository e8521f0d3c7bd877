//! Vector layer behaviour switches.

use serde::{Deserialize, Serialize};

/// Options controlling how the feature layer and its taxonomies behave.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayerConfig {
    /// Synthesize an extra "All" taxonomy when more than one exists.
    pub all_features_taxonomy: bool,
    pub allow_drawing: bool,
    pub allow_upload: bool,
    pub allow_taxonomy_editing: bool,
    /// Taxonomy id (or index) to display first. Takes precedence over the
    /// `taxonomy` query parameter when non-empty.
    pub initial_taxonomy_id: String,
    /// Prefixed to every document link before it is handed to the host.
    pub link_prefix: String,
    /// Document shown at startup when the query string names none.
    pub startup_doc: String,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            all_features_taxonomy: false,
            allow_drawing: false,
            allow_upload: false,
            allow_taxonomy_editing: false,
            initial_taxonomy_id: String::new(),
            link_prefix: String::new(),
            startup_doc: String::new(),
        }
    }
}
