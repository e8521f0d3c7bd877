//! Map features and the taxonomy-membership records they carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::geometry::Geometry;

/// Id of the carrier feature holding map-wide metadata.
pub const BASE_FEATURE_ID: &str = "holMap";

/// Label used in navigation for features without a name.
pub const UNNAMED_FEATURE: &str = "unnamed feature";

/// A category as referenced from inside a feature's `taxonomies` property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub pos: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "iconDim")]
    pub icon_dim: Option<[u32; 2]>,
}

/// A taxonomy-membership record: the feature belongs to each listed category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaxonomyRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pos: i64,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

/// One `{from, to}` entry of a feature's `dateTimes`, with pre-parsed
/// epoch-millisecond bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
    pub ss_from: Option<i64>,
    pub ss_to: Option<i64>,
}

/// An identified geometry plus the properties the engine consumes.
///
/// `showing`, `showing_cat` and `selected` are display state. Only the
/// display controller, which owns the store exclusively, calls the
/// mutators.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub links: Vec<String>,
    pub taxonomies: Vec<TaxonomyRef>,
    pub date_times: Vec<DateRange>,
    pub show_on_menu: bool,
    pub geometry: Option<Geometry>,
    /// Remaining raw properties (e.g. `mapTitle`, `timeline` on the base feature).
    pub properties: Map<String, Value>,
    showing: bool,
    showing_cat: Option<usize>,
    selected: bool,
}

impl Feature {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            links: Vec::new(),
            taxonomies: Vec::new(),
            date_times: Vec::new(),
            show_on_menu: true,
            geometry: None,
            properties: Map::new(),
            showing: false,
            showing_cat: None,
            selected: false,
        }
    }

    pub fn is_base(&self) -> bool {
        self.id == BASE_FEATURE_ID
    }

    /// Name shown in navigation.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_FEATURE
        } else {
            &self.name
        }
    }

    pub fn showing(&self) -> bool {
        self.showing
    }

    /// Position (in the active taxonomy) of the category whose style is
    /// applied, if the feature is showing.
    pub fn showing_cat(&self) -> Option<usize> {
        self.showing_cat
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn mark_shown(&mut self, category: usize) {
        self.showing = true;
        self.showing_cat = Some(category);
    }

    pub fn mark_hidden(&mut self) {
        self.showing = false;
        self.showing_cat = None;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Clear all display state, as a fresh load does.
    pub fn reset_display(&mut self) {
        self.showing = false;
        self.showing_cat = None;
        self.selected = false;
    }

    pub fn is_point(&self) -> bool {
        self.geometry.as_ref().is_some_and(|g| g.kind.is_point())
    }
}

/// Content for the host's info panel about the selected feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureInfo {
    pub feature: usize,
    pub title: String,
    pub desc: String,
    /// Document links with the configured link prefix applied.
    pub links: Vec<String>,
}
