//! Fixtures shared by the integration tests of every holmap crate.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value};

use holmap_core::models::FeatureStyle;
use holmap_core::traits::MapRenderer;

// ---------------------------------------------------------------------------
// GeoJSON builders
// ---------------------------------------------------------------------------

/// A point feature belonging to the given `(taxonomy, category)` pairs.
/// Taxonomy and category ids are derived from their names in lowercase.
pub fn point_feature(id: &str, name: &str, memberships: &[(&str, &str)]) -> Value {
    feature_with_geometry(
        id,
        name,
        memberships,
        json!({ "type": "Point", "coordinates": [-123.36, 48.42] }),
    )
}

/// A polygon feature, for fit-view and hit-selection tests.
pub fn polygon_feature(id: &str, name: &str, memberships: &[(&str, &str)], size: f64) -> Value {
    feature_with_geometry(
        id,
        name,
        memberships,
        json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [size, 0.0], [size, size], [0.0, size], [0.0, 0.0]]]
        }),
    )
}

pub fn feature_with_geometry(
    id: &str,
    name: &str,
    memberships: &[(&str, &str)],
    geometry: Value,
) -> Value {
    let mut taxonomies: Vec<Value> = Vec::new();
    for (tax, cat) in memberships {
        let category = json!({ "id": cat.to_lowercase(), "name": cat, "desc": "", "pos": 0 });
        let existing = taxonomies
            .iter_mut()
            .find(|t| t["name"] == json!(tax));
        match existing {
            Some(entry) => {
                if let Some(cats) = entry["categories"].as_array_mut() {
                    cats.push(category);
                }
            }
            None => taxonomies.push(json!({
                "id": tax.to_lowercase(),
                "name": tax,
                "pos": 0,
                "categories": [category],
            })),
        }
    }
    json!({
        "type": "Feature",
        "id": id,
        "geometry": geometry,
        "properties": {
            "name": name,
            "desc": format!("<p>{name}</p>"),
            "links": [format!("{id}.html")],
            "taxonomies": taxonomies,
        }
    })
}

pub fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// A `holMap` base feature carrying a title and a timeline.
pub fn base_feature(title: &str, timeline: Value) -> Value {
    json!({
        "type": "Feature",
        "id": "holMap",
        "geometry": null,
        "properties": {
            "mapTitle": title,
            "showOnMenu": false,
            "timeline": { "richTimelinePoints": timeline },
        }
    })
}

/// Three parks and two museums in one "Type" taxonomy.
pub fn parks_and_museums() -> Value {
    collection(vec![
        point_feature("beacon", "Beacon Hill", &[("Type", "Park")]),
        point_feature("ross", "Ross Bay", &[("Type", "Park")]),
        point_feature("abkhazi", "Abkhazi Garden", &[("Type", "Park")]),
        point_feature("royal", "Royal BC Museum", &[("Type", "Museum")]),
        point_feature("maritime", "Maritime Museum", &[("Type", "Museum")]),
    ])
}

/// Two taxonomies, "Type" (3 categories) and "Era" (2 categories), with a
/// two-window timeline on the base feature.
pub fn city_with_timeline() -> Value {
    collection(vec![
        base_feature(
            "Old Town",
            json!([
                { "tp": "1850/1899/Colonial", "featIds": ["fort", "church"] },
                { "tp": "1900/1950/Modern", "featIds": ["church", "hall"] },
                { "tp": "1951/2000/Late", "featIds": ["hall", "market", "fort"] },
            ]),
        ),
        point_feature("fort", "Fort Victoria", &[("Type", "Military"), ("Era", "Colonial")]),
        point_feature("church", "Christ Church", &[("Type", "Religious"), ("Era", "Colonial")]),
        polygon_feature("hall", "City Hall", &[("Type", "Civic"), ("Era", "Modern")], 2.0),
        point_feature("market", "Market Square", &[("Type", "Civic"), ("Era", "Modern")]),
    ])
}

// ---------------------------------------------------------------------------
// Recording renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Style { feature: usize, style: FeatureStyle },
    Fit { features: Vec<usize> },
}

/// A renderer that records every call. Clones share the same log, so a
/// test keeps one clone while the controller owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Rc<RefCell<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Every style applied to `feature`, oldest first.
    pub fn styles_of(&self, feature: usize) -> Vec<FeatureStyle> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RenderCall::Style { feature: f, style } if *f == feature => Some(style.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_style(&self, feature: usize) -> Option<FeatureStyle> {
        self.styles_of(feature).pop()
    }

    pub fn fits(&self) -> Vec<Vec<usize>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RenderCall::Fit { features } => Some(features.clone()),
                _ => None,
            })
            .collect()
    }
}

impl MapRenderer for RecordingRenderer {
    fn set_style(&mut self, feature: usize, style: &FeatureStyle) {
        self.calls.borrow_mut().push(RenderCall::Style {
            feature,
            style: style.clone(),
        });
    }

    fn fit_features(&mut self, features: &[usize]) {
        self.calls.borrow_mut().push(RenderCall::Fit {
            features: features.to_vec(),
        });
    }
}
