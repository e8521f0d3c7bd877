//! Minimal geometry description: enough to tell points from shapes and to
//! compute extents for view fitting and hit selection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(Self::Point),
            "MultiPoint" => Some(Self::MultiPoint),
            "LineString" => Some(Self::LineString),
            "MultiLineString" => Some(Self::MultiLineString),
            "Polygon" => Some(Self::Polygon),
            "MultiPolygon" => Some(Self::MultiPolygon),
            "GeometryCollection" => Some(Self::GeometryCollection),
            _ => None,
        }
    }

    pub fn is_point(self) -> bool {
        self == Self::Point
    }

    /// Lines and points have no area, so a pixel hit on them always wins
    /// over an enclosing polygon.
    pub fn is_areal(self) -> bool {
        matches!(
            self,
            Self::Polygon | Self::MultiPolygon | Self::GeometryCollection
        )
    }
}

/// Axis-aligned bounding box `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }

    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub kind: GeometryKind,
    pub extent: Option<Extent>,
    /// The GeoJSON geometry object, passed through untouched to the renderer.
    pub raw: Value,
}

impl Geometry {
    /// Read a GeoJSON geometry object. Unknown types yield `None`.
    pub fn from_geojson(value: &Value) -> Option<Self> {
        let kind = GeometryKind::from_type_name(value.get("type")?.as_str()?)?;
        let extent = match kind {
            GeometryKind::GeometryCollection => value
                .get("geometries")
                .and_then(Value::as_array)
                .and_then(|parts| {
                    parts
                        .iter()
                        .filter_map(Geometry::from_geojson)
                        .filter_map(|g| g.extent)
                        .reduce(|a, b| a.union(&b))
                }),
            _ => value.get("coordinates").and_then(coordinate_extent),
        };
        Some(Self {
            kind,
            extent,
            raw: value.clone(),
        })
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self {
            kind: GeometryKind::Point,
            extent: Some(Extent::point(x, y)),
            raw: serde_json::json!({ "type": "Point", "coordinates": [x, y] }),
        }
    }
}

fn coordinate_extent(value: &Value) -> Option<Extent> {
    let items = value.as_array()?;
    if let (Some(x), Some(y)) = (
        items.first().and_then(Value::as_f64),
        items.get(1).and_then(Value::as_f64),
    ) {
        return Some(Extent::point(x, y));
    }
    items
        .iter()
        .filter_map(coordinate_extent)
        .reduce(|a, b| a.union(&b))
}
