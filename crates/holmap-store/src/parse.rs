//! Lenient GeoJSON feature parsing.
//!
//! A single malformed property must never abort a whole load: bad
//! values are logged and replaced by empty defaults.

use serde_json::{Map, Value};
use tracing::warn;

use holmap_core::models::{CategoryRef, DateRange, Feature, Geometry, TaxonomyRef};
use holmap_core::time::parse_iso_millis;

/// Properties consumed into typed fields; everything else stays in
/// `Feature::properties`.
const CONSUMED: [&str; 7] = [
    "name",
    "desc",
    "links",
    "taxonomies",
    "dateTimes",
    "showOnMenu",
    "id",
];

/// Build a [`Feature`] from one GeoJSON feature object.
///
/// `fallback_id` is used when the feature carries no usable id.
pub fn feature_from_geojson(value: &Value, fallback_id: String) -> Feature {
    let empty = Map::new();
    let props = value
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let id = value
        .get("id")
        .or_else(|| props.get("id"))
        .and_then(id_string)
        .unwrap_or(fallback_id);

    let mut feature = Feature::new(id, str_prop(props, "name"));
    feature.desc = str_prop(props, "desc");
    feature.links = props
        .get("links")
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    feature.taxonomies = props
        .get("taxonomies")
        .map(|t| parse_taxonomies(&feature.id, t))
        .unwrap_or_default();
    feature.date_times = props
        .get("dateTimes")
        .map(|d| parse_date_times(&feature.id, d))
        .unwrap_or_default();
    feature.show_on_menu = props
        .get("showOnMenu")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    feature.geometry = value.get("geometry").and_then(Geometry::from_geojson);
    feature.properties = props
        .iter()
        .filter(|(k, _)| !CONSUMED.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    feature
}

/// Read a feature's `taxonomies` property.
///
/// A non-array value means "belongs to no taxonomy". An entry whose
/// `categories` is missing or not an array still names its taxonomy but
/// contributes no categories.
pub fn parse_taxonomies(feature_id: &str, value: &Value) -> Vec<TaxonomyRef> {
    let Some(entries) = value.as_array() else {
        warn!(feature = feature_id, "taxonomies property is not an array; ignoring");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let Some(obj) = entry.as_object() else {
                warn!(feature = feature_id, "taxonomy entry is not an object; skipping");
                return None;
            };
            let categories = match obj.get("categories").and_then(Value::as_array) {
                Some(cats) => cats.iter().filter_map(parse_category).collect(),
                None => {
                    warn!(
                        feature = feature_id,
                        taxonomy = str_field(obj, "name").as_str(),
                        "taxonomy entry has no categories array"
                    );
                    Vec::new()
                }
            };
            Some(TaxonomyRef {
                id: str_field(obj, "id"),
                name: str_field(obj, "name"),
                pos: pos_field(obj),
                categories,
            })
        })
        .collect()
}

fn parse_category(value: &Value) -> Option<CategoryRef> {
    let obj = value.as_object()?;
    let icon_dim = obj.get("iconDim").and_then(Value::as_array).and_then(|dim| {
        let w = dim.first()?.as_u64()?;
        let h = dim.get(1)?.as_u64()?;
        Some([u32::try_from(w).ok()?, u32::try_from(h).ok()?])
    });
    Some(CategoryRef {
        id: str_field(obj, "id"),
        name: str_field(obj, "name"),
        desc: str_field(obj, "desc"),
        pos: pos_field(obj),
        icon: obj
            .get("icon")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        icon_dim,
    })
}

fn parse_date_times(feature_id: &str, value: &Value) -> Vec<DateRange> {
    let Some(entries) = value.as_array() else {
        warn!(feature = feature_id, "dateTimes property is not an array; ignoring");
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            let from = obj.get("from").and_then(Value::as_str).map(str::to_string);
            let to = obj.get("to").and_then(Value::as_str).map(str::to_string);
            DateRange {
                ss_from: from.as_deref().and_then(parse_iso_millis),
                ss_to: to.as_deref().and_then(parse_iso_millis),
                from,
                to,
            }
        })
        .collect()
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn str_prop(props: &Map<String, Value>, key: &str) -> String {
    str_field(props, key)
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// `pos` arrives as a number or a numeric string; anything else sorts as 0.
fn pos_field(obj: &Map<String, Value>) -> i64 {
    match obj.get("pos") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
