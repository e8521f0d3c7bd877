//! Timeline points from the base feature's raw window list.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use holmap_core::errors::TimelineError;
use holmap_core::models::TimelinePoint;
use holmap_core::time::parse_iso_millis;
use holmap_store::FeatureStore;

/// Build every well-formed point, skipping (and logging) the rest.
pub fn build_points(raw: &[Value], store: &FeatureStore) -> Vec<TimelinePoint> {
    let points: Vec<TimelinePoint> = raw
        .iter()
        .enumerate()
        .filter_map(|(position, value)| match parse_point(position, value, store) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(error = %e, "skipping timeline point");
                None
            }
        })
        .collect();
    debug!(points = points.len(), "timeline built");
    points
}

/// Read one window: `{ "tp": "from/to/label", "featIds": [...] }`, or a
/// bare `"from/to/label"` string with no features.
///
/// Feature ids the store does not know are kept in `feat_ids` but have no
/// entry in `feat_nums`.
pub fn parse_point(
    position: usize,
    value: &Value,
    store: &FeatureStore,
) -> Result<TimelinePoint, TimelineError> {
    let malformed = |reason: &str| TimelineError::MalformedPoint {
        position,
        reason: reason.to_string(),
    };

    let (tp, ids): (&str, Vec<String>) = match value {
        Value::String(tp) => (tp.as_str(), Vec::new()),
        Value::Object(obj) => {
            let tp = obj
                .get("tp")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("missing tp"))?;
            let ids = obj
                .get("featIds")
                .and_then(Value::as_array)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| match id {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect()
                })
                .unwrap_or_default();
            (tp, ids)
        }
        _ => return Err(malformed("not a string or object")),
    };

    let mut parts = tp.splitn(3, '/');
    let (Some(start), Some(end), Some(label)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed("expected from/to/label"));
    };

    let mut feat_nums = BTreeSet::new();
    for id in &ids {
        match store.index_of(id) {
            Some(idx) => {
                feat_nums.insert(idx);
            }
            None => debug!(position, id = id.as_str(), "timeline references unknown feature"),
        }
    }

    Ok(TimelinePoint {
        start: start.to_string(),
        end: end.to_string(),
        label: label.to_string(),
        ss_start: parse_iso_millis(start),
        ss_end: parse_iso_millis(end),
        feat_ids: ids.into_iter().collect(),
        feat_nums,
    })
}
