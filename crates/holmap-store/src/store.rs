//! The canonical feature array.
//!
//! Categories, navigation entries and timeline points all refer to
//! features by their index here, so indices are stable for the lifetime
//! of a store. A reload builds a new store instead of mutating this one.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use holmap_core::errors::StoreError;
use holmap_core::ids::make_unique;
use holmap_core::models::{Feature, TaxonomyRef, BASE_FEATURE_ID};
use holmap_core::{HolMapError, HolMapResult};

use crate::parse::feature_from_geojson;

#[derive(Debug, Clone)]
pub struct FeatureStore {
    features: Vec<Feature>,
    index: HashMap<String, usize>,
    base: usize,
    base_synthesized: bool,
    source_id: String,
}

impl FeatureStore {
    /// Parse a GeoJSON FeatureCollection document.
    ///
    /// `source_id` names the document in errors and logs.
    pub fn from_geojson_str(json: &str, source_id: &str) -> HolMapResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, source_id)
    }

    pub fn from_value(value: &Value, source_id: &str) -> HolMapResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            StoreError::NotAFeatureCollection(format!("{source_id}: top level is not an object"))
        })?;
        if let Some(kind) = obj.get("type").and_then(Value::as_str) {
            if kind != "FeatureCollection" {
                return Err(StoreError::NotAFeatureCollection(format!(
                    "{source_id}: type is {kind}"
                ))
                .into());
            }
        }
        let raw = obj
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| HolMapError::missing_data("features", source_id))?;

        let mut store = Self::from_features(Vec::with_capacity(raw.len() + 1), source_id);
        for (n, item) in raw.iter().enumerate() {
            let feature = feature_from_geojson(item, format!("holFeat_{n}"));
            if let Err(e) = store.insert(feature) {
                warn!(source = source_id, position = n, error = %e, "skipping feature");
            }
        }
        store.ensure_base();
        info!(
            source = source_id,
            features = store.len(),
            "feature store loaded"
        );
        Ok(store)
    }

    /// Build a store from already-parsed features. Duplicate ids after the
    /// first are dropped.
    pub fn from_features(features: Vec<Feature>, source_id: &str) -> Self {
        let mut store = Self {
            features: Vec::with_capacity(features.len()),
            index: HashMap::new(),
            base: 0,
            base_synthesized: false,
            source_id: source_id.to_string(),
        };
        for feature in features {
            if let Err(e) = store.insert(feature) {
                warn!(source = source_id, error = %e, "skipping feature");
            }
        }
        store
    }

    fn insert(&mut self, mut feature: Feature) -> Result<usize, StoreError> {
        if self.index.contains_key(&feature.id) {
            return Err(StoreError::DuplicateId { id: feature.id });
        }
        feature.reset_display();
        let idx = self.features.len();
        self.index.insert(feature.id.clone(), idx);
        self.features.push(feature);
        Ok(idx)
    }

    /// Make sure the `holMap` carrier feature exists. A synthesised base
    /// feature is placed at index 0, shifting the others by one.
    fn ensure_base(&mut self) {
        if let Some(&idx) = self.index.get(BASE_FEATURE_ID) {
            self.base = idx;
            self.features[idx].show_on_menu = false;
            return;
        }
        debug!(source = self.source_id.as_str(), "synthesising base feature");
        let mut base = Feature::new(BASE_FEATURE_ID, "");
        base.show_on_menu = false;
        self.features.insert(0, base);
        self.reindex();
        self.base = 0;
        self.base_synthesized = true;
    }

    fn reindex(&mut self) {
        self.index = self
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Feature> {
        self.features.get_mut(index)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Feature)> {
        self.features.iter().enumerate()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn base_index(&self) -> usize {
        self.base
    }

    pub fn base(&self) -> Option<&Feature> {
        self.features.get(self.base)
    }

    /// Whether the base feature was created at load time rather than read
    /// from the document.
    pub fn base_is_synthesized(&self) -> bool {
        self.base_synthesized
    }

    /// Record the built taxonomy definitions on a synthesized base
    /// feature, so it carries the same map-wide metadata a stored one
    /// would. A base read from the document is left untouched.
    pub fn fill_base_taxonomies(&mut self, taxonomies: Vec<TaxonomyRef>) -> bool {
        if !self.base_synthesized {
            return false;
        }
        match self.features.get_mut(self.base) {
            Some(base) => {
                base.taxonomies = taxonomies;
                true
            }
            None => false,
        }
    }

    fn base_properties(&self) -> Option<&Map<String, Value>> {
        self.base().map(|b| &b.properties)
    }

    pub fn map_title(&self) -> Option<&str> {
        self.base_properties()?
            .get("mapTitle")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }

    /// The base feature's raw timeline window list, if it has one.
    pub fn raw_timeline(&self) -> Option<&[Value]> {
        self.base_properties()?
            .get("timeline")?
            .get("richTimelinePoints")?
            .as_array()
            .map(Vec::as_slice)
    }

    /// Append a feature created after load (e.g. a drawn shape). Its id is
    /// made unique by appending `x` until it no longer collides.
    pub fn push(&mut self, mut feature: Feature) -> usize {
        let candidate = if feature.id.is_empty() {
            format!("holFeat_{}", self.features.len())
        } else {
            std::mem::take(&mut feature.id)
        };
        feature.id = make_unique(candidate, |id| self.index.contains_key(id));
        feature.reset_display();
        let idx = self.features.len();
        self.index.insert(feature.id.clone(), idx);
        self.features.push(feature);
        idx
    }
}
