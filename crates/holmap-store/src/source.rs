//! Where a feature collection comes from.
//!
//! Loading is the one asynchronous step of a session: it resolves once
//! and everything downstream runs synchronously on the result.

use std::path::PathBuf;

use tracing::debug;

use holmap_core::HolMapResult;

use crate::store::FeatureStore;

#[allow(async_fn_in_trait)]
pub trait FeatureSource {
    /// Identifier used in MissingData errors and logs.
    fn source_id(&self) -> String;

    async fn load(&self) -> HolMapResult<FeatureStore>;
}

/// Reads a GeoJSON file from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeatureSource for FileSource {
    fn source_id(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> HolMapResult<FeatureStore> {
        debug!(path = %self.path.display(), "reading feature collection");
        let text = tokio::fs::read_to_string(&self.path).await?;
        FeatureStore::from_geojson_str(&text, &self.source_id())
    }
}

/// An in-memory document, for embedding hosts and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    id: String,
    json: String,
}

impl StaticSource {
    pub fn new(id: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            json: json.into(),
        }
    }
}

impl FeatureSource for StaticSource {
    fn source_id(&self) -> String {
        self.id.clone()
    }

    async fn load(&self) -> HolMapResult<FeatureStore> {
        FeatureStore::from_geojson_str(&self.json, &self.id)
    }
}
