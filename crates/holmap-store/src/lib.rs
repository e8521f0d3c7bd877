//! # holmap-store
//!
//! The flat feature collection every other subsystem indexes into.
//! Parses GeoJSON FeatureCollections, guarantees the `holMap` base
//! feature exists, and answers id/index lookups.

pub mod parse;
pub mod source;
pub mod store;

pub use source::{FeatureSource, FileSource, StaticSource};
pub use store::FeatureStore;
