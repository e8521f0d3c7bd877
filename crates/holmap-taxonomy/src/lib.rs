//! # holmap-taxonomy
//!
//! Rebuilds the taxonomy → category → feature hierarchy from the flat
//! `taxonomies` metadata carried by each feature.
//!
//! Categories live in a single arena ([`TaxonomySet`]); taxonomies hold
//! [`CategoryId`]s into it, so the synthetic "All" taxonomy shares its
//! categories with the taxonomies they came from.
//!
//! [`CategoryId`]: holmap_core::models::CategoryId

pub mod builder;
pub mod set;

pub use builder::{read_taxonomies, try_read_taxonomies, TaxonomyBuilder};
pub use set::TaxonomySet;
