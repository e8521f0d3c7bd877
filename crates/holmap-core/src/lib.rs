//! # holmap-core
//!
//! Foundation crate for the holmap navigation engine.
//! Defines the feature/taxonomy/timeline models, configuration, errors,
//! the traits implemented by external collaborators (map renderer,
//! playback scheduler) and small shared helpers.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod ids;
pub mod models;
pub mod observability;
pub mod time;
pub mod traits;

pub use config::HolMapConfig;
pub use errors::{HolMapError, HolMapResult};
