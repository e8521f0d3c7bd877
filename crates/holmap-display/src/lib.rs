//! # holmap-display
//!
//! Keeps the three views of "is this feature visible" consistent: the map
//! layer (through [`MapRenderer`]), the per-feature checkboxes and the
//! per-category checkboxes of the navigation tree.
//!
//! [`DisplayController`] owns the feature store, the taxonomy set and the
//! navigation tree for one map. Its [`DisplayStatus`] value suppresses
//! handlers while the controller mutates checkboxes itself.
//!
//! [`MapRenderer`]: holmap_core::traits::MapRenderer
//! [`DisplayStatus`]: holmap_core::models::DisplayStatus

pub mod controller;
pub mod harmonize;
pub mod nav;
pub mod observer;
pub mod search;
mod selection;
mod taxonomy_ops;

pub use controller::DisplayController;
pub use harmonize::{all_state, category_state, harmonize};
pub use nav::{NavCategory, NavEntry, NavTree};
pub use observer::NavObserver;
pub use search::SearchFilter;
