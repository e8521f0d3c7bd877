//! The map-rendering collaborator.

use crate::models::FeatureStyle;

/// External map library seam. The engine never draws; it tells the
/// renderer which style each feature should carry and which features
/// the view should frame.
///
/// Everything runs on the host's single UI thread, so implementations
/// need not be `Send`.
pub trait MapRenderer {
    /// Apply `style` to the feature at store index `feature`.
    fn set_style(&mut self, feature: usize, style: &FeatureStyle);

    /// Fit the view around the given features.
    fn fit_features(&mut self, features: &[usize]);
}

/// Renderer for headless use: accepts and discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl MapRenderer for NullRenderer {
    fn set_style(&mut self, _feature: usize, _style: &FeatureStyle) {}

    fn fit_features(&mut self, _features: &[usize]) {}
}
