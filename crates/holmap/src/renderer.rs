//! A renderer that reports to the log instead of drawing.

use tracing::debug;

use holmap_core::models::FeatureStyle;
use holmap_core::traits::MapRenderer;

/// Logs every style change and view fit at `debug` level. Used by the
/// command-line driver, where there is no map to draw on.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl MapRenderer for TracingRenderer {
    fn set_style(&mut self, feature: usize, style: &FeatureStyle) {
        match style {
            FeatureStyle::Hidden => debug!(feature, "hide"),
            FeatureStyle::Category { category, color, .. } => {
                debug!(feature, category, color = %color, "show")
            }
            FeatureStyle::Selected { category, .. } => debug!(feature, category, "highlight"),
        }
    }

    fn fit_features(&mut self, features: &[usize]) {
        debug!(count = features.len(), ?features, "fit view");
    }
}
