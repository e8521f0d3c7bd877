//! Style descriptors handed to the map renderer.

use serde::Serialize;

/// Ten maximally distinct colours, assigned to categories by position.
pub const TEN_COLORS: [&str; 10] = [
    "rgb(85, 0, 0)",
    "rgb(0, 85, 0)",
    "rgb(0, 0, 85)",
    "rgb(85, 85, 0)",
    "rgb(85, 0, 85)",
    "rgb(0, 85, 85)",
    "rgb(150, 0, 0)",
    "rgb(0, 130, 0)",
    "rgb(0, 0, 150)",
    "rgb(0, 0, 0)",
];

pub fn color_for_category(category: usize) -> &'static str {
    TEN_COLORS[category % TEN_COLORS.len()]
}

/// The category colour as `rgba(...)` with the given alpha.
pub fn color_with_alpha(category: usize, alpha: f32) -> String {
    let rgb = color_for_category(category)
        .trim_start_matches("rgb(")
        .trim_end_matches(')');
    format!("rgba({rgb}, {alpha})")
}

/// What the renderer should draw for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FeatureStyle {
    /// Present on the layer but invisible.
    Hidden,
    /// Normal visible style keyed to a category of the active taxonomy.
    Category {
        category: usize,
        color: &'static str,
        icon: Option<String>,
        icon_dim: Option<[u32; 2]>,
    },
    /// Emphasised style used for the selection and for timeline arrivals.
    Selected {
        category: usize,
        icon: Option<String>,
        icon_dim: Option<[u32; 2]>,
    },
}

impl FeatureStyle {
    pub fn category(category: usize, icon: Option<String>, icon_dim: Option<[u32; 2]>) -> Self {
        Self::Category {
            category,
            color: color_for_category(category),
            icon,
            icon_dim,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}
