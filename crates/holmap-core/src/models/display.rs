//! Display-state enums shared by the controller, the navigation tree and
//! whatever presentation layer renders them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Progress flag of the display controller.
///
/// Not a lock: it lets checkbox change handlers tell user-driven events
/// from the controller's own programmatic checkbox mutations, which fire
/// nested change notifications while an outer operation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    #[default]
    Idle,
    ShowhidingFeatures,
    HarmonizingFeatureCheckboxes,
    HarmonizingCategoryCheckboxes,
    ShowhidingCategory,
}

impl DisplayStatus {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::ShowhidingFeatures => "SHOWHIDING_FEATURES",
            Self::HarmonizingFeatureCheckboxes => "HARMONIZING_FEATURE_CHECKBOXES",
            Self::HarmonizingCategoryCheckboxes => "HARMONIZING_CATEGORY_CHECKBOXES",
            Self::ShowhidingCategory => "SHOWHIDING_CATEGORY",
        };
        f.write_str(name)
    }
}

/// Checkbox state including the indeterminate "some children checked" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl TriState {
    pub fn is_checked(self) -> bool {
        self == Self::Checked
    }

    pub fn is_indeterminate(self) -> bool {
        self == Self::Indeterminate
    }
}

impl From<bool> for TriState {
    fn from(checked: bool) -> Self {
        if checked {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

/// A programmatic checkbox mutation, delivered synchronously to the
/// navigation observer the way a DOM "change" event would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckboxChange {
    Feature {
        category: usize,
        feature: usize,
        checked: bool,
    },
    Category {
        category: usize,
        state: TriState,
    },
    All {
        state: TriState,
    },
}
