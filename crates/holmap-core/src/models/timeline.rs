//! Timeline windows and the transitions between them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One window on the timeline slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub start: String,
    pub end: String,
    pub label: String,
    pub ss_start: Option<i64>,
    pub ss_end: Option<i64>,
    pub feat_ids: BTreeSet<String>,
    pub feat_nums: BTreeSet<usize>,
}

/// Set algebra between the previously visible window and the target window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TimelineTransition {
    /// Visible before, absent from the target.
    pub hidden: BTreeSet<usize>,
    /// Visible before and in the target; re-asserted, never toggled.
    pub kept: BTreeSet<usize>,
    /// New arrivals, shown with emphasis.
    pub shown: BTreeSet<usize>,
}

impl TimelineTransition {
    /// Compute `previous - target`, `previous ∩ target` and `target - previous`.
    pub fn between(previous: &BTreeSet<usize>, target: &BTreeSet<usize>) -> Self {
        Self {
            hidden: previous.difference(target).copied().collect(),
            kept: previous.intersection(target).copied().collect(),
            shown: target.difference(previous).copied().collect(),
        }
    }

    /// Features visible after the transition.
    pub fn visible(&self) -> Vec<usize> {
        self.kept.union(&self.shown).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.kept.is_empty() && self.shown.is_empty()
    }
}

/// Notification sent to timeline listeners after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    pub index: usize,
    pub point: TimelinePoint,
    pub playing: bool,
}
