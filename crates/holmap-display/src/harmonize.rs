//! Tri-state checkbox reduction.
//!
//! Pure functions from per-feature check states to per-category and
//! top-level tri-states. The navigation tree feeds them on every
//! feature-level change and renders the result.

use holmap_core::models::TriState;

/// State of a category checkbox given its feature checkboxes.
pub fn category_state(checks: &[bool]) -> TriState {
    let checked = checks.iter().filter(|&&c| c).count();
    match checked {
        0 => TriState::Unchecked,
        n if n == checks.len() => TriState::Checked,
        _ => TriState::Indeterminate,
    }
}

/// State of the "all" checkbox given every rendered category checkbox.
///
/// Checked only when every category is checked. Indeterminate when any
/// category is indeterminate or when categories disagree.
pub fn all_state(categories: &[TriState]) -> TriState {
    if categories.is_empty() {
        return TriState::Unchecked;
    }
    if categories.iter().any(|s| s.is_indeterminate()) {
        return TriState::Indeterminate;
    }
    let checked = categories.iter().filter(|s| s.is_checked()).count();
    match checked {
        0 => TriState::Unchecked,
        n if n == categories.len() => TriState::Checked,
        _ => TriState::Indeterminate,
    }
}

/// Full pass over a tree of feature check states.
pub fn harmonize(categories: &[Vec<bool>]) -> (Vec<TriState>, TriState) {
    let states: Vec<TriState> = categories.iter().map(|c| category_state(c)).collect();
    let all = all_state(&states);
    (states, all)
}
