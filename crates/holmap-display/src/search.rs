//! Substring filter over the navigation tree.
//!
//! Filtering only changes node visibility. Feature `showing` and
//! `selected` flags are never touched.

use tracing::debug;

use crate::nav::NavTree;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, label: &str) -> bool {
        label.to_lowercase().contains(&self.needle)
    }

    /// Filter `nav`, returning the number of matching entries. An empty
    /// query clears the filter instead.
    pub fn apply(&self, nav: &mut NavTree) -> usize {
        if self.is_empty() {
            Self::clear(nav);
            return 0;
        }
        nav.all_hidden = true;
        let mut total = 0;
        for cat in &mut nav.categories {
            let mut hits = 0;
            for entry in &mut cat.entries {
                entry.hidden = !self.matches(&entry.label);
                if !entry.hidden {
                    hits += 1;
                }
            }
            cat.hidden = hits == 0;
            cat.headless = hits > 0;
            total += hits;
        }
        debug!(query = self.needle.as_str(), hits = total, "navigation filtered");
        total
    }

    /// Restore every node to unfiltered visibility.
    pub fn clear(nav: &mut NavTree) {
        nav.all_hidden = false;
        for cat in &mut nav.categories {
            cat.hidden = false;
            cat.headless = false;
            cat.expanded = false;
            for entry in &mut cat.entries {
                entry.hidden = false;
            }
        }
    }
}
