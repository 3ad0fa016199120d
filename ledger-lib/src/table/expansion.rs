//! Expanded/collapsed state of groups.

use std::collections::HashSet;

/// Tracks expanded groups by key.
///
/// Groups start collapsed. Keys are group identities, not positions, so
/// sorting, paging, or replacing rows never collapses a group implicitly.
/// A key whose group disappears stays in the set and is simply ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    /// Create an empty state (everything collapsed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a group. Returns `true` if it is now expanded.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    /// A copy of this state with `key` toggled.
    pub fn toggled(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.toggle(key);
        next
    }

    /// Check if a group is expanded.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Expand a group. Returns `true` if it was collapsed.
    pub fn expand(&mut self, key: &str) -> bool {
        self.expanded.insert(key.to_string())
    }

    /// Collapse a group. Returns `true` if it was expanded.
    pub fn collapse(&mut self, key: &str) -> bool {
        self.expanded.remove(key)
    }

    /// Collapse every group.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Get all expanded keys, in no particular order.
    pub fn expanded_keys(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    /// Get the number of expanded keys, orphans included.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Check if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().map(Into::into).collect(),
        }
    }
}
