//! Row selection state.
//!
//! Selection uses string ids so it stays stable when rows are re-sorted or
//! replaced.

use std::collections::HashSet;

/// Id-based selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in the order they appear in `order`.
    pub fn selected_in(&self, order: &[String]) -> Vec<String> {
        order
            .iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether every id of `all` is selected (false for an empty list).
    pub fn contains_all(&self, all: &[String]) -> bool {
        !all.is_empty() && all.iter().all(|id| self.selected.contains(id))
    }

    /// Clear all selection.
    /// Returns the ids that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    /// Select or deselect one id.
    /// Returns true if the selection changed.
    pub fn set(&mut self, id: &str, selected: bool) -> bool {
        if selected {
            self.selected.insert(id.to_string())
        } else {
            self.selected.remove(id)
        }
    }

    /// Toggle selection of an id. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select every id of `all_ids`.
    /// Returns the ids that were newly selected.
    pub fn select_all(&mut self, all_ids: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for id in all_ids {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }
        added
    }

    /// Deselect every id of `ids`.
    pub fn deselect_all(&mut self, ids: &[String]) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Drop ids that are not in `ids`.
    /// Returns true if anything was removed.
    pub fn retain(&mut self, ids: &[String]) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| ids.contains(id));
        self.selected.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selected_in_follows_order() {
        let mut selection = Selection::new();
        selection.toggle("3");
        selection.toggle("1");
        assert_eq!(selection.selected_in(&ids(&["1", "2", "3"])), ids(&["1", "3"]));
    }

    #[test]
    fn test_retain_prunes() {
        let mut selection = Selection::new();
        selection.select_all(&ids(&["a", "b", "c"]));
        assert!(selection.retain(&ids(&["b"])));
        assert!(!selection.retain(&ids(&["b"])));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_contains_all() {
        let mut selection = Selection::new();
        assert!(!selection.contains_all(&[]));
        selection.select_all(&ids(&["a", "b"]));
        assert!(selection.contains_all(&ids(&["a", "b"])));
        selection.toggle("a");
        assert!(!selection.contains_all(&ids(&["a", "b"])));
    }
}
