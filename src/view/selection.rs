use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Rows expose a stable identity so selection and pending actions survive
/// re-sorting, re-filtering and page changes.
pub trait RowKey {
    type Key: Clone + Eq + Hash + Debug;

    fn row_key(&self) -> Self::Key;
}

/// Set of selected rows, keyed by stable row identity
#[derive(Debug, Clone)]
pub struct Selection<K> {
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash + Debug> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash + Debug> Selection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection of a row; returns whether it is selected afterwards
    pub fn toggle(&mut self, key: &K) -> bool {
        if self.selected.remove(key) {
            false
        } else {
            self.selected.insert(key.clone());
            true
        }
    }

    pub fn select(&mut self, key: K) {
        self.selected.insert(key);
    }

    pub fn deselect(&mut self, key: &K) {
        self.selected.remove(key);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop keys the predicate rejects (rows no longer present)
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.selected.retain(|key| keep(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle(&"a"));
        assert!(selection.contains(&"a"));
        assert!(!selection.toggle(&"a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_retain_prunes_missing_keys() {
        let mut selection = Selection::new();
        selection.select(1);
        selection.select(2);
        selection.select(3);

        selection.retain(|k| *k != 2);

        assert_eq!(selection.len(), 2);
        assert!(!selection.contains(&2));
    }
}
