//! Label equivalence resolution
//!
//! [`EquivalenceMap`] is a union-find forest keyed by label. It is created
//! fresh for every labeling pass and owned by that pass; nothing about it is
//! shared between workers.

use bandlabel_core::Label;
use std::collections::HashMap;

/// Union-find forest over labels
///
/// Following parent links from any recorded label ends at a root whose
/// parent is itself. Unions only ever point a root at another root, so no
/// cycle can form.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceMap {
    parent: HashMap<Label, Label>,
}

impl EquivalenceMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of labels recorded
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check if no label has been recorded
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Recorded parent of `label`, without resolving
    pub fn parent(&self, label: Label) -> Option<Label> {
        self.parent.get(&label).copied()
    }

    /// Resolve `label` to its class root
    ///
    /// A label seen for the first time becomes its own root. Every label
    /// visited on the way to the root is re-pointed directly at it.
    pub fn root(&mut self, label: Label) -> Label {
        if !self.parent.contains_key(&label) {
            self.parent.insert(label, label);
            return label;
        }

        let mut root = label;
        while let Some(&parent) = self.parent.get(&root) {
            if parent == root {
                break;
            }
            root = parent;
        }

        // Path compression
        let mut node = label;
        while node != root {
            match self.parent.insert(node, root) {
                Some(next) => node = next,
                None => break,
            }
        }

        root
    }

    /// Merge the classes of `a` and `b`
    ///
    /// The root of `a` always becomes the root of the merged class.
    pub fn union(&mut self, a: Label, b: Label) {
        let root_a = self.root(a);
        let root_b = self.root(b);
        if root_a != root_b {
            self.parent.insert(root_b, root_a);
        }
    }

    /// Check if two labels belong to the same class
    pub fn same_class(&mut self, a: Label, b: Label) -> bool {
        self.root(a) == self.root(b)
    }

    /// Number of distinct classes among recorded labels
    pub fn class_count(&self) -> usize {
        self.parent.iter().filter(|(k, v)| k == v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sight_is_own_root() {
        let mut map = EquivalenceMap::new();
        assert_eq!(map.root(7), 7);
        assert_eq!(map.parent(7), Some(7));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_root_is_idempotent() {
        let mut map = EquivalenceMap::new();
        map.union(2, 3);
        map.union(3, 4);
        map.union(9, 2);
        for label in [2, 3, 4, 9] {
            let r = map.root(label);
            assert_eq!(map.root(r), r);
        }
    }

    #[test]
    fn test_first_argument_root_wins() {
        let mut map = EquivalenceMap::new();
        map.union(5, 3);
        assert_eq!(map.root(3), 5);

        let mut map = EquivalenceMap::new();
        map.union(3, 5);
        assert_eq!(map.root(5), 3);
    }

    #[test]
    fn test_union_order_does_not_change_classes() {
        let mut ab = EquivalenceMap::new();
        ab.union(2, 6);
        let mut ba = EquivalenceMap::new();
        ba.union(6, 2);
        assert!(ab.same_class(2, 6));
        assert!(ba.same_class(2, 6));
    }

    #[test]
    fn test_union_is_idempotent() {
        let mut map = EquivalenceMap::new();
        map.union(2, 3);
        map.union(2, 3);
        map.union(3, 2);
        assert_eq!(map.class_count(), 1);
        assert_eq!(map.root(3), 2);
    }

    #[test]
    fn test_path_compression_flattens_chain() {
        let mut map = EquivalenceMap::new();
        // Chain 2 -> 3 -> 4 -> 5 -> 10
        for label in 3..=5 {
            map.union(label, label - 1);
        }
        map.union(10, 5);
        assert_eq!(map.parent(2), Some(3));

        assert_eq!(map.root(2), 10);
        for label in [2, 3, 4, 5] {
            assert_eq!(map.parent(label), Some(10));
        }
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let mut map = EquivalenceMap::new();
        let n: Label = 200_000;
        // Each union makes the previous root a child of the new label,
        // producing one chain of length n.
        for label in 3..n {
            map.union(label, label - 1);
        }
        assert_eq!(map.root(2), n - 1);
        assert_eq!(map.parent(2), Some(n - 1));
        assert_eq!(map.class_count(), 1);
    }
}
