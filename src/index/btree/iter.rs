//! Ordered scan over the leaf chain.

use std::iter::FusedIterator;

use crate::common::NodeId;
use crate::index::btree::arena::NodeArena;
use crate::index::btree::entry::Key;
use crate::index::btree::node::Node;

/// Iterator over `(key, &value)` in ascending key order.
///
/// Starts at the leftmost leaf and follows `next` links; it never goes back
/// up through internal nodes.
pub struct Iter<'a, V> {
    arena: &'a NodeArena<V>,
    leaf: Option<NodeId>,
    pos: usize,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(arena: &'a NodeArena<V>, first_leaf: Option<NodeId>, len: usize) -> Self {
        Self {
            arena,
            leaf: first_leaf,
            pos: 0,
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.leaf?;
            let Node::Leaf(leaf) = self.arena.get(id) else {
                self.leaf = None;
                return None;
            };

            if let Some(entry) = leaf.entries.get(self.pos) {
                self.pos += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some((entry.key, &entry.value));
            }

            self.leaf = leaf.next;
            self.pos = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use crate::BPlusTree;

    #[test]
    fn test_iter_empty() {
        let tree: BPlusTree<u32> = BPlusTree::new(4);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn test_iter_crosses_leaves_in_order() {
        let mut tree = BPlusTree::new(3);
        for k in [9, 3, 7, 1, 5, 8, 2, 6, 4] {
            tree.insert(k, k * 10);
        }

        let items: Vec<(i64, i64)> = tree.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(i64, i64)> = (1..=9).map(|k| (k, k * 10)).collect();
        assert_eq!(items, expected);
    }

    #[test]
    fn test_iter_exact_size() {
        let mut tree = BPlusTree::new(4);
        for k in 0..50 {
            tree.insert(k, ());
        }

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 50);
        iter.next();
        assert_eq!(iter.len(), 49);
        assert_eq!(iter.count(), 49);
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let mut tree = BPlusTree::new(4);
        tree.insert(2, "b");
        tree.insert(1, "a");

        let mut seen = Vec::new();
        for (k, v) in &tree {
            seen.push((k, *v));
        }
        assert_eq!(seen, vec![(1, "a"), (2, "b")]);
    }
}
