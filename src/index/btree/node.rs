//! Leaf and internal node variants.
//!
//! Nodes never hold other nodes directly. Children and the leaf chain are
//! [`NodeId`]s into the owning tree's arena, so each node has exactly one
//! owner (the arena) and one structural parent (the node listing its id).
//!
//! The operations here are local to one node. Anything that creates a node
//! (splits, root growth) is driven by the tree, which owns the arena.

use crate::common::NodeId;
use crate::index::btree::entry::{Entry, Key};

/// A tree node. The variant is fixed at creation.
#[derive(Debug)]
pub(crate) enum Node<V> {
    Leaf(LeafNode<V>),
    Internal(InternalNode),
}

impl<V> Node<V> {
    /// Snapshot of the node's keys: entry keys for a leaf, separators for an
    /// internal node.
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Node::Leaf(leaf) => leaf.keys(),
            Node::Internal(internal) => internal.keys(),
        }
    }
}

/// Separator and right sibling produced by a split.
///
/// The left half of the split stays in the node that split, so the parent
/// already holds it in the child slot it descended through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Promotion {
    pub separator: Key,
    pub right: NodeId,
}

// ============================================================================
// LEAF
// ============================================================================

/// Terminal node holding entries in ascending key order.
#[derive(Debug)]
pub(crate) struct LeafNode<V> {
    pub entries: Vec<Entry<V>>,
    /// Right neighbour in key order. Lateral link, not ownership.
    pub next: Option<NodeId>,
}

impl<V> LeafNode<V> {
    pub fn new(order: usize) -> Self {
        Self {
            // One extra slot: a leaf holds order + 1 entries just before it splits.
            entries: Vec::with_capacity(order + 1),
            next: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Insert or overwrite `key`.
    ///
    /// Returns the previous value when the key was already present; the
    /// leaf is then structurally unchanged.
    pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
        let index = self.entries.partition_point(|e| e.key < key);

        if let Some(entry) = self.entries.get_mut(index) {
            if entry.key == key {
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }

        self.entries.insert(index, Entry::new(key, value));
        None
    }

    /// A leaf splits once it holds more than `order` entries.
    #[inline]
    pub fn is_overflowing(&self, order: usize) -> bool {
        self.entries.len() > order
    }

    /// Move entries `[order / 2, end)` into a new right sibling.
    ///
    /// The sibling inherits this leaf's `next`. The caller must point this
    /// leaf's `next` at the sibling once it has an id.
    pub fn split_off(&mut self, order: usize) -> LeafNode<V> {
        let mid = order / 2;
        let mut right = LeafNode::new(order);
        right.entries = self.entries.split_off(mid);
        right.next = self.next.take();
        right
    }

    /// First key, used as the separator after a split.
    ///
    /// # Panics
    /// Panics if the leaf is empty. The right half of a split never is.
    #[inline]
    pub fn first_key(&self) -> Key {
        self.entries[0].key
    }

    pub fn search(&self, key: Key) -> Option<&V> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn keys(&self) -> Vec<Key> {
        self.entries.iter().map(|e| e.key).collect()
    }
}

// ============================================================================
// INTERNAL
// ============================================================================

/// Routing node: `children.len() == keys.len() + 1`.
///
/// Everything under `children[i]` is `< keys[i]`, everything under
/// `children[i + 1]` is `>= keys[i]`.
#[derive(Debug)]
pub(crate) struct InternalNode {
    pub keys: Vec<Key>,
    pub children: Vec<NodeId>,
}

impl InternalNode {
    pub fn new(order: usize) -> Self {
        Self {
            keys: Vec::with_capacity(order),
            children: Vec::with_capacity(order + 1),
        }
    }

    /// A fresh node with one separator and two children, used as a new root.
    pub fn with_children(order: usize, left: NodeId, promotion: Promotion) -> Self {
        let mut node = Self::new(order);
        node.keys.push(promotion.separator);
        node.children.push(left);
        node.children.push(promotion.right);
        node
    }

    /// Index of the child covering `key`.
    ///
    /// Skips every separator `<= key`, so a key equal to a separator routes
    /// right.
    #[inline]
    pub fn route(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k <= key)
    }

    #[inline]
    pub fn child(&self, index: usize) -> NodeId {
        self.children[index]
    }

    /// Absorb a split of `children[index]`.
    pub fn insert_child(&mut self, index: usize, promotion: Promotion) {
        self.keys.insert(index, promotion.separator);
        self.children.insert(index + 1, promotion.right);
    }

    /// An internal node splits once it holds `order` separators.
    #[inline]
    pub fn is_full(&self, order: usize) -> bool {
        self.keys.len() >= order
    }

    /// Split at `(order - 1) / 2`.
    ///
    /// This node keeps keys `[0, mid)` and children `[0, mid]`. The returned
    /// sibling gets keys `(mid, end)` and children `(mid, end]`. `keys[mid]`
    /// is returned separately and stays in neither half.
    pub fn split_off(&mut self, order: usize) -> (Key, InternalNode) {
        let mid = (order - 1) / 2;

        let mut right = InternalNode::new(order);
        right.keys = self.keys.split_off(mid + 1);
        right.children = self.children.split_off(mid + 1);

        let promoted = self.keys[mid];
        self.keys.truncate(mid);

        (promoted, right)
    }

    pub fn keys(&self) -> Vec<Key> {
        self.keys.clone()
    }
}
