//! BPlusTree - the orchestrator that owns the nodes and drives splits.

use std::fmt;

use tracing::{debug, warn};

use crate::common::config::MIN_ORDER;
use crate::common::{Error, NodeId, Result};
use crate::index::btree::arena::NodeArena;
use crate::index::btree::entry::Key;
use crate::index::btree::iter::Iter;
use crate::index::btree::node::{InternalNode, LeafNode, Node, Promotion};
use crate::index::btree::stats::IndexStats;
use crate::index::btree::validate;

/// Result of inserting into a subtree.
enum Outcome<V> {
    /// The key existed; this is its previous value. Nothing moved.
    Replaced(V),
    /// A new entry was added without splitting this subtree's root.
    Inserted,
    /// The subtree's root split; the parent must absorb the promotion.
    Split(Promotion),
}

/// An in-memory B+ tree mapping integer keys to opaque values.
///
/// # Architecture
/// ```text
///                    ┌──────────────┐
///                    │ Internal[7]  │
///                    └──────┬───────┘
///              ┌────────────┴────────────┐
///        ┌─────┴──────┐            ┌─────┴──────┐
///        │Internal[4] │            │Internal[10]│
///        └──┬──────┬──┘            └──┬──────┬──┘
///     Leaf[1 2 3]→Leaf[4 5 6]→Leaf[7 8 9]→Leaf[10 11]
/// ```
/// Every node lives in the tree's arena. Internal nodes list their children
/// by arena id; leaves link to their right neighbour the same way, so the
/// leaf chain never owns anything.
///
/// # Order
/// A leaf splits when it holds more than `order` entries; an internal node
/// splits when it reaches `order` separators.
///
/// # Usage
/// ```
/// use bptree::BPlusTree;
///
/// let mut tree = BPlusTree::new(4);
/// for k in 1..=20 {
///     tree.insert(k, format!("value-{k}"));
/// }
///
/// assert_eq!(tree.search(7), Some(&"value-7".to_string()));
/// assert_eq!(tree.search(21), None);
/// assert_eq!(tree.keys(), (1..=20).collect::<Vec<_>>());
/// ```
#[derive(Debug)]
pub struct BPlusTree<V> {
    /// Owns every node.
    arena: NodeArena<V>,

    /// Absent until the first insert.
    root: Option<NodeId>,

    /// Fan-out bound, at least [`MIN_ORDER`].
    order: usize,

    /// Number of distinct keys.
    len: usize,

    stats: IndexStats,
}

impl<V> BPlusTree<V> {
    /// Create an empty tree.
    ///
    /// An `order` below [`MIN_ORDER`] is raised to it.
    pub fn new(order: usize) -> Self {
        if order < MIN_ORDER {
            warn!(requested = order, order = MIN_ORDER, "order below minimum, clamping");
        }
        Self::with_valid_order(order.max(MIN_ORDER))
    }

    /// Create an empty tree, rejecting an `order` below [`MIN_ORDER`].
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn try_new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order,
                min: MIN_ORDER,
            });
        }
        Ok(Self::with_valid_order(order))
    }

    fn with_valid_order(order: usize) -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            order,
            len: 0,
            stats: IndexStats::new(),
        }
    }

    // ========================================================================
    // Public API: Insert and search
    // ========================================================================

    /// Insert `key`, or overwrite its value if it is already present.
    ///
    /// Returns the previous value on overwrite. Overwriting never changes
    /// the tree's shape.
    pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
        let root = match self.root {
            Some(root) => root,
            None => {
                let root = self.arena.alloc(Node::Leaf(LeafNode::new(self.order)));
                self.root = Some(root);
                root
            }
        };

        match self.insert_into(root, key, value) {
            Outcome::Replaced(old) => {
                IndexStats::bump(&self.stats.updates);
                return Some(old);
            }
            Outcome::Inserted => {}
            Outcome::Split(promotion) => self.grow_root(root, promotion),
        }

        self.len += 1;
        IndexStats::bump(&self.stats.inserts);
        None
    }

    /// Look up the value stored under `key`.
    pub fn search(&self, key: Key) -> Option<&V> {
        let found = self.find(key);
        if found.is_some() {
            IndexStats::bump(&self.stats.search_hits);
        } else {
            IndexStats::bump(&self.stats.search_misses);
        }
        found
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: Key) -> bool {
        self.search(key).is_some()
    }

    // ========================================================================
    // Public API: Scans and info
    // ========================================================================

    /// Iterate over all entries in ascending key order by walking the leaf
    /// chain.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.arena, self.leftmost_leaf(), self.len)
    }

    /// All keys in ascending order, read from the leaf chain.
    pub fn keys(&self) -> Vec<Key> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The effective order (after clamping).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of levels; 0 for an empty tree, 1 for a single leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(id) = current {
            height += 1;
            current = match self.arena.get(id) {
                Node::Internal(node) => Some(node.child(0)),
                Node::Leaf(_) => None,
            };
        }
        height
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Get tree statistics.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Check every structural invariant of the tree.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first breach found
    pub fn validate(&self) -> Result<()> {
        validate::validate(&self.arena, self.root, self.order)
    }

    // ========================================================================
    // Internal: Recursive insert
    // ========================================================================

    fn insert_into(&mut self, id: NodeId, key: Key, value: V) -> Outcome<V> {
        let order = self.order;

        let (index, child) = match self.arena.get_mut(id) {
            Node::Leaf(leaf) => {
                if let Some(old) = leaf.insert(key, value) {
                    return Outcome::Replaced(old);
                }
                if !leaf.is_overflowing(order) {
                    return Outcome::Inserted;
                }
                return Outcome::Split(self.split_leaf(id));
            }
            Node::Internal(node) => {
                let index = node.route(key);
                (index, node.child(index))
            }
        };

        match self.insert_into(child, key, value) {
            Outcome::Split(promotion) => self.absorb(id, index, promotion),
            outcome => outcome,
        }
    }

    /// Fold a child's split into internal node `id`, splitting it in turn
    /// if it fills up.
    fn absorb(&mut self, id: NodeId, index: usize, promotion: Promotion) -> Outcome<V> {
        let order = self.order;

        let Node::Internal(node) = self.arena.get_mut(id) else {
            unreachable!("{id} has children but is not an internal node");
        };

        node.insert_child(index, promotion);
        if !node.is_full(order) {
            return Outcome::Inserted;
        }

        Outcome::Split(self.split_internal(id))
    }

    fn split_leaf(&mut self, id: NodeId) -> Promotion {
        let order = self.order;

        let Node::Leaf(leaf) = self.arena.get_mut(id) else {
            unreachable!("{id} is not a leaf");
        };
        let right = leaf.split_off(order);
        let separator = right.first_key();

        let right_id = self.arena.alloc(Node::Leaf(right));
        if let Node::Leaf(leaf) = self.arena.get_mut(id) {
            leaf.next = Some(right_id);
        }

        IndexStats::bump(&self.stats.leaf_splits);
        debug!(node = %id, sibling = %right_id, separator, "leaf split");

        Promotion {
            separator,
            right: right_id,
        }
    }

    fn split_internal(&mut self, id: NodeId) -> Promotion {
        let order = self.order;

        let Node::Internal(node) = self.arena.get_mut(id) else {
            unreachable!("{id} is not an internal node");
        };
        let (separator, right) = node.split_off(order);

        let right_id = self.arena.alloc(Node::Internal(right));

        IndexStats::bump(&self.stats.internal_splits);
        debug!(node = %id, sibling = %right_id, separator, "internal split");

        Promotion {
            separator,
            right: right_id,
        }
    }

    /// Replace a split root with a new internal root over both halves.
    fn grow_root(&mut self, old_root: NodeId, promotion: Promotion) {
        let root = InternalNode::with_children(self.order, old_root, promotion);
        let root_id = self.arena.alloc(Node::Internal(root));
        self.root = Some(root_id);

        IndexStats::bump(&self.stats.root_splits);
        debug!(
            root = %root_id,
            separator = promotion.separator,
            height = self.height(),
            "root split, tree grew a level"
        );
    }

    // ========================================================================
    // Internal: Lookup helpers
    // ========================================================================

    fn find(&self, key: Key) -> Option<&V> {
        let mut id = self.root?;
        loop {
            match self.arena.get(id) {
                Node::Internal(node) => id = node.child(node.route(key)),
                Node::Leaf(leaf) => return leaf.search(key),
            }
        }
    }

    fn leftmost_leaf(&self) -> Option<NodeId> {
        let mut id = self.root?;
        while let Node::Internal(node) = self.arena.get(id) {
            id = node.child(0);
        }
        Some(id)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let indent = depth * 2;
        let node = self.arena.get(id);
        let keys = key_list(&node.keys());
        match node {
            Node::Internal(internal) => {
                writeln!(f, "{:indent$}Internal{keys}", "")?;
                for &child in &internal.children {
                    self.fmt_node(f, child, depth + 1)?;
                }
                Ok(())
            }
            Node::Leaf(leaf) => {
                write!(f, "{:indent$}Leaf{keys}", "")?;
                if leaf.next.is_some() {
                    write!(f, "→")?;
                }
                writeln!(f)
            }
        }
    }
}

impl<V> Default for BPlusTree<V> {
    fn default() -> Self {
        Self::new(crate::common::config::DEFAULT_ORDER)
    }
}

impl<'a, V> IntoIterator for &'a BPlusTree<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Diagnostic dump: one line per node, children indented below parents,
/// `→` marking leaves that have a right neighbour.
impl<V> fmt::Display for BPlusTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== B+ Tree ===")?;
        match self.root {
            Some(root) => self.fmt_node(f, root, 0),
            None => Ok(()),
        }
    }
}

/// `[1 2 3]`
fn key_list(keys: &[Key]) -> String {
    let joined: Vec<String> = keys.iter().map(Key::to_string).collect();
    format!("[{}]", joined.join(" "))
}
