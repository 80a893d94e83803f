//! Structural invariant checks.
//!
//! Checked, in one depth-first pass plus one leaf-chain walk:
//! - every node is reachable from the root exactly once
//! - internal nodes have `keys + 1` children and fewer than `order` keys
//! - keys ascend strictly inside every node
//! - every key lies in the range its ancestors' separators allow
//! - all leaves sit at the same depth
//! - the leaf chain visits the leaves in depth-first order and ends there

use crate::common::{Error, NodeId, Result};
use crate::index::btree::arena::NodeArena;
use crate::index::btree::entry::Key;
use crate::index::btree::node::Node;

/// Key range allowed under a subtree: `lower <= key < upper`.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    lower: Option<Key>,
    upper: Option<Key>,
}

impl Bounds {
    const ALL: Bounds = Bounds {
        lower: None,
        upper: None,
    };

    fn contains(&self, key: Key) -> bool {
        self.lower.is_none_or(|lo| key >= lo) && self.upper.is_none_or(|hi| key < hi)
    }
}

struct Walk<'a, V> {
    arena: &'a NodeArena<V>,
    order: usize,
    root: NodeId,
    visited: Vec<bool>,
    leaves: Vec<NodeId>,
    leaf_depth: Option<usize>,
}

pub(crate) fn validate<V>(arena: &NodeArena<V>, root: Option<NodeId>, order: usize) -> Result<()> {
    let Some(root) = root else {
        if arena.len() != 0 {
            return violation(format!("empty tree holds {} nodes", arena.len()));
        }
        return Ok(());
    };

    let mut walk = Walk {
        arena,
        order,
        root,
        visited: vec![false; arena.len()],
        leaves: Vec::new(),
        leaf_depth: None,
    };
    walk.visit(root, Bounds::ALL, 0)?;

    if let Some(unreached) = walk.visited.iter().position(|seen| !seen) {
        return violation(format!("{} is not reachable from the root", NodeId::new(unreached)));
    }

    walk.check_leaf_chain()
}

impl<V> Walk<'_, V> {
    fn visit(&mut self, id: NodeId, bounds: Bounds, depth: usize) -> Result<()> {
        let arena = self.arena;

        match self.visited.get_mut(id.0) {
            Some(seen) if *seen => return violation(format!("{id} has more than one parent")),
            Some(seen) => *seen = true,
            None => return violation(format!("{id} is outside the arena")),
        }

        match arena.get(id) {
            Node::Leaf(leaf) => {
                let keys = leaf.keys();
                if keys.is_empty() && id != self.root {
                    return violation(format!("{id} is an empty leaf"));
                }
                if leaf.len() > self.order {
                    return violation(format!("{id} holds {} entries, order is {}", leaf.len(), self.order));
                }
                self.check_keys(id, &keys, bounds)?;

                match self.leaf_depth {
                    None => self.leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return violation(format!("{id} is at depth {depth}, other leaves at {expected}"));
                    }
                    Some(_) => {}
                }
                self.leaves.push(id);
                Ok(())
            }
            Node::Internal(node) => {
                if node.keys.is_empty() {
                    return violation(format!("{id} is an internal node without separators"));
                }
                if node.keys.len() >= self.order {
                    return violation(format!("{id} holds {} separators, order is {}", node.keys.len(), self.order));
                }
                if node.children.len() != node.keys.len() + 1 {
                    return violation(format!(
                        "{id} has {} separators but {} children",
                        node.keys.len(),
                        node.children.len()
                    ));
                }
                self.check_keys(id, &node.keys, bounds)?;

                for (i, &child) in node.children.iter().enumerate() {
                    let child_bounds = Bounds {
                        lower: if i == 0 { bounds.lower } else { Some(node.keys[i - 1]) },
                        upper: node.keys.get(i).copied().or(bounds.upper),
                    };
                    self.visit(child, child_bounds, depth + 1)?;
                }
                Ok(())
            }
        }
    }

    fn check_keys(&self, id: NodeId, keys: &[Key], bounds: Bounds) -> Result<()> {
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] >= pair[1]) {
            return violation(format!("{id} keys out of order: {} before {}", pair[0], pair[1]));
        }
        if let Some(key) = keys.iter().copied().find(|&k| !bounds.contains(k)) {
            return violation(format!("{id} key {key} outside {:?}", bounds));
        }
        Ok(())
    }

    fn check_leaf_chain(&self) -> Result<()> {
        let mut current = self.leaves.first().copied();

        for (position, &expected) in self.leaves.iter().enumerate() {
            match current {
                Some(id) if id == expected => {}
                Some(id) => {
                    return violation(format!("leaf chain reaches {id} at position {position}, expected {expected}"));
                }
                None => return violation(format!("leaf chain ends early at position {position}")),
            }
            current = match self.arena.get(expected) {
                Node::Leaf(leaf) => leaf.next,
                Node::Internal(_) => return violation(format!("{expected} in leaf chain is internal")),
            };
        }

        match current {
            Some(id) => violation(format!("rightmost leaf links to {id}")),
            None => Ok(()),
        }
    }
}

fn violation(message: String) -> Result<()> {
    Err(Error::InvariantViolation(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::node::{InternalNode, LeafNode, Promotion};

    fn leaf(keys: &[Key]) -> LeafNode<()> {
        let mut leaf = LeafNode::new(4);
        for &k in keys {
            leaf.insert(k, ());
        }
        leaf
    }

    /// Root `Internal[sep]` over two leaves, chained left to right.
    fn two_leaf_tree(left: &[Key], sep: Key, right: &[Key]) -> (NodeArena<()>, NodeId) {
        let mut arena = NodeArena::new();
        let l = arena.alloc(Node::Leaf(leaf(left)));
        let r = arena.alloc(Node::Leaf(leaf(right)));
        if let Node::Leaf(node) = arena.get_mut(l) {
            node.next = Some(r);
        }
        let root = InternalNode::with_children(4, l, Promotion { separator: sep, right: r });
        let root = arena.alloc(Node::Internal(root));
        (arena, root)
    }

    #[test]
    fn test_valid_tree() {
        let (arena, root) = two_leaf_tree(&[1, 2], 3, &[3, 4]);
        assert!(validate(&arena, Some(root), 4).is_ok());
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let arena: NodeArena<()> = NodeArena::new();
        assert!(validate(&arena, None, 4).is_ok());
    }

    #[test]
    fn test_detects_key_left_of_separator() {
        let (arena, root) = two_leaf_tree(&[1, 5], 3, &[3, 4]);
        assert!(matches!(validate(&arena, Some(root), 4), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_detects_key_below_separator_in_right_child() {
        let (arena, root) = two_leaf_tree(&[1, 2], 3, &[2, 4]);
        assert!(matches!(validate(&arena, Some(root), 4), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_detects_broken_leaf_chain() {
        let (mut arena, root) = two_leaf_tree(&[1, 2], 3, &[3, 4]);
        if let Node::Leaf(node) = arena.get_mut(NodeId::new(0)) {
            node.next = None;
        }
        assert!(validate(&arena, Some(root), 4).is_err());
    }

    #[test]
    fn test_detects_overfull_leaf() {
        let (arena, root) = two_leaf_tree(&[1, 2], 3, &[3, 4, 5, 6, 7]);
        assert!(validate(&arena, Some(root), 4).is_err());
    }

    #[test]
    fn test_detects_unreachable_node() {
        let (mut arena, root) = two_leaf_tree(&[1, 2], 3, &[3, 4]);
        arena.alloc(Node::Leaf(leaf(&[9])));
        assert!(validate(&arena, Some(root), 4).is_err());
    }
}
