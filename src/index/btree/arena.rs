//! Node arena - owns every node of one tree.

use crate::common::NodeId;
use crate::index::btree::node::Node;

/// Append-only node storage.
///
/// Nodes are addressed by [`NodeId`], which is the index into `nodes`.
/// The tree never deletes, so ids stay valid for the arena's lifetime and
/// `len()` is the number of live nodes.
#[derive(Debug)]
pub(crate) struct NodeArena<V> {
    nodes: Vec<Node<V>>,
}

impl<V> NodeArena<V> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: Node<V>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<V> Default for NodeArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::node::LeafNode;

    #[test]
    fn test_alloc_assigns_sequential_ids() {
        let mut arena: NodeArena<u32> = NodeArena::new();

        let a = arena.alloc(Node::Leaf(LeafNode::new(4)));
        let b = arena.alloc(Node::Leaf(LeafNode::new(4)));

        assert_eq!(a, NodeId::new(0));
        assert_eq!(b, NodeId::new(1));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_get_mut_is_visible() {
        let mut arena: NodeArena<u32> = NodeArena::new();
        let id = arena.alloc(Node::Leaf(LeafNode::new(4)));

        if let Node::Leaf(leaf) = arena.get_mut(id) {
            leaf.insert(7, 70);
        }

        assert_eq!(arena.get(id).keys(), vec![7]);
    }
}
