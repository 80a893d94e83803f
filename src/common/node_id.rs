//! Node identifier type.

use std::fmt;

/// Identifies a node in a tree's node arena.
///
/// Using `usize` because:
/// 1. Nodes are stored in `Vec<Node<V>>`
/// 2. Direct indexing without casting: `nodes[node_id.0]`
/// 3. Copyable, so a leaf can point at its right sibling without owning it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub(crate) fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_new() {
        let nid = NodeId::new(10);
        assert_eq!(nid.0, 10);
    }

    #[test]
    fn test_node_id_ordering() {
        assert_eq!(NodeId::new(5), NodeId::new(5));
        assert!(NodeId::new(1) < NodeId::new(2));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId::new(42)), "Node(42)");
    }
}
