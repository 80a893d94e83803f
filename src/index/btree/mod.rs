//! B+ tree index implementation.
//!
//! # Components
//! - [`BPlusTree`] - The tree: insert, search, ordered scan, diagnostics
//! - [`Key`] - Key type of the index
//! - [`Iter`] - Ordered scan along the leaf chain
//! - [`IndexStats`] - Insert/split/search counters
//!
//! Entries, nodes, the arena that owns them and the invariant checker are
//! private.

mod arena;
mod entry;
mod iter;
mod node;
mod stats;
mod tree;
mod validate;

pub use entry::Key;
pub use iter::Iter;
pub use stats::{IndexStats, StatsSnapshot};
pub use tree::BPlusTree;
