//! Index structures.
//!
//! - [`btree`] - In-memory B+ tree with a linked leaf chain

pub mod btree;

pub use btree::{BPlusTree, IndexStats, Iter, Key, StatsSnapshot};
