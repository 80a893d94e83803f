//! bptree - an in-memory B+ tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            bptree                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   BPlusTree: insert / search / ordered scan / validate   │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  NodeArena: Leaf ─next→ Leaf ─next→ Leaf ...    │   │   │
//! │  │   │             Internal (separators + child ids)   │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓ tracing events                   │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Logging (logging/)  [optional sink]           │   │
//! │  │      Logger → column-aligned, leveled, colored lines     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - The B+ tree
//! - [`logging`] - Console backend for the crate's `tracing` events
//!
//! # Quick Start
//! ```
//! use bptree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(4);
//! tree.insert(5, "five");
//! tree.insert(1, "one");
//!
//! assert_eq!(tree.search(5), Some(&"five"));
//! assert_eq!(tree.search(2), None);
//! println!("{tree}");
//! ```

pub mod common;
pub mod index;
pub mod logging;

// Re-export commonly used items at crate root for convenience
pub use common::config::{TreeConfig, DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, Result};

pub use index::btree::{BPlusTree, IndexStats, Iter, Key, StatsSnapshot};
pub use logging::{LogSettings, Logger, Severity};

#[doc(hidden)]
pub use tracing as __tracing;
