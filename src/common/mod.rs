//! Common types and utilities shared across bptree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and environment loading
//! - Error types
//! - Node identifiers

pub mod config;
pub mod error;
mod node_id;

pub use error::{Error, Result};
pub(crate) use node_id::NodeId;
