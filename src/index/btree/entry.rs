//! Key/value pairs stored in leaves.

/// Key type of the index.
pub type Key = i64;

/// A key/value pair, the unit stored in every leaf.
///
/// The value is opaque to the tree: it is moved in on insert, replaced in
/// place when the key is inserted again, and never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V> {
    pub key: Key,
    pub value: V,
}

impl<V> Entry<V> {
    #[inline]
    pub fn new(key: Key, value: V) -> Self {
        Self { key, value }
    }
}
