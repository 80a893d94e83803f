//! Property tests for the B+ tree, checked against `BTreeMap` as a model.

use std::collections::BTreeMap;

use bptree::{BPlusTree, Key};
use proptest::prelude::*;

fn ops() -> impl Strategy<Value = Vec<(Key, u32)>> {
    // Narrow key range so overwrites are common.
    prop::collection::vec((-200i64..200, any::<u32>()), 0..400)
}

proptest! {
    /// Every inserted key returns its last value; nothing else is found.
    #[test]
    fn prop_last_write_wins(order in 1usize..12, ops in ops(), probes in prop::collection::vec(-250i64..250, 0..50)) {
        let mut tree = BPlusTree::new(order);
        let mut model = BTreeMap::new();

        for &(k, v) in &ops {
            prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
        }

        for (k, v) in &model {
            prop_assert_eq!(tree.search(*k), Some(v));
        }
        for k in probes {
            prop_assert_eq!(tree.search(k), model.get(&k));
        }
        prop_assert_eq!(tree.len(), model.len());
    }

    /// The leaf chain yields every distinct key once, ascending.
    #[test]
    fn prop_leaf_chain_is_sorted_and_complete(order in 3usize..10, ops in ops()) {
        let mut tree = BPlusTree::new(order);
        let mut model = BTreeMap::new();
        for (k, v) in ops {
            tree.insert(k, v);
            model.insert(k, v);
        }

        let scanned: Vec<(Key, u32)> = tree.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(Key, u32)> = model.into_iter().collect();
        prop_assert_eq!(scanned, expected);
    }

    /// Separator bounds, child counts, leaf depth and chain hold after every
    /// insert, and height grows by at most one per insert.
    #[test]
    fn prop_structure_holds_after_each_insert(order in 3usize..8, ops in ops()) {
        let mut tree = BPlusTree::new(order);
        let mut height = tree.height();

        for (k, v) in ops {
            tree.insert(k, v);
            prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());

            let new_height = tree.height();
            prop_assert!(new_height <= height + 1);
            prop_assert!(new_height >= height);
            height = new_height;
        }
    }

    /// Overwriting an existing key never changes the tree's shape.
    #[test]
    fn prop_overwrite_keeps_shape(order in 3usize..8, ops in ops(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!ops.is_empty());

        let mut tree = BPlusTree::new(order);
        for &(k, v) in &ops {
            tree.insert(k, v);
        }
        let (key, _) = ops[pick.index(ops.len())];
        let nodes = tree.node_count();
        let height = tree.height();

        tree.insert(key, u32::MAX);

        prop_assert_eq!(tree.node_count(), nodes);
        prop_assert_eq!(tree.height(), height);
        prop_assert_eq!(tree.search(key), Some(&u32::MAX));
    }
}
