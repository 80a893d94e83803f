//! Demo: seed a tree with twenty numbered entries, printing its shape after
//! every insert, then look some of them up.
//!
//! Settings come from `BPTREE_ORDER`, `BPTREE_LOG_LEVEL` and
//! `BPTREE_LOG_COLOR`; see [`bptree::TreeConfig`].

use bptree::{fatal, BPlusTree, Logger, TreeConfig};

/// Chinese numerals for 1..=20.
const NUMERALS: [&str; 20] = [
    "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一", "十二", "十三", "十四",
    "十五", "十六", "十七", "十八", "十九", "二十",
];

/// Insertion order. Scrambled so splits happen in both halves of the tree.
const SEED_ORDER: [i64; 20] = [
    7, 14, 2, 19, 11, 5, 16, 1, 9, 20, 4, 13, 17, 8, 3, 12, 18, 6, 15, 10,
];

fn main() {
    let config = match TreeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let logger = Logger::new(config.log);
    if let Err(e) = logger.install() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    tracing::info!("Hello World");
    tracing::info!(order = config.order, "building tree");

    let mut tree = BPlusTree::new(config.order);

    for key in SEED_ORDER {
        let Some(&numeral) = usize::try_from(key - 1).ok().and_then(|i| NUMERALS.get(i)) else {
            fatal!(key, "no numeral for key");
        };
        tree.insert(key, numeral.as_bytes().to_vec());

        println!("\nTree after inserting {key}:{numeral}:");
        print!("{tree}");
    }

    if let Err(e) = tree.validate() {
        fatal!("tree is corrupt: {e}");
    }

    println!("\nSearch:");
    for key in 1..=10 {
        if let Some(value) = tree.search(key) {
            println!("found key {key}, value: {}", String::from_utf8_lossy(value));
        }
    }

    tracing::info!(height = tree.height(), nodes = tree.node_count(), "done");
    println!("\n{}", tree.stats().snapshot());
}
