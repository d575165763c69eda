//! Shared tree fixtures for integration tests.

#![allow(dead_code)]

use boosters_regtree::testing::{leaf_record, split_record, TreeWriter};
use boosters_regtree::trees::NodeRecord;
use boosters_regtree::RegTree;

/// Depth-2 tree used across tests:
///
/// ```text
///              [0] f0 < 0.5 (default left)
///              /                \
///     [1] f2 < 1.0 (dflt right)  [2] f1 < 0.3 (dflt left)
///        /        \                /        \
///  [3] -1.0    [4] -0.5      [5] 0.5     [6] 1.0
/// ```
pub fn depth2_records() -> Vec<NodeRecord> {
    vec![
        split_record(-1, 1, 2, 0, true, 0.5),
        split_record(0, 3, 4, 2, false, 1.0),
        split_record(0, 5, 6, 1, true, 0.3),
        leaf_record(1, -1.0),
        leaf_record(1, -0.5),
        leaf_record(2, 0.5),
        leaf_record(2, 1.0),
    ]
}

pub fn depth2_bytes() -> Vec<u8> {
    TreeWriter::encode(1, &depth2_records())
}

pub fn depth2_tree() -> RegTree {
    RegTree::from_bytes(&depth2_bytes()).expect("fixture decodes")
}
