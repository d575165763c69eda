//! Testing utilities for building tree streams.
//!
//! [`TreeWriter`] emits the exact binary layout [`RegTree::load`] consumes,
//! so tests can construct models from known field values instead of
//! shipping binary fixtures.
//!
//! ```
//! use boosters_regtree::testing::{leaf_record, split_record, TreeWriter};
//! use boosters_regtree::RegTree;
//!
//! let bytes = TreeWriter::encode(1, &[
//!     split_record(-1, 1, 2, 0, false, 0.5),
//!     leaf_record(0, -1.0),
//!     leaf_record(0, 1.0),
//! ]);
//! let tree = RegTree::from_bytes(&bytes).unwrap();
//! assert_eq!(tree.leaf_value_dense(&[0.7], false), 1.0);
//! ```

use std::marker::PhantomData;

use byteorder::{ByteOrder, LittleEndian};

use crate::trees::{
    pack_split_index, NodeRecord, NodeStat, RegTree, TreeParam, LEAF_SENTINEL, RESERVED_SLOTS,
};

// =============================================================================
// Writer
// =============================================================================

/// Encoder for the tree binary layout.
#[derive(Debug, Clone)]
pub struct TreeWriter<E = LittleEndian> {
    buf: Vec<u8>,
    _order: PhantomData<E>,
}

impl TreeWriter {
    /// Little-endian writer.
    pub fn new() -> Self {
        Self::with_byte_order()
    }

    /// Encode a whole tree from node records.
    ///
    /// The header gets `num_nodes = records.len()` and a depth derived from
    /// the parent links; every stat record is zeroed.
    pub fn encode(num_roots: i32, records: &[NodeRecord]) -> Vec<u8> {
        let param = TreeParam {
            num_roots,
            num_nodes: records.len() as i32,
            max_depth: max_depth(records),
            ..Default::default()
        };
        let mut writer = Self::new();
        writer.param(&param);
        for record in records {
            writer.node(record);
        }
        for _ in records {
            writer.stat(&NodeStat::default());
        }
        writer.into_bytes()
    }
}

impl<E: ByteOrder> Default for TreeWriter<E> {
    fn default() -> Self {
        Self::with_byte_order()
    }
}

impl<E: ByteOrder> TreeWriter<E> {
    /// Writer using byte order `E`.
    pub fn with_byte_order() -> Self {
        Self {
            buf: Vec::new(),
            _order: PhantomData,
        }
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        let mut bytes = [0u8; 4];
        E::write_i32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
        self
    }

    pub fn f32(&mut self, value: f32) -> &mut Self {
        let mut bytes = [0u8; 4];
        E::write_f32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
        self
    }

    /// Append a 148-byte header.
    pub fn param(&mut self, param: &TreeParam) -> &mut Self {
        self.i32(param.num_roots)
            .i32(param.num_nodes)
            .i32(param.num_deleted)
            .i32(param.max_depth)
            .i32(param.num_feature)
            .i32(param.size_leaf_vector);
        for &slot in &param.reserved {
            self.i32(slot);
        }
        self
    }

    /// Append a 20-byte node record.
    pub fn node(&mut self, record: &NodeRecord) -> &mut Self {
        self.i32(record.parent)
            .i32(record.left_child)
            .i32(record.right_child)
            .i32(record.packed_index)
            .f32(record.value)
    }

    /// Append a 16-byte stat record.
    pub fn stat(&mut self, stat: &NodeStat) -> &mut Self {
        self.f32(stat.loss_chg)
            .f32(stat.sum_hess)
            .f32(stat.base_weight)
            .i32(stat.leaf_child_cnt)
    }

    /// Re-encode a decoded tree.
    pub fn tree(&mut self, tree: &RegTree) -> &mut Self {
        self.param(tree.param());
        for node in tree.nodes() {
            self.node(&node.record());
        }
        for stat in tree.stats() {
            self.stat(stat);
        }
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// =============================================================================
// Record helpers
// =============================================================================

/// Header with the given counts and everything else zeroed.
pub fn tree_param(num_roots: i32, num_nodes: i32) -> TreeParam {
    TreeParam {
        num_roots,
        num_nodes,
        reserved: [0; RESERVED_SLOTS],
        ..Default::default()
    }
}

/// Leaf record with output `value`.
pub fn leaf_record(parent: i32, value: f32) -> NodeRecord {
    NodeRecord {
        parent,
        left_child: LEAF_SENTINEL,
        right_child: LEAF_SENTINEL,
        packed_index: 0,
        value,
    }
}

/// Split record testing `feature < threshold`.
pub fn split_record(
    parent: i32,
    left: i32,
    right: i32,
    feature: u32,
    default_left: bool,
    threshold: f32,
) -> NodeRecord {
    NodeRecord {
        parent,
        left_child: left,
        right_child: right,
        packed_index: pack_split_index(feature, default_left),
        value: threshold,
    }
}

/// Encoded three-node tree: `feature < threshold ? left_value : right_value`.
pub fn stump(
    feature: u32,
    threshold: f32,
    default_left: bool,
    left_value: f32,
    right_value: f32,
) -> Vec<u8> {
    TreeWriter::encode(
        1,
        &[
            split_record(-1, 1, 2, feature, default_left, threshold),
            leaf_record(0, left_value),
            leaf_record(0, right_value),
        ],
    )
}

fn max_depth(records: &[NodeRecord]) -> i32 {
    records
        .iter()
        .map(|record| {
            let mut depth = 0;
            let mut parent = record.parent;
            while let Some(next) = usize::try_from(parent).ok().and_then(|p| records.get(p)) {
                depth += 1;
                if depth as usize > records.len() {
                    break;
                }
                parent = next.parent;
            }
            depth
        })
        .max()
        .unwrap_or(0)
}
