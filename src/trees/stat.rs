//! Per-node training statistics.

use std::io::Read;

use byteorder::ByteOrder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::ModelReader;

/// Training-time statistics stored after the node table, one per node.
///
/// Inference never reads these; they are decoded so the stream ends up
/// positioned after the tree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeStat {
    /// Loss reduction of the split at this node.
    pub loss_chg: f32,
    /// Sum of hessians of the samples reaching this node.
    pub sum_hess: f32,
    /// Weight of the node before it was split.
    pub base_weight: f32,
    /// Number of leaf children.
    pub leaf_child_cnt: i32,
}

impl NodeStat {
    /// Decode one 16-byte stat record.
    pub fn read_from<R: Read, E: ByteOrder>(reader: &mut ModelReader<R, E>) -> Result<Self> {
        Ok(Self {
            loss_chg: reader.read_f32("stat.loss_chg")?,
            sum_hess: reader.read_f32("stat.sum_hess")?,
            base_weight: reader.read_f32("stat.base_weight")?,
            leaf_child_cnt: reader.read_i32("stat.leaf_child_cnt")?,
        })
    }
}
