//! Tree header: the fixed-size parameter block that precedes the node table.

use std::io::Read;

use byteorder::ByteOrder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};
use crate::io::ModelReader;

/// Number of reserved integer slots at the end of the header.
pub const RESERVED_SLOTS: usize = 31;

/// Encoded header size in bytes: six counts plus the reserved block.
pub const HEADER_SIZE: usize = (6 + RESERVED_SLOTS) * 4;

/// Tree-level parameters, decoded first and used to size the node and stat tables.
///
/// Fields are kept as the signed integers the writer emits. The reserved
/// block is carried through unchanged so a decoded header re-encodes to the
/// same bytes; nothing in this crate interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeParam {
    /// Number of root nodes. Roots occupy the first slots of the node table.
    pub num_roots: i32,
    /// Total number of nodes, including deleted ones.
    pub num_nodes: i32,
    /// Number of deleted nodes.
    pub num_deleted: i32,
    /// Maximum depth reached during training.
    pub max_depth: i32,
    /// Number of input features the tree was trained on.
    pub num_feature: i32,
    /// Leaf vector size for multi-output leaves (unused for scalar leaves).
    pub size_leaf_vector: i32,
    /// Reserved for forward compatibility.
    pub reserved: [i32; RESERVED_SLOTS],
}

impl TreeParam {
    /// Decode the header, stopping at the first failed read.
    pub fn read_from<R: Read, E: ByteOrder>(reader: &mut ModelReader<R, E>) -> Result<Self> {
        let num_roots = reader.read_i32("num_roots")?;
        let num_nodes = reader.read_i32("num_nodes")?;
        let num_deleted = reader.read_i32("num_deleted")?;
        let max_depth = reader.read_i32("max_depth")?;
        let num_feature = reader.read_i32("num_feature")?;
        let size_leaf_vector = reader.read_i32("size_leaf_vector")?;

        let mut reserved = [0i32; RESERVED_SLOTS];
        reserved.copy_from_slice(&reader.read_i32_array(RESERVED_SLOTS, "reserved")?);

        Ok(Self {
            num_roots,
            num_nodes,
            num_deleted,
            max_depth,
            num_feature,
            size_leaf_vector,
            reserved,
        })
    }

    /// Node count as a table length.
    ///
    /// Fails only when the stored count is negative.
    pub fn node_count(&self) -> Result<usize> {
        usize::try_from(self.num_nodes).map_err(|_| DecodeError::NegativeCount {
            field: "num_nodes",
            value: self.num_nodes,
        })
    }
}
