//! Tree node types.

use std::io::Read;

use byteorder::ByteOrder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::ModelReader;

/// Index of a node within its tree's node table.
///
/// Child links are stored as `i32` with `-1` marking a leaf. Traversal only
/// follows links of split nodes and converts them with `as NodeId`, so a
/// `-1` link on a split node becomes `u32::MAX` and fails the table lookup.
pub type NodeId = u32;

/// Child index marking a node as a leaf.
pub const LEAF_SENTINEL: i32 = -1;

/// Mask selecting the split feature from a packed split index.
pub const SPLIT_FEATURE_MASK: u32 = 0x7FFF_FFFF;

/// Pack a split feature and default direction the way the writer stores them.
///
/// The low 31 bits hold the feature, the sign bit is set when missing values
/// go left.
#[inline]
pub fn pack_split_index(feature: u32, default_left: bool) -> i32 {
    let bits = feature & SPLIT_FEATURE_MASK;
    if default_left {
        (bits | !SPLIT_FEATURE_MASK) as i32
    } else {
        bits as i32
    }
}

/// One node record exactly as it appears in the stream.
///
/// `value` is the leaf output for leaves and the split threshold otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeRecord {
    pub parent: i32,
    pub left_child: i32,
    pub right_child: i32,
    pub packed_index: i32,
    pub value: f32,
}

impl NodeRecord {
    /// Decode one 20-byte node record.
    ///
    /// Leaf-ness is fixed by `left_child` as soon as it is read; the trailing
    /// float is interpreted accordingly by [`Node::from`].
    pub fn read_from<R: Read, E: ByteOrder>(reader: &mut ModelReader<R, E>) -> Result<Self> {
        let parent = reader.read_i32("node.parent")?;
        let left_child = reader.read_i32("node.left_child")?;
        let right_child = reader.read_i32("node.right_child")?;
        let packed_index = reader.read_i32("node.packed_index")?;
        let field = if left_child == LEAF_SENTINEL {
            "node.leaf_value"
        } else {
            "node.split_condition"
        };
        let value = reader.read_f32(field)?;

        Ok(Self {
            parent,
            left_child,
            right_child,
            packed_index,
            value,
        })
    }
}

/// Payload of a node: a leaf output or a split threshold, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    /// Terminal node carrying the tree's output.
    Leaf { value: f32 },
    /// Internal node: go left if `feature < threshold`.
    Split { threshold: f32 },
}

/// A decoded tree node.
///
/// Children and parent are indices into the owning tree's node table. The
/// split feature, default direction and default child are resolved once at
/// construction and never recomputed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "NodeRecord", into = "NodeRecord"))]
pub struct Node {
    parent: i32,
    left_child: i32,
    right_child: i32,
    packed_index: i32,
    kind: NodeKind,
    split_feature: u32,
    default_left: bool,
    default_child: i32,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        let kind = if record.left_child == LEAF_SENTINEL {
            NodeKind::Leaf {
                value: record.value,
            }
        } else {
            NodeKind::Split {
                threshold: record.value,
            }
        };
        let split_feature = record.packed_index as u32 & SPLIT_FEATURE_MASK;
        let default_left = record.packed_index < 0;
        let default_child = if default_left {
            record.left_child
        } else {
            record.right_child
        };

        Self {
            parent: record.parent,
            left_child: record.left_child,
            right_child: record.right_child,
            packed_index: record.packed_index,
            kind,
            split_feature,
            default_left,
            default_child,
        }
    }
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        node.record()
    }
}

impl Node {
    /// Decode one node record and resolve its derived fields.
    pub fn read_from<R: Read, E: ByteOrder>(reader: &mut ModelReader<R, E>) -> Result<Self> {
        NodeRecord::read_from(reader).map(Self::from)
    }

    /// Re-encode this node as its stream record.
    pub fn record(&self) -> NodeRecord {
        let value = match self.kind {
            NodeKind::Leaf { value } => value,
            NodeKind::Split { threshold } => threshold,
        };
        NodeRecord {
            parent: self.parent,
            left_child: self.left_child,
            right_child: self.right_child,
            packed_index: self.packed_index,
            value,
        }
    }

    /// Returns true if this is a leaf node.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent index as stored (`-1` for roots in XGBoost output).
    #[inline]
    pub fn parent(&self) -> i32 {
        self.parent
    }

    /// Left child index, `-1` for leaves.
    #[inline]
    pub fn left_child(&self) -> i32 {
        self.left_child
    }

    #[inline]
    pub fn right_child(&self) -> i32 {
        self.right_child
    }

    /// Raw packed split index, sign bit included.
    #[inline]
    pub fn packed_index(&self) -> i32 {
        self.packed_index
    }

    /// Feature tested by this node (low 31 bits of the packed index).
    #[inline]
    pub fn split_feature(&self) -> u32 {
        self.split_feature
    }

    /// Whether missing values follow the left child.
    #[inline]
    pub fn default_left(&self) -> bool {
        self.default_left
    }

    /// Child followed when the tested feature is missing.
    #[inline]
    pub fn default_child(&self) -> i32 {
        self.default_child
    }

    /// Split threshold, if this is a split node.
    #[inline]
    pub fn threshold(&self) -> Option<f32> {
        match self.kind {
            NodeKind::Split { threshold } => Some(threshold),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Leaf output, if this is a leaf.
    #[inline]
    pub fn leaf_value(&self) -> Option<f32> {
        match self.kind {
            NodeKind::Leaf { value } => Some(value),
            NodeKind::Split { .. } => None,
        }
    }
}
