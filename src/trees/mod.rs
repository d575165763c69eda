//! Regression tree data structures and decoding.
//!
//! A serialized tree is three back-to-back sections:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header: 6 × i32 + 31 × i32 reserved (148 B)  │
//! ├──────────────────────────────────────────────┤
//! │ Nodes: num_nodes × 20 B                      │
//! │   i32 parent, i32 left, i32 right,           │
//! │   i32 packed split index, f32 value          │
//! ├──────────────────────────────────────────────┤
//! │ Stats: num_nodes × 16 B                      │
//! │   f32 loss_chg, f32 sum_hess,                │
//! │   f32 base_weight, i32 leaf_child_cnt        │
//! └──────────────────────────────────────────────┘
//! ```

pub mod node;
pub mod param;
pub mod regtree;
pub mod stat;

pub use node::{
    pack_split_index, Node, NodeId, NodeKind, NodeRecord, LEAF_SENTINEL, SPLIT_FEATURE_MASK,
};
pub use param::{TreeParam, HEADER_SIZE, RESERVED_SLOTS};
pub use regtree::RegTree;
pub use stat::NodeStat;
