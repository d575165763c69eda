//! boosters-regtree: decoding and traversal of XGBoost-style regression trees.
//!
//! This crate reads a single regression tree from the legacy binary model
//! layout and walks it to a leaf for a feature row. It is the per-tree
//! primitive an ensemble scorer is built on; combining trees, objectives and
//! output transforms are left to the caller.
//!
//! # Key Types
//!
//! - [`RegTree`] - Decoded, immutable tree with the traversal entry points
//! - [`ModelReader`] - Sequential little-endian primitive reader
//! - [`DecodeError`] - The only failure this crate reports
//!
//! # Loading
//!
//! ```
//! use boosters_regtree::{ModelReader, RegTree};
//! # let bytes = boosters_regtree::testing::stump(0, 3.0, true, 1.0, 2.0);
//!
//! let mut reader = ModelReader::new(bytes.as_slice());
//! let tree = RegTree::load(&mut reader)?;
//! assert_eq!(tree.leaf_value_dense(&[3.0], false), 2.0);
//! # Ok::<(), boosters_regtree::DecodeError>(())
//! ```
//!
//! Several trees stored back-to-back can be read from the same reader; each
//! `load` leaves it positioned after the tree it decoded.

pub mod error;
pub mod io;
pub mod predict;
pub mod testing;
pub mod trees;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::{DecodeError, Result};
pub use io::ModelReader;
pub use predict::{DenseFeatures, FeatureLookup, SparseFeatures, SparseMap};
pub use trees::{Node, NodeId, NodeKind, NodeStat, RegTree, TreeParam};
