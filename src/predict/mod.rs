//! Tree traversal for inference.
//!
//! Every entry point on [`RegTree`](crate::trees::RegTree) is one walk
//! ([`traverse_to_leaf`]) parameterised by two choices:
//!
//! | Input | Lookup |
//! |-------|--------|
//! | Dense vector | [`DenseFeatures`] (optional zero-as-missing) |
//! | Sparse map | [`SparseFeatures`] (NaN-as-missing) |
//!
//! | Output | Projection |
//! |--------|------------|
//! | Leaf node id | [`LeafIndex`] |
//! | Leaf value | [`LeafValue`] |
//!
//! Traversal never allocates, blocks, or fails; it only reads the tree, so
//! any number of threads may traverse one tree at the same time.

mod features;
mod output;
mod traversal;

#[cfg(feature = "ndarray")]
pub use features::ArrayFeatures;
pub use features::{DenseFeatures, FeatureLookup, SparseFeatures, SparseMap};
pub use output::{LeafHit, LeafIndex, LeafProjection, LeafValue};
pub use traversal::{next_child, traverse_to_leaf};
