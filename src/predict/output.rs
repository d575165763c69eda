//! Projections from a reached leaf to a traversal result.

use crate::trees::NodeId;

/// Leaf reached by a walk: its position and its output value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafHit {
    pub node: NodeId,
    pub value: f32,
}

/// Maps the reached leaf to what the caller asked for.
///
/// Together with a [`FeatureLookup`](super::FeatureLookup) this covers every
/// traversal entry point with a single walk.
pub trait LeafProjection {
    type Output;

    fn project(&self, leaf: LeafHit) -> Self::Output;
}

/// Project to the leaf's node id.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafIndex;

impl LeafProjection for LeafIndex {
    type Output = NodeId;

    #[inline]
    fn project(&self, leaf: LeafHit) -> NodeId {
        leaf.node
    }
}

/// Project to the leaf's output value, unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafValue;

impl LeafProjection for LeafValue {
    type Output = f32;

    #[inline]
    fn project(&self, leaf: LeafHit) -> f32 {
        leaf.value
    }
}
