//! Root-to-leaf walk shared by every traversal entry point.

use crate::trees::{Node, NodeId, NodeKind};

use super::features::FeatureLookup;
use super::output::LeafHit;

/// Child a split node routes to for the given features.
///
/// Missing features follow the node's default child. Present values go left
/// only when strictly below `threshold`; ties and NaN go right.
#[inline]
pub fn next_child<F: FeatureLookup + ?Sized>(node: &Node, threshold: f32, features: &F) -> i32 {
    match features.present_value(node.split_feature()) {
        None => node.default_child(),
        Some(value) if value < threshold => node.left_child(),
        Some(_) => node.right_child(),
    }
}

/// Walk `nodes` from `root` until a leaf is reached.
///
/// # Panics
///
/// No structural checks are made. A child index outside `nodes` panics, and
/// a cyclic table never terminates. Trees decoded from a well-formed model
/// satisfy neither condition.
#[inline]
pub fn traverse_to_leaf<F: FeatureLookup + ?Sized>(
    nodes: &[Node],
    root: NodeId,
    features: &F,
) -> LeafHit {
    let mut idx = root;

    loop {
        let node = &nodes[idx as usize];
        match node.kind() {
            NodeKind::Leaf { value } => return LeafHit { node: idx, value },
            NodeKind::Split { threshold } => {
                // negative links wrap past the end of the table
                idx = next_child(node, threshold, features) as NodeId;
            }
        }
    }
}
