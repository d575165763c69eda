//! Decoded regression tree and its traversal entry points.

use std::io::Read;

use byteorder::ByteOrder;
use log::{debug, trace};

use crate::error::Result;
use crate::io::ModelReader;
use crate::predict::{
    traverse_to_leaf, DenseFeatures, FeatureLookup, LeafIndex, LeafProjection, LeafValue,
    SparseFeatures, SparseMap,
};

use super::node::{Node, NodeId};
use super::param::TreeParam;
use super::stat::NodeStat;

/// A single regression tree, immutable once loaded.
///
/// Nodes live in one array and refer to each other by index; node `i` is the
/// `i`-th record of the stream. The tree is `Send + Sync` and traversal only
/// reads it, so one instance can serve many threads without locking.
///
/// # Preconditions
///
/// Topology is not validated. Traversing a tree whose child indices are out
/// of range panics, and a cyclic tree never terminates. Models written by a
/// correct trainer have neither problem.
///
/// # Example
///
/// ```
/// use boosters_regtree::testing::stump;
/// use boosters_regtree::RegTree;
///
/// // root: feature 0 < 3.0 ? 1.0 : 2.0
/// let bytes = stump(0, 3.0, true, 1.0, 2.0);
/// let tree = RegTree::from_bytes(&bytes).unwrap();
///
/// assert_eq!(tree.leaf_value_dense(&[5.0], false), 2.0);
/// assert_eq!(tree.leaf_index_dense(&[1.0], false, 0), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RegTree {
    param: TreeParam,
    nodes: Box<[Node]>,
    stats: Box<[NodeStat]>,
}

impl RegTree {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Decode header, node table and stat table, in that order.
    ///
    /// The first failed read aborts the load. On success the reader is
    /// positioned immediately after this tree, ready for whatever follows.
    pub fn load<R: Read, E: ByteOrder>(reader: &mut ModelReader<R, E>) -> Result<Self> {
        let start = reader.position();
        let param = TreeParam::read_from(reader)?;
        let num_nodes = param.node_count()?;
        debug!(
            "decoded tree header: num_roots={}, num_nodes={}, num_deleted={}, max_depth={}, num_feature={}",
            param.num_roots, param.num_nodes, param.num_deleted, param.max_depth, param.num_feature
        );

        let nodes = (0..num_nodes)
            .map(|_| Node::read_from(reader))
            .collect::<Result<Box<[_]>>>()?;
        trace!("decoded {num_nodes} nodes, offset {}", reader.position());

        let stats = (0..num_nodes)
            .map(|_| NodeStat::read_from(reader))
            .collect::<Result<Box<[_]>>>()?;
        trace!("decoded {num_nodes} node stats, offset {}", reader.position());

        let tree = Self {
            param,
            nodes,
            stats,
        };
        debug!(
            "loaded regression tree: {} nodes, {} leaves, {} bytes",
            tree.num_nodes(),
            tree.num_leaves(),
            reader.position() - start
        );
        Ok(tree)
    }

    /// Decode a tree from any little-endian byte source.
    pub fn from_reader<R: Read>(inner: R) -> Result<Self> {
        Self::load(&mut ModelReader::new(inner))
    }

    /// Decode a tree from an in-memory buffer. Trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn param(&self) -> &TreeParam {
        &self.param
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Training statistics, one per node in node order.
    #[inline]
    pub fn stats(&self) -> &[NodeStat] {
        &self.stats
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    /// Stat by node id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    pub fn stat(&self, id: NodeId) -> &NodeStat {
        &self.stats[id as usize]
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Walk from `root` with any feature source and return the leaf id.
    #[inline]
    pub fn traverse<F: FeatureLookup + ?Sized>(&self, root: NodeId, features: &F) -> NodeId {
        self.predict_from(root, features, LeafIndex)
    }

    /// Walk from `root` with any feature source and project the leaf.
    #[inline]
    pub fn predict_from<F, P>(&self, root: NodeId, features: &F, projection: P) -> P::Output
    where
        F: FeatureLookup + ?Sized,
        P: LeafProjection,
    {
        projection.project(traverse_to_leaf(&self.nodes, root, features))
    }

    /// Leaf id reached from `root_id` for a dense feature vector.
    ///
    /// Features past the end of `values` follow the default branch, as does an
    /// exact `0.0` when `treat_zero_as_missing` is set.
    #[inline]
    pub fn leaf_index_dense(
        &self,
        values: &[f32],
        treat_zero_as_missing: bool,
        root_id: NodeId,
    ) -> NodeId {
        self.predict_from(
            root_id,
            &DenseFeatures::new(values, treat_zero_as_missing),
            LeafIndex,
        )
    }

    /// Leaf id reached from `root_id` for a sparse feature map.
    ///
    /// Absent keys and NaN values follow the default branch.
    #[inline]
    pub fn leaf_index_sparse<M: SparseMap + ?Sized>(&self, values: &M, root_id: NodeId) -> NodeId {
        self.predict_from(root_id, &SparseFeatures(values), LeafIndex)
    }

    /// Leaf value reached from the first root for a dense feature vector.
    #[inline]
    pub fn leaf_value_dense(&self, values: &[f32], treat_zero_as_missing: bool) -> f32 {
        self.predict_from(
            0,
            &DenseFeatures::new(values, treat_zero_as_missing),
            LeafValue,
        )
    }

    /// Leaf value reached from the first root for a sparse feature map.
    #[inline]
    pub fn leaf_value_sparse<M: SparseMap + ?Sized>(&self, values: &M) -> f32 {
        self.predict_from(0, &SparseFeatures(values), LeafValue)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::DecodeError;
    use crate::testing::{leaf_record, split_record, stump, TreeWriter};
    use crate::trees::{TreeParam, HEADER_SIZE};

    #[test]
    fn load_consumes_exact_layout() {
        let bytes = stump(0, 3.0, false, 1.0, 2.0);
        assert_eq!(bytes.len(), HEADER_SIZE + 3 * 20 + 3 * 16);

        let mut reader = ModelReader::new(bytes.as_slice());
        let tree = RegTree::load(&mut reader).unwrap();

        assert_eq!(reader.position(), bytes.len() as u64);
        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.stats().len(), 3);
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.param().num_nodes, 3);
    }

    #[test]
    fn leaf_flags_follow_left_child() {
        let tree = RegTree::from_bytes(&stump(2, 0.5, true, -1.0, 1.0)).unwrap();
        for node in tree.nodes() {
            assert_eq!(node.is_leaf(), node.left_child() == -1);
            assert_eq!(node.leaf_value().is_some(), node.is_leaf());
            assert_eq!(node.threshold().is_some(), !node.is_leaf());
        }
    }

    #[test]
    fn truncated_anywhere_fails() {
        let bytes = stump(0, 3.0, false, 1.0, 2.0);
        for cut in [0, 100, HEADER_SIZE, HEADER_SIZE + 19, bytes.len() - 1] {
            let err = RegTree::from_bytes(&bytes[..cut]).unwrap_err();
            assert!(matches!(err, DecodeError::ShortRead { .. }), "cut {cut}: {err:?}");
        }
    }

    #[test]
    fn negative_node_count_fails_before_node_table() {
        let mut writer = TreeWriter::new();
        writer.param(&TreeParam {
            num_nodes: -1,
            ..Default::default()
        });
        let err = RegTree::from_bytes(&writer.into_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::NegativeCount { value: -1, .. }));
    }

    #[test]
    fn value_and_index_entry_points_agree() {
        let tree = RegTree::from_bytes(&stump(0, 3.0, true, 1.0, 2.0)).unwrap();
        let sparse: HashMap<u32, f32> = [(0, 1.0)].into_iter().collect();

        let idx = tree.leaf_index_sparse(&sparse, 0);
        assert_eq!(tree.node(idx).leaf_value(), Some(tree.leaf_value_sparse(&sparse)));
        assert_eq!(idx, 1);
    }

    #[test]
    fn multiple_roots_are_independent() {
        // Two stumps sharing one node table; roots are nodes 0 and 1.
        let records = [
            split_record(-1, 2, 3, 0, false, 0.0),
            split_record(-1, 4, 5, 1, true, 10.0),
            leaf_record(0, -1.0),
            leaf_record(0, 1.0),
            leaf_record(1, -2.0),
            leaf_record(1, 2.0),
        ];
        let bytes = TreeWriter::encode(2, &records);
        let tree = RegTree::from_bytes(&bytes).unwrap();
        assert_eq!(tree.param().num_roots, 2);

        let row = [1.0f32, 5.0];
        assert_eq!(tree.leaf_index_dense(&row, false, 0), 3);
        assert_eq!(tree.leaf_index_dense(&row, false, 1), 4);
        // feature 1 missing at root 1 -> default left
        assert_eq!(tree.leaf_index_dense(&row[..1], false, 1), 4);
    }

    #[test]
    fn tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RegTree>();
    }
}
