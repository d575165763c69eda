//! Property tests for the tree decoder.
//!
//! Arbitrary headers and node records are encoded with `TreeWriter` and
//! decoded back; the derived node fields must agree with the raw record.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use boosters_regtree::testing::TreeWriter;
use boosters_regtree::trees::{NodeRecord, RESERVED_SLOTS};
use boosters_regtree::{DecodeError, NodeStat, RegTree, TreeParam};

// =============================================================================
// Strategies
// =============================================================================

fn arb_record() -> impl Strategy<Value = NodeRecord> {
    (
        any::<i32>(),
        prop_oneof![Just(-1i32), 0..64i32, any::<i32>()],
        any::<i32>(),
        any::<i32>(),
        any::<f32>(),
    )
        .prop_map(|(parent, left_child, right_child, packed_index, value)| NodeRecord {
            parent,
            left_child,
            right_child,
            packed_index,
            value,
        })
}

fn arb_stat() -> impl Strategy<Value = NodeStat> {
    (any::<f32>(), any::<f32>(), any::<f32>(), any::<i32>()).prop_map(
        |(loss_chg, sum_hess, base_weight, leaf_child_cnt)| NodeStat {
            loss_chg,
            sum_hess,
            base_weight,
            leaf_child_cnt,
        },
    )
}

fn arb_tree() -> impl Strategy<Value = (TreeParam, Vec<NodeRecord>, Vec<NodeStat>)> {
    (1usize..24).prop_flat_map(|n| {
        (
            any::<[i32; 5]>(),
            prop_vec(any::<i32>(), RESERVED_SLOTS),
            prop_vec(arb_record(), n),
            prop_vec(arb_stat(), n),
        )
            .prop_map(move |(counts, reserved, records, stats)| {
                let mut block = [0i32; RESERVED_SLOTS];
                block.copy_from_slice(&reserved);
                let param = TreeParam {
                    num_roots: counts[0],
                    num_nodes: n as i32,
                    num_deleted: counts[1],
                    max_depth: counts[2],
                    num_feature: counts[3],
                    size_leaf_vector: counts[4],
                    reserved: block,
                };
                (param, records, stats)
            })
    })
}

fn encode(param: &TreeParam, records: &[NodeRecord], stats: &[NodeStat]) -> Vec<u8> {
    let mut writer = TreeWriter::new();
    writer.param(param);
    for record in records {
        writer.node(record);
    }
    for stat in stats {
        writer.stat(stat);
    }
    writer.into_bytes()
}

/// Bitwise float equality so NaN payloads compare.
fn same_bits(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every header, node and stat field decodes to the value written.
    #[test]
    fn decode_preserves_fields((param, records, stats) in arb_tree()) {
        let bytes = encode(&param, &records, &stats);
        let tree = RegTree::from_bytes(&bytes).unwrap();

        prop_assert_eq!(tree.param(), &param);
        prop_assert_eq!(tree.num_nodes(), records.len());
        for (node, record) in tree.nodes().iter().zip(&records) {
            let decoded = node.record();
            prop_assert_eq!(decoded.parent, record.parent);
            prop_assert_eq!(decoded.left_child, record.left_child);
            prop_assert_eq!(decoded.right_child, record.right_child);
            prop_assert_eq!(decoded.packed_index, record.packed_index);
            prop_assert!(same_bits(decoded.value, record.value));
        }
        for (stat, expected) in tree.stats().iter().zip(&stats) {
            prop_assert!(same_bits(stat.loss_chg, expected.loss_chg));
            prop_assert!(same_bits(stat.sum_hess, expected.sum_hess));
            prop_assert!(same_bits(stat.base_weight, expected.base_weight));
            prop_assert_eq!(stat.leaf_child_cnt, expected.leaf_child_cnt);
        }
    }

    /// Derived fields are consistent with the raw record.
    #[test]
    fn derived_fields_follow_raw_record((param, records, stats) in arb_tree()) {
        let tree = RegTree::from_bytes(&encode(&param, &records, &stats)).unwrap();

        for (node, record) in tree.nodes().iter().zip(&records) {
            prop_assert_eq!(node.is_leaf(), record.left_child == -1);
            prop_assert_eq!(node.leaf_value().is_some(), node.is_leaf());
            prop_assert_eq!(node.threshold().is_some(), !node.is_leaf());
            prop_assert_eq!(node.split_feature(), record.packed_index as u32 & 0x7FFF_FFFF);
            prop_assert_eq!(node.default_left(), record.packed_index < 0);
            let expected_default = if record.packed_index < 0 {
                record.left_child
            } else {
                record.right_child
            };
            prop_assert_eq!(node.default_child(), expected_default);
        }
    }

    /// Any strict prefix of a valid stream fails with a short read.
    #[test]
    fn every_prefix_is_rejected(
        (param, records, stats) in arb_tree(),
        frac in 0.0f64..1.0,
    ) {
        let bytes = encode(&param, &records, &stats);
        let cut = ((bytes.len() as f64) * frac) as usize;
        let result = RegTree::from_bytes(&bytes[..cut]);
        let short_read = matches!(result, Err(DecodeError::ShortRead { .. }));
        prop_assert!(short_read, "cut at {}: {:?}", cut, result);
    }
}
