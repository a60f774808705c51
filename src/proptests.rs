use super::*;

use crate::node::Node;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

fn validate_tree<V>(root: &Node<V>, len: usize) {
    let mut value_nodes = 0usize;
    root.walk(|node, _| {
        if node.has_value() {
            value_nodes += 1;
        }
        for pair in node.children().windows(2) {
            assert!(
                pair[0].edge() < pair[1].edge(),
                "children must be strictly ascending: {} then {}",
                pair[0].edge(),
                pair[1].edge()
            );
        }
    });
    assert_eq!(value_nodes, len, "value-bearing nodes must match Trie::len");
}

#[derive(Clone, Debug)]
enum Op<K> {
    Add(K, u32),
    Find(K),
}

fn op_sequence<S>(key: S) -> impl Strategy<Value = Vec<Op<S::Value>>>
where
    S: Strategy + Clone,
    S::Value: Clone,
{
    let op = prop_oneof![
        3 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Add(k, v)),
        2 => key.prop_map(Op::Find),
    ];
    prop::collection::vec(op, 0..=500)
}

// Short keys over a tiny alphabet so that operations collide often.
fn short_string() -> impl Strategy<Value = String> + Clone {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'A', '-', 'z']), 0..=6)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A slice key and an element to extend it with.
#[derive(Debug, Arbitrary)]
struct SliceCase {
    #[proptest(strategy = "prop::collection::vec(any::<i32>(), 1..=8)")]
    items: Vec<i32>,
    tail: i32,
}

/// Drive a trie and a `BTreeMap` model keyed by the trie's encoded bytes.
fn check_model<K>(
    trie: &mut Trie<K, u32>,
    ops: Vec<Op<K>>,
) -> std::result::Result<(), TestCaseError>
where
    K: TrieKey,
{
    let mut model: BTreeMap<Vec<u8>, u32> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Add(key, value) => {
                let encoded = trie.encoded_key(&key).unwrap();
                let expanded = trie.add(&key, value);
                prop_assert_eq!(expanded, model.insert(encoded, value).is_none());
            }
            Op::Find(key) => {
                let encoded = trie.encoded_key(&key).unwrap();
                prop_assert_eq!(trie.find(&key), model.get(&encoded));
            }
        }
        prop_assert_eq!(trie.len(), model.len());
    }

    validate_tree(trie.root_node(), trie.len());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_u16(ops in op_sequence(0u16..512)) {
        let mut trie: Trie<u16, u32> = Trie::new().unwrap();
        check_model(&mut trie, ops)?;
    }

    #[test]
    fn prop_equivalence_i64(ops in op_sequence(prop_oneof![any::<i64>(), -64i64..64])) {
        let mut trie: Trie<i64, u32> = Trie::new().unwrap();
        check_model(&mut trie, ops)?;
    }

    #[test]
    fn prop_equivalence_u32_slices(ops in op_sequence(prop::collection::vec(0u32..4, 0..=4))) {
        let mut trie: Trie<Vec<u32>, u32> = Trie::new().unwrap();
        check_model(&mut trie, ops)?;
    }

    #[test]
    fn prop_equivalence_strings(ops in op_sequence(short_string())) {
        let mut trie: Trie<str, u32> = Trie::new().unwrap();
        let mut model: HashMap<String, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    let expanded = trie.add(&key, value);
                    prop_assert_eq!(expanded, model.insert(key, value).is_none());
                }
                Op::Find(key) => {
                    prop_assert_eq!(trie.find(&key), model.get(&key));
                }
            }
            prop_assert_eq!(trie.len(), model.len());
        }

        validate_tree(trie.root_node(), trie.len());
    }

    #[test]
    fn prop_normalized_strings(ops in op_sequence(short_string())) {
        let mut trie: Trie<str, u32> =
            Trie::with_transforms([Transform::strip(b"-"), Transform::ascii_lowercase()]).unwrap();
        let mut model: HashMap<String, u32> = HashMap::new();
        let normalize = |key: &str| key.replace('-', "").to_ascii_lowercase();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    let expanded = trie.add(&key, value);
                    prop_assert_eq!(expanded, model.insert(normalize(&key), value).is_none());
                }
                Op::Find(key) => {
                    prop_assert_eq!(trie.find(&key), model.get(&normalize(&key)));
                }
            }
        }

        prop_assert_eq!(trie.len(), model.len());
        validate_tree(trie.root_node(), trie.len());
    }

    #[test]
    fn prop_slice_prefixes_are_distinct(case in any::<SliceCase>()) {
        let SliceCase { items, tail } = case;
        let mut trie: Trie<[i32], usize> = Trie::new().unwrap();
        trie.add(&items, items.len());

        prop_assert_eq!(trie.find(&items), Some(&items.len()));
        prop_assert_eq!(trie.find(&items[..items.len() - 1]), None);

        let mut longer = items.clone();
        longer.push(tail);
        prop_assert_eq!(trie.find(&longer), None);
    }
}

#[test]
fn shuffled_insert_order() {
    let keys: Vec<String> = (0..5_000)
        .map(|i| format!("domain{}.com/path/{}/item{}", i % 50, i / 50, i))
        .collect();

    for seed in [1u64, 7, 42] {
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));

        let mut trie: Trie<str, usize> = Trie::new().unwrap();
        for &i in &order {
            assert!(trie.add(&keys[i], i));
        }
        assert_eq!(trie.len(), keys.len());

        for (i, key) in keys.iter().enumerate() {
            assert_eq!(trie.find(key), Some(&i), "seed {seed}, key {key}");
        }
        validate_tree(trie.root_node(), trie.len());
    }
}

#[test]
fn every_u8_key() {
    let mut order: Vec<u8> = (0..=255).collect();
    order.shuffle(&mut StdRng::seed_from_u64(3));

    let mut trie: Trie<u8, u8> = Trie::new().unwrap();
    for &key in &order {
        assert!(trie.add(&key, !key));
    }
    for key in 0..=255u8 {
        assert_eq!(trie.find(&key), Some(&!key));
    }
    assert_eq!(trie.len(), 256);
    validate_tree(trie.root_node(), trie.len());
}
