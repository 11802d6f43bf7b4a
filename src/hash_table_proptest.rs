#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// the arena alongside the public surface.

use crate::error::HashTableError;
use crate::hash::{Djb2, StringHasher};
use crate::hash_table::HashTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    GetOrFail(usize),
    Contains(usize),
    Delete(usize),
    DeleteOrFail(usize),
    Resize(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z_0-9]{0,6}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            1 => idx.clone().prop_map(OpI::Get),
            1 => idx.clone().prop_map(OpI::GetOrFail),
            1 => idx.clone().prop_map(OpI::Contains),
            1 => idx.clone().prop_map(OpI::Delete),
            1 => idx.clone().prop_map(OpI::DeleteOrFail),
            1 => (1usize..=40).prop_map(OpI::Resize),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_state_machine<H: StringHasher>(
    mut sut: HashTable<i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut slots = sut.get_num_slots();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let prev = sut.put(k.as_str(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                // Round-trip through the strict accessor.
                prop_assert_eq!(sut.get_or_fail(k), Ok(&v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::GetOrFail(i) => {
                let k = &pool[i];
                match sut.get_or_fail(k) {
                    Ok(v) => prop_assert_eq!(Some(v), model.get(k)),
                    Err(HashTableError::KeyNotFound { key }) => {
                        prop_assert_eq!(&key, k);
                        prop_assert!(!model.contains_key(k));
                    }
                    Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                }
            }
            OpI::Contains(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.delete(k), model.remove(k));
            }
            OpI::DeleteOrFail(i) => {
                let k = &pool[i];
                match (sut.delete_or_fail(k), model.remove(k)) {
                    (Ok(v), Some(mv)) => prop_assert_eq!(v, mv),
                    (Err(HashTableError::KeyNotFound { .. }), None) => {}
                    (got, want) => prop_assert!(false, "got {:?}, model {:?}", got, want),
                }
            }
            OpI::Resize(n) => {
                let before: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                sut.resize(n).expect("relaxed policy accepts non-zero");
                slots = n;
                let after: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                prop_assert_eq!(before, after);
            }
            OpI::Iterate => {
                let indices: Vec<usize> = sut.keys().map(|k| sut.hash_index(k)).collect();
                prop_assert!(indices.windows(2).all(|w| w[0] <= w[1]));
                let s: BTreeMap<&str, i32> = sut.iter().map(|(k, v)| (k, *v)).collect();
                let m: BTreeMap<&str, i32> =
                    model.iter().map(|(k, v)| (k.as_str(), *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.size(), model.len());
        prop_assert_eq!(sut.items().len(), sut.size());
        prop_assert_eq!(sut.nodes_len(), sut.size());
        prop_assert_eq!(sut.get_num_slots(), slots);
        prop_assert_eq!(sut.capacity(), slots);
        prop_assert_eq!(
            sut.get_load_factor(),
            sut.size() as f64 / slots as f64
        );
        for (k, _) in sut.iter() {
            prop_assert!(sut.hash_index(k) < slots);
        }
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// - put returns the displaced value and is immediately readable strictly.
// - lenient/strict lookups and deletes agree with the model.
// - resize preserves the mapping and sets the slot count.
// - size == items().len() == arena occupancy; load factor == size / slots.
// - enumeration walks buckets in ascending index order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(HashTable::new(8).unwrap(), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_djb2((pool, ops) in arb_scenario()) {
        run_state_machine(HashTable::with_hasher(8, Djb2).unwrap(), &pool, ops)?;
    }
}

// Constant hasher: every key lands in bucket 0, so every op goes through
// the longest possible chain.
#[derive(Clone, Default)]
struct ConstHasher;
impl StringHasher for ConstHasher {
    fn hash(&self, _bytes: &[u8]) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions. Enumeration order
// then equals first-insertion order of the live keys.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(HashTable::with_hasher(8, ConstHasher).unwrap(), &pool, ops)?;
    }

    #[test]
    fn prop_single_chain_keeps_insertion_order(keys in proptest::collection::vec("[a-z]{1,4}", 0..30)) {
        let mut t = HashTable::with_hasher(8, ConstHasher).unwrap();
        let mut order: Vec<String> = Vec::new();
        for (i, k) in keys.iter().enumerate() {
            if t.put(k.as_str(), i).is_none() {
                order.push(k.clone());
            }
        }
        let got: Vec<&str> = t.keys().collect();
        let want: Vec<&str> = order.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }
}

// Property: putting the same pair twice leaves items() identical to a single put.
proptest! {
    #[test]
    fn prop_put_is_idempotent(
        seed in proptest::collection::vec(("[a-z]{1,5}", any::<i16>()), 0..20),
        key in "[a-z]{1,5}",
        value in any::<i16>(),
    ) {
        let mut once = HashTable::new(8).unwrap();
        once.extend(seed.iter().map(|(k, v)| (k.as_str(), *v)));
        let mut twice = HashTable::new(8).unwrap();
        twice.extend(seed.iter().map(|(k, v)| (k.as_str(), *v)));

        once.put(key.as_str(), value);
        twice.put(key.as_str(), value);
        twice.put(key.as_str(), value);
        prop_assert_eq!(once.items(), twice.items());
        prop_assert_eq!(once.size(), twice.size());
    }

    #[test]
    fn prop_resize_round_trip(
        entries in proptest::collection::vec(("[a-z]{1,6}", any::<u32>()), 0..40),
        grow in 8usize..64,
    ) {
        let mut t = HashTable::new(8).unwrap();
        t.extend(entries.iter().map(|(k, v)| (k.as_str(), *v)));
        let size = t.size();
        t.resize(grow).unwrap();
        t.resize(8).unwrap();
        prop_assert_eq!(t.size(), size);
        for (k, _) in &entries {
            let want = entries.iter().rev().find(|(kk, _)| kk == k).map(|(_, v)| v);
            prop_assert_eq!(t.get(k), want);
        }
    }
}
