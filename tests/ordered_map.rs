use ordered_collection::ordered_map;
use ordered_collection::{Error, OrderedMap, Position};
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys are drawn from a narrow range so inserts collide with existing keys.
fn key_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn position_strategy() -> impl Strategy<Value = isize> {
    -700isize..700isize
}

/// Insertion-ordered reference model backed by a plain vector.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(i64, i64)>,
}

impl Model {
    fn find(&self, key: i64) -> Option<usize> {
        self.entries.iter().position(|&(k, _)| k == key)
    }

    fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        match self.find(key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    fn remove(&mut self, key: i64) -> Option<i64> {
        self.find(key).map(|i| self.entries.remove(i).1)
    }

    fn resolve(&self, index: isize) -> Option<usize> {
        let len = isize::try_from(self.entries.len()).unwrap();
        let index = if index < 0 { index + len } else { index };
        if (0..len).contains(&index) { usize::try_from(index).ok() } else { None }
    }

    fn get_position(&self, index: isize) -> Option<(i64, i64)> {
        self.resolve(index).map(|i| self.entries[i])
    }

    fn move_position(&mut self, from: isize, to: isize) -> bool {
        match (self.resolve(from), self.resolve(to)) {
            (Some(from), Some(to)) => {
                let entry = self.entries.remove(from);
                self.entries.insert(to, entry);
                true
            }
            _ => false,
        }
    }

    fn swap_positions(&mut self, a: isize, b: isize) -> bool {
        match (self.resolve(a), self.resolve(b)) {
            (Some(a), Some(b)) => {
                self.entries.swap(a, b);
                true
            }
            _ => false,
        }
    }
}

fn snapshot(map: &OrderedMap<i64, i64>) -> Vec<(i64, i64)> {
    map.iter().map(|(&k, &v)| (k, v)).collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    TryInsert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    PositionOf(i64),
    GetPosition(isize),
    MovePosition(isize, isize),
    SwapPositions(isize, isize),
    First,
    Last,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        1 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::TryInsert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::PositionOf),
        2 => position_strategy().prop_map(MapOp::GetPosition),
        1 => (position_strategy(), position_strategy()).prop_map(|(a, b)| MapOp::MovePosition(a, b)),
        1 => (position_strategy(), position_strategy()).prop_map(|(a, b)| MapOp::SwapPositions(a, b)),
        1 => Just(MapOp::First),
        1 => Just(MapOp::Last),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both `OrderedMap` and the
    /// vector model and asserts identical results and order at every step.
    #[test]
    fn map_ops_match_model(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map: OrderedMap<i64, i64> = OrderedMap::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert({}, {})", k, v);
                }
                MapOp::TryInsert(k, v) => {
                    let expected = match model.find(k) {
                        Some(position) => Err(Error::Occupied { position }),
                        None => {
                            model.insert(k, v);
                            Ok(v)
                        }
                    };
                    prop_assert_eq!(map.try_insert(k, v).map(|v| *v), expected, "try_insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    let expected = model.find(k).map(|i| model.entries[i].1);
                    prop_assert_eq!(map.get(&k).copied(), expected, "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(map.contains_key(&k), model.find(k).is_some(), "contains_key({})", k);
                }
                MapOp::PositionOf(k) => {
                    prop_assert_eq!(map.position_of(&k), model.find(k), "position_of({})", k);
                }
                MapOp::GetPosition(i) => {
                    let actual = map.get_position(i).map(|(&k, &v)| (k, v));
                    prop_assert_eq!(actual, model.get_position(i), "get_position({})", i);
                }
                MapOp::MovePosition(a, b) => {
                    prop_assert_eq!(map.move_position(a, b).is_ok(), model.move_position(a, b), "move_position({}, {})", a, b);
                }
                MapOp::SwapPositions(a, b) => {
                    prop_assert_eq!(map.swap_positions(a, b).is_ok(), model.swap_positions(a, b), "swap_positions({}, {})", a, b);
                }
                MapOp::First => {
                    prop_assert_eq!(map.first().map(|(&k, &v)| (k, v)), model.entries.first().copied());
                }
                MapOp::Last => {
                    prop_assert_eq!(map.last().map(|(&k, &v)| (k, v)), model.entries.last().copied());
                }
            }
            prop_assert_eq!(map.len(), model.entries.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(map.is_empty(), model.entries.is_empty(), "is_empty mismatch after {:?}", op);
        }

        prop_assert_eq!(snapshot(&map), model.entries);
    }

    /// Iteration in every flavour follows insertion order.
    #[test]
    fn iter_matches_model(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let mut map: OrderedMap<i64, i64> = OrderedMap::new();
        let mut model = Model::default();
        for &(k, v) in &entries {
            map.insert(k, v);
            model.insert(k, v);
        }

        prop_assert_eq!(snapshot(&map), model.entries.clone());

        let rev: Vec<_> = map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let model_rev: Vec<_> = model.entries.iter().rev().copied().collect();
        prop_assert_eq!(rev, model_rev);

        let keys: Vec<_> = map.keys().copied().collect();
        let model_keys: Vec<_> = model.entries.iter().map(|&(k, _)| k).collect();
        prop_assert_eq!(&keys, &model_keys);

        let values: Vec<_> = map.values().copied().collect();
        let model_values: Vec<_> = model.entries.iter().map(|&(_, v)| v).collect();
        prop_assert_eq!(&values, &model_values);

        prop_assert_eq!(map.clone().into_iter().collect::<Vec<_>>(), model.entries.clone());
        prop_assert_eq!(map.clone().into_keys().collect::<Vec<_>>(), model_keys);
        prop_assert_eq!(map.into_values().collect::<Vec<_>>(), model_values);
    }

    /// `retain` keeps survivors in their original order.
    #[test]
    fn retain_matches_model(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..500)) {
        let mut map: OrderedMap<i64, i64> = entries.iter().copied().collect();
        let mut model = Model::default();
        for &(k, v) in &entries {
            model.insert(k, v);
        }

        map.retain(|k, v| {
            *v = v.wrapping_add(1);
            k % 3 != 0
        });
        model.entries.retain(|&(k, _)| k % 3 != 0);
        for entry in &mut model.entries {
            entry.1 = entry.1.wrapping_add(1);
        }

        prop_assert_eq!(snapshot(&map), model.entries);
    }
}

// ─── Overwrite and removal keep order ────────────────────────────────────────

#[test]
fn overwrite_keeps_position() {
    let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(map.insert("a", 10), Some(1));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(map["a"], 10);
}

#[test]
fn remove_shifts_later_entries() {
    let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    assert_eq!(map.remove_entry("b"), Some(("b", 2)));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "c", "d"]);
    assert_eq!(map.position_of("d"), Some(2));

    map.insert("b", 5);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "c", "d", "b"]);
}

#[test]
fn entry_vacant_appends() {
    let mut map = OrderedMap::from([("a", 1)]);
    *map.entry("b").or_insert(0) += 2;
    *map.entry("a").or_insert(0) += 2;
    assert_eq!(map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(), [("a", 3), ("b", 2)]);

    match map.entry("a") {
        ordered_map::Entry::Occupied(entry) => assert_eq!(entry.shift_remove(), 3),
        ordered_map::Entry::Vacant(_) => unreachable!(),
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b"]);
}

#[test]
fn try_insert_leaves_existing_value() {
    let mut map = OrderedMap::new();
    *map.try_insert("a", 1).unwrap() += 1;
    assert_eq!(map.try_insert("a", 9), Err(Error::Occupied { position: 0 }));
    assert_eq!(map["a"], 2);
    assert_eq!(map.len(), 1);
}

#[test]
fn errors_render_messages() {
    assert_eq!(Error::Occupied { position: 4 }.to_string(), "key is already present at position 4");
    assert_eq!(
        Error::OutOfBounds { index: -9, len: 3 }.to_string(),
        "position -9 is out of bounds for a collection of length 3"
    );
}

// ─── Positional operations ───────────────────────────────────────────────────

#[test]
fn position_index_reads_and_writes() {
    let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(map[Position::FIRST], 1);
    assert_eq!(map[Position::LAST], 3);
    map[Position(-2)] *= 10;
    assert_eq!(map["b"], 20);
}

#[test]
fn move_and_swap_reject_out_of_bounds() {
    let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
    assert_eq!(map.move_position(0, 2), Err(Error::OutOfBounds { index: 2, len: 2 }));
    assert_eq!(map.swap_positions(-3, 0), Err(Error::OutOfBounds { index: -3, len: 2 }));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "b"]);

    map.move_position(-1, 0).unwrap();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);
}

#[test]
fn positions_on_empty_map() {
    let mut map: OrderedMap<i32, i32> = OrderedMap::new();
    assert!(map.get_position(0).is_none());
    assert!(map.get_position(-1).is_none());
    assert!(map.get_position_mut(0).is_none());
    assert_eq!(map.move_position(0, 0), Err(Error::OutOfBounds { index: 0, len: 0 }));
}

#[test]
#[should_panic(expected = "position out of bounds")]
fn index_position_out_of_bounds_panics() {
    let map = OrderedMap::from([(1, 1)]);
    let _ = map[Position(1)];
}

#[test]
#[should_panic(expected = "position out of bounds")]
fn index_mut_position_out_of_bounds_panics() {
    let mut map = OrderedMap::from([(1, 1)]);
    map[Position(-2)] = 5;
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map = OrderedMap::from([(1, 1)]);
    let _ = map[&2];
}

// ─── Trait impls ─────────────────────────────────────────────────────────────

#[test]
fn equality_and_ordering_depend_on_order() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(map: &OrderedMap<i32, i32>) -> u64 {
        let mut hasher = DefaultHasher::new();
        map.hash(&mut hasher);
        hasher.finish()
    }

    let a = OrderedMap::from([(1, 10), (2, 20)]);
    let b = OrderedMap::from([(2, 20), (1, 10)]);
    let c = OrderedMap::from([(1, 10), (2, 20)]);

    assert_ne!(a, b);
    assert_eq!(a, c);
    assert_eq!(hash_of(&a), hash_of(&c));
    assert!(a < b);
}

#[test]
fn capacity_default_from_array_and_extend_refs() {
    let mut map: OrderedMap<i32, i32> = OrderedMap::with_capacity(16);
    assert!(map.capacity() >= 16);
    assert!(map.is_empty());

    let source = OrderedMap::from([(3, 30), (1, 10)]);
    map.extend(&source);
    map.extend([(2, 20)]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 1, 2]);

    map.clear();
    map.shrink_to_fit();
    map.reserve(4);
    assert!(map.capacity() >= 4);
    assert_eq!(OrderedMap::<i32, i32>::default(), map);
}

#[test]
fn debug_lists_entries_in_order() {
    let map = OrderedMap::from([("b", 2), ("a", 1)]);
    assert_eq!(format!("{map:?}"), r#"{"b": 2, "a": 1}"#);
}

#[test]
fn iter_mut_and_values_mut_write_through() {
    let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
    for (_, v) in &mut map {
        *v += 1;
    }
    for v in map.values_mut() {
        *v *= 10;
    }
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [20, 30]);
}

// ─── Thread Safety Tests ──────────────────────────────────────────────────────

/// Compile-time assertions for Send/Sync bounds on the map and its iterators.
mod send_sync_tests {
    use ordered_collection::OrderedMap;
    use ordered_collection::ordered_map::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn map_is_send_sync() {
        assert_send::<OrderedMap<i64, i64>>();
        assert_sync::<OrderedMap<i64, i64>>();
    }

    #[test]
    fn iterators_are_send() {
        assert_send::<Iter<'_, i64, i64>>();
        assert_sync::<Iter<'_, i64, i64>>();
        assert_send::<IterMut<'_, i64, i64>>();
        assert_send::<IntoIter<i64, i64>>();
        assert_send::<Keys<'_, i64, i64>>();
        assert_send::<Values<'_, i64, i64>>();
        assert_send::<ValuesMut<'_, i64, i64>>();
    }
}

// ─── Drop Semantics Tests ─────────────────────────────────────────────────────

mod drop_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use ordered_collection::OrderedMap;

    struct Droppable {
        drop_count: Rc<Cell<i32>>,
    }

    impl Drop for Droppable {
        fn drop(&mut self) {
            self.drop_count.set(self.drop_count.get() + 1);
        }
    }

    #[test]
    fn values_dropped_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut map = OrderedMap::new();
            for i in 0..10 {
                map.insert(i, Droppable { drop_count: Rc::clone(&drops) });
            }
            drop(map.remove(&3));
            assert_eq!(drops.get(), 1);

            // Overwriting drops the replaced value.
            drop(map.insert(4, Droppable { drop_count: Rc::clone(&drops) }));
            assert_eq!(drops.get(), 2);
        }
        assert_eq!(drops.get(), 11);
    }

    #[test]
    fn retain_drops_rejected() {
        let drops = Rc::new(Cell::new(0));
        let mut map = OrderedMap::new();
        for i in 0..6 {
            map.insert(i, Droppable { drop_count: Rc::clone(&drops) });
        }
        map.retain(|k, _| k % 2 == 0);
        assert_eq!(drops.get(), 3);
        map.clear();
        assert_eq!(drops.get(), 6);
    }
}
