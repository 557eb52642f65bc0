//! Property-based tests using proptest
//!
//! These tests run random sequences of operations against the heap and a
//! plain model of its contents, and check both invariants after every step.

use idxheap::IndexedMinHeap;
use proptest::prelude::*;

const UNIVERSE: usize = 24;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, i32),
    InsertAll(Vec<(usize, i32)>),
    ExtractMin,
    ChangePriority(usize, i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let element = 0..UNIVERSE;
    let priority = -50i32..50;
    prop_oneof![
        3 => (element.clone(), priority.clone()).prop_map(|(e, p)| Op::Insert(e, p)),
        1 => prop::collection::vec((element.clone(), priority.clone()), 0..12).prop_map(Op::InsertAll),
        2 => Just(Op::ExtractMin),
        2 => (element, priority).prop_map(|(e, p)| Op::ChangePriority(e, p)),
    ]
}

/// Apply `ops` to a heap and a model, comparing them after each step
fn check_against_model(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut heap = IndexedMinHeap::new(UNIVERSE);
    let mut model: Vec<Option<i32>> = vec![None; UNIVERSE];

    for op in ops {
        match op {
            Op::Insert(e, p) => {
                let added = heap.insert(e, p).unwrap();
                prop_assert_eq!(added, model[e].is_none());
                if added {
                    model[e] = Some(p);
                }
            }
            Op::InsertAll(pairs) => {
                let mut expected = 0;
                for &(e, p) in &pairs {
                    if model[e].is_none() {
                        model[e] = Some(p);
                        expected += 1;
                    }
                }
                prop_assert_eq!(heap.insert_all(pairs).unwrap(), expected);
            }
            Op::ExtractMin => {
                let min = model.iter().flatten().min().copied();
                match min {
                    Some(min) => {
                        let (e, p) = heap.extract_min_entry().unwrap();
                        prop_assert_eq!(p, min);
                        prop_assert_eq!(model[e], Some(p));
                        model[e] = None;
                    }
                    None => {
                        prop_assert!(heap.extract_min().is_err());
                    }
                }
            }
            Op::ChangePriority(e, p) => {
                let found = heap.change_priority(e, p).unwrap();
                prop_assert_eq!(found, model[e].is_some());
                if found {
                    model[e] = Some(p);
                    prop_assert_eq!(heap.get_priority(e).unwrap(), &p);
                }
            }
        }

        if let Err(err) = heap.check_invariants() {
            return Err(TestCaseError::fail(err.to_string()));
        }
        let present = model.iter().filter(|p| p.is_some()).count();
        prop_assert_eq!(heap.len(), present);
        for (e, p) in model.iter().enumerate() {
            prop_assert_eq!(heap.contains(e), p.is_some());
        }
    }

    Ok(())
}

proptest! {
    #[test]
    fn test_operations_match_model(ops in prop::collection::vec(op_strategy(), 0..120)) {
        check_against_model(ops)?;
    }

    #[test]
    fn test_extraction_order_is_sorted(priorities in prop::collection::vec(-1000i32..1000, 0..UNIVERSE)) {
        let mut heap = IndexedMinHeap::new(UNIVERSE);
        for (e, &p) in priorities.iter().enumerate() {
            prop_assert!(heap.insert(e, p).unwrap());
        }

        let mut extracted = Vec::new();
        while let Ok(e) = heap.extract_min() {
            extracted.push(e);
        }

        let order: Vec<i32> = extracted.iter().map(|&e| priorities[e]).collect();
        prop_assert!(order.windows(2).all(|w| w[0] <= w[1]));

        extracted.sort();
        prop_assert_eq!(extracted, (0..priorities.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_bulk_and_single_insert_agree(priorities in prop::collection::vec(-20i32..20, 0..UNIVERSE)) {
        let pairs: Vec<(usize, i32)> = priorities.iter().copied().enumerate().collect();

        let mut bulk = IndexedMinHeap::new(UNIVERSE);
        prop_assert_eq!(bulk.insert_all(pairs.clone()).unwrap(), pairs.len());
        bulk.check_invariants().unwrap();

        let mut single = IndexedMinHeap::new(UNIVERSE);
        for (e, p) in pairs {
            single.insert(e, p).unwrap();
        }

        while !single.is_empty() {
            let (_, expected) = single.extract_min_entry().unwrap();
            let (_, actual) = bulk.extract_min_entry().unwrap();
            prop_assert_eq!(actual, expected);
        }
        prop_assert!(bulk.is_empty());
    }

    #[test]
    fn test_change_priority_then_lookup(
        initial in prop::collection::vec(-100i32..100, 1..UNIVERSE),
        changes in prop::collection::vec((0usize..UNIVERSE, -100i32..100), 0..30)
    ) {
        let mut heap = IndexedMinHeap::new(UNIVERSE);
        heap.insert_all(initial.iter().copied().enumerate()).unwrap();

        for (e, p) in changes {
            let found = heap.change_priority(e, p).unwrap();
            prop_assert_eq!(found, e < initial.len());
            if found {
                prop_assert_eq!(heap.get_priority(e).unwrap(), &p);
            }
            heap.check_invariants().unwrap();
        }
    }
}

#[test]
fn test_insert_all_reference_scenario() {
    let mut heap = IndexedMinHeap::new(5);
    heap.insert_all(vec![(0, 3), (1, 1), (2, 4), (3, 1), (4, 5)])
        .unwrap();

    let mut order = Vec::new();
    while !heap.is_empty() {
        order.push(heap.extract_min_entry().unwrap());
    }

    let priorities: Vec<i32> = order.iter().map(|&(_, p)| p).collect();
    assert!(priorities.windows(2).all(|w| w[0] <= w[1]));

    let elements: Vec<usize> = order.iter().map(|&(e, _)| e).collect();
    assert!(elements == vec![1, 3, 0, 2, 4] || elements == vec![3, 1, 0, 2, 4]);
}
