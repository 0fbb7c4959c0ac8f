use numsort::host::{Sequence, Value, sort_sequence, sort_values};
use numsort::prelude::*;
use numsort::{DepthLimit, sort_slice, sort_with};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn assert_ascending<T: SortElement>(v: &[T]) {
    for (i, w) in v.windows(2).enumerate() {
        assert!(!w[1].is_less(&w[0]), "out of order at {}: {:?} > {:?}", i, w[0], w[1]);
    }
}

fn counts(v: &[i64]) -> HashMap<i64, usize> {
    let mut map = HashMap::new();
    for x in v {
        *map.entry(*x).or_insert(0) += 1;
    }
    map
}

#[test]
fn test_random_array() {
    let mut arr = vec![64, 34, 25, 12, 22, 11, 90];
    let result = sort(&mut arr);
    assert_eq!(*result, vec![11, 12, 22, 25, 34, 64, 90]);
    assert_eq!(arr, vec![11, 12, 22, 25, 34, 64, 90]);
}

#[test]
fn test_empty_and_single() {
    let mut empty: Vec<i32> = vec![];
    assert!(sort(&mut empty).is_empty());

    let mut single = vec![42];
    sort(&mut single);
    assert_eq!(single, vec![42]);
}

#[test]
fn test_negative_numbers() {
    let mut arr = vec![-5, -2, -8, 1, 3, -1, 0];
    sort(&mut arr);
    assert_eq!(arr, vec![-8, -5, -2, -1, 0, 1, 3]);
}

#[test]
fn test_duplicates_preserved() {
    let mut arr = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
    sort(&mut arr);
    assert_eq!(arr, vec![1, 1, 2, 3, 3, 4, 5, 5, 6, 9]);
}

#[test]
fn test_float_values_exact() {
    let mut arr = vec![3.14, 1.41, 2.71, 0.57, 1.73];
    sort(&mut arr);
    assert_eq!(arr, vec![0.57, 1.41, 1.73, 2.71, 3.14]);

    let mut arr = vec![-3.14, 1.41, -2.71, 0.0, 1.73];
    sort(&mut arr);
    assert_eq!(arr, vec![-3.14, -2.71, 0.0, 1.41, 1.73]);
}

#[test]
fn test_sorted_and_reverse() {
    let mut asc: Vec<i32> = (1..=5).collect();
    sort(&mut asc);
    assert_eq!(asc, vec![1, 2, 3, 4, 5]);

    let mut desc: Vec<i32> = (1..=1000).rev().collect();
    sort(&mut desc);
    assert_eq!(desc, (1..=1000).collect::<Vec<_>>());
}

#[test]
fn test_idempotent() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut v: Vec<i64> = (0..5000).map(|_| rng.random_range(-1000..1000)).collect();
    sort(&mut v);
    let once = v.clone();
    sort(&mut v);
    assert_eq!(v, once);
}

#[test]
fn test_fuzz_permutation_and_order() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let len = rng.random_range(0..300);
        let range = rng.random_range(1..1000);
        let input: Vec<i64> = (0..len).map(|_| rng.random_range(-range..range)).collect();

        let mut actual = input.clone();
        sort(&mut actual);

        assert_ascending(&actual);
        assert_eq!(counts(&actual), counts(&input));

        let mut expected = input.clone();
        expected.sort_unstable();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_fuzz_all_element_types() {
    let mut rng = StdRng::seed_from_u64(1234);

    let mut ints32: Vec<i32> = (0..10_000).map(|_| rng.random()).collect();
    let mut expected32 = ints32.clone();
    expected32.sort_unstable();
    sort(&mut ints32);
    assert_eq!(ints32, expected32);

    let mut ints64: Vec<i64> = (0..10_000).map(|_| rng.random()).collect();
    let mut expected64 = ints64.clone();
    expected64.sort_unstable();
    sort(&mut ints64);
    assert_eq!(ints64, expected64);

    let mut floats32: Vec<f32> = (0..10_000).map(|_| rng.random_range(-1e6..1e6)).collect();
    let mut expected_f32 = floats32.clone();
    expected_f32.sort_unstable_by(|a, b| a.total_cmp(b));
    sort(&mut floats32);
    assert_eq!(floats32, expected_f32);

    let mut floats64: Vec<f64> = (0..10_000).map(|_| rng.random_range(-1e9..1e9)).collect();
    let mut expected_f64 = floats64.clone();
    expected_f64.sort_unstable_by(|a, b| a.total_cmp(b));
    sort(&mut floats64);
    assert_eq!(floats64, expected_f64);
}

#[test]
fn test_configured_sort() {
    let mut rng = StdRng::seed_from_u64(99);
    let config = SortConfig::default()
        .with_insertion_threshold(4)
        .with_depth_limit(DepthLimit::Fixed(3));

    let mut v: Vec<i32> = (0..4096).map(|_| rng.random_range(0..50)).collect();
    let (handle, stats) = sort_with(&mut v, &config);

    assert_ascending(handle.as_slice());
    assert_eq!(stats.len, 4096);
    assert!(stats.max_depth <= 3);
    assert!(stats.heapsort_fallbacks > 0);
}

#[test]
fn test_sorted_copy_leaves_source() {
    let source = [5i64, -1, 3];
    let copy = sorted(&source);

    assert_eq!(copy, vec![-1, 3, 5]);
    assert_eq!(source, [5, -1, 3]);
}

#[test]
fn test_sort_slice_in_place() {
    let mut arr = [9.5f32, -0.5, 3.0];
    sort_slice(&mut arr);
    assert_eq!(arr, [-0.5, 3.0, 9.5]);
}

#[test]
fn test_sequence_dispatch() {
    let mut seq = Sequence::from(vec![3.0f32, -2.0, 1.0]);
    assert_eq!(seq.element_type(), ElementType::Float32);

    sort_sequence(&mut seq);
    assert_eq!(seq, Sequence::Float32(vec![-2.0, 1.0, 3.0]));

    let mut seq = Sequence::from(Vec::<i64>::new());
    assert!(sort_sequence(&mut seq).is_empty());
}

#[test]
fn test_host_values() {
    let mut ints = vec![Value::Int(64), Value::Int(-3), Value::Int(12)];
    sort_values(&mut ints).unwrap();
    assert_eq!(ints, vec![Value::Int(-3), Value::Int(12), Value::Int(64)]);

    let mut floats = vec![Value::Float(3.14), Value::Float(0.57), Value::Float(1.41)];
    sort_values(&mut floats).unwrap();
    assert_eq!(
        floats,
        vec![Value::Float(0.57), Value::Float(1.41), Value::Float(3.14)]
    );

    let mut empty: Vec<Value> = vec![];
    assert!(sort_values(&mut empty).unwrap().is_empty());
}

#[test]
fn test_host_values_rejected_without_mutation() {
    let original = vec![Value::Int(2), Value::Int(1), Value::Text("x".to_string())];
    let mut list = original.clone();
    let err = sort_values(&mut list).unwrap_err();
    assert!(matches!(err, SortError::TypeMismatch { .. }));
    assert_eq!(list, original);

    let original = vec![Value::Float(2.0), Value::Int(1)];
    let mut list = original.clone();
    assert!(matches!(
        sort_values(&mut list),
        Err(SortError::TypeMismatch { .. })
    ));
    assert_eq!(list, original);

    let mut list = vec![Value::None, Value::None];
    assert!(sort_values(&mut list).is_err());

    let mut list = vec![Value::Bool(true), Value::Bool(false)];
    assert!(sort_values(&mut list).is_err());
}

#[test]
fn test_host_values_no_numeric_coercion() {
    // Float-first list with an int is not widened to float64.
    let original = vec![Value::Float(1.5), Value::Int(2), Value::Float(0.5)];
    let mut list = original.clone();
    let err = sort_values(&mut list).unwrap_err();
    assert!(matches!(err, SortError::TypeMismatch { .. }));
    assert_eq!(list, original);

    // Int-first list with a float.
    let original = vec![Value::Int(3), Value::Float(1.5)];
    let mut list = original.clone();
    assert!(matches!(
        sort_values(&mut list),
        Err(SortError::TypeMismatch { .. })
    ));
    assert_eq!(list, original);

    // Bools are not ints, alone or mixed in.
    let original = vec![Value::Int(2), Value::Bool(true), Value::Int(0)];
    let mut list = original.clone();
    assert!(matches!(
        sort_values(&mut list),
        Err(SortError::TypeMismatch { .. })
    ));
    assert_eq!(list, original);

    let original = vec![Value::Bool(true), Value::Bool(false)];
    let mut list = original.clone();
    assert!(matches!(
        sort_values(&mut list),
        Err(SortError::TypeMismatch { .. })
    ));
    assert_eq!(list, original);
}
