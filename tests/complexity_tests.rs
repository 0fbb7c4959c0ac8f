use numsort::{DepthLimit, SortConfig, SortStats, sort_slice_with_stats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 4] = [1 << 10, 1 << 12, 1 << 14, 1 << 16];

fn patterns(n: usize, rng: &mut StdRng) -> Vec<(&'static str, Vec<i64>)> {
    let n_i = n as i64;
    vec![
        ("sorted", (0..n_i).collect()),
        ("reverse", (0..n_i).rev().collect()),
        ("all_equal", vec![7; n]),
        ("two_values", (0..n_i).map(|i| i % 2).collect()),
        (
            "organ_pipe",
            (0..n_i).map(|i| if i < n_i / 2 { i } else { n_i - i }).collect(),
        ),
        ("sawtooth", (0..n_i).map(|i| i % 64).collect()),
        (
            "sorted_tail_swapped",
            (0..n_i)
                .map(|i| if i == n_i - 1 { 0 } else { i + 1 })
                .collect(),
        ),
        ("random", (0..n).map(|_| rng.random()).collect()),
        ("few_unique", (0..n).map(|_| rng.random_range(0..8)).collect()),
    ]
}

fn bound(n: usize) -> u64 {
    let n = n as u64;
    let log2n = n.ilog2() as u64;
    6 * n * log2n + 16 * n
}

fn check(name: &str, mut v: Vec<i64>, config: &SortConfig) -> SortStats {
    let n = v.len();
    let mut expected = v.clone();
    expected.sort_unstable();

    let stats = sort_slice_with_stats(&mut v, config);

    assert_eq!(v, expected, "{name} at n = {n}");
    assert!(
        stats.comparisons <= bound(n),
        "{name} at n = {n}: {} comparisons > bound {}",
        stats.comparisons,
        bound(n)
    );
    stats
}

#[test]
fn test_patterns_stay_n_log_n() {
    let mut rng = StdRng::seed_from_u64(2024);
    let config = SortConfig::default();

    for n in SIZES {
        for (name, v) in patterns(n, &mut rng) {
            check(name, v, &config);
        }
    }
}

#[test]
fn test_no_quadratic_growth() {
    // Quadrupling n must roughly quadruple comparisons (times a log factor), never
    // multiply them by sixteen.
    let config = SortConfig::default();
    let mut previous: Option<u64> = None;

    for n in SIZES {
        let reverse: Vec<i64> = (0..n as i64).rev().collect();
        let stats = check("reverse", reverse, &config);

        if let Some(prev) = previous {
            assert!(
                stats.comparisons < prev * 8,
                "{} -> {} comparisons when n grew 4x",
                prev,
                stats.comparisons
            );
        }
        previous = Some(stats.comparisons);
    }
}

#[test]
fn test_heapsort_only_is_bounded() {
    let mut rng = StdRng::seed_from_u64(8);
    let config = SortConfig::default().with_depth_limit(DepthLimit::Fixed(0));

    for n in SIZES {
        for (name, v) in patterns(n, &mut rng) {
            let stats = check(name, v, &config);
            assert_eq!(stats.heapsort_fallbacks, 1);
        }
    }
}

#[test]
fn test_depth_stays_logarithmic() {
    let mut rng = StdRng::seed_from_u64(77);
    let config = SortConfig::default();

    for n in SIZES {
        let limit = 2 * n.ilog2();
        for (name, v) in patterns(n, &mut rng) {
            let stats = check(name, v, &config);
            assert!(stats.max_depth <= limit, "{name} at n = {n}");
        }
    }
}

#[test]
fn test_small_inputs_counted() {
    let config = SortConfig::default();

    let mut empty: Vec<i32> = vec![];
    assert_eq!(sort_slice_with_stats(&mut empty, &config).comparisons, 0);

    let mut single = vec![1i32];
    assert_eq!(sort_slice_with_stats(&mut single, &config).comparisons, 0);

    // Already sorted short input: one comparison per adjacent pair.
    let mut short: Vec<i32> = (0..10).collect();
    assert_eq!(sort_slice_with_stats(&mut short, &config).comparisons, 9);
}
