//! Core sorting algorithm (introsort).
//!
//! The kernel is a hybrid of:
//! - **Quicksort**: median-of-three pivot, two-pointer partition that stops on
//!   elements equal to the pivot, so runs of duplicates split evenly.
//! - **Insertion Sort**: for partitions at or below the insertion threshold.
//! - **Heapsort**: once partitioning goes deeper than the depth limit, the remaining
//!   partition is heap-sorted. This bounds the worst case at *O*(*n* \* log(*n*)).
//!
//! The smaller side of each partition is recursed into and the larger side is looped
//! on, so the call stack stays within *O*(log(*n*)) frames.
//!
//! The main entry points are [`sort_slice`] and [`sort_view`].

use crate::config::SortConfig;
use crate::core::SortElement;
use crate::view::{BufferView, TypedSlice};

/// What a sort call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Number of elements sorted.
    pub len: usize,
    /// Comparisons performed. Only counted by [`sort_slice_with_stats`].
    pub comparisons: u64,
    /// Partitions handed to heapsort by the depth guard.
    pub heapsort_fallbacks: u32,
    /// Deepest partition level reached.
    pub max_depth: u32,
}

/// Sorts a slice in place with the default configuration.
///
/// # Examples
///
/// ```
/// use numsort::sort_slice;
///
/// let mut data = [64, 34, 25, 12, 22, 11, 90];
/// sort_slice(&mut data);
///
/// assert_eq!(data, [11, 12, 22, 25, 34, 64, 90]);
/// ```
pub fn sort_slice<T: SortElement>(v: &mut [T]) {
    sort_slice_with(v, &SortConfig::default());
}

/// Sorts a slice in place with an explicit configuration.
pub fn sort_slice_with<T: SortElement>(v: &mut [T], config: &SortConfig) -> SortStats {
    let mut stats = SortStats {
        len: v.len(),
        ..SortStats::default()
    };
    introsort(v, &mut T::is_less, config, &mut stats);
    stats
}

/// Like [`sort_slice_with`], but also counts every comparison.
///
/// ```
/// use numsort::{sort_slice_with_stats, SortConfig};
///
/// let mut data: Vec<i64> = (0..1000).rev().collect();
/// let stats = sort_slice_with_stats(&mut data, &SortConfig::default());
///
/// assert!(stats.comparisons < 1000 * 1000 / 4);
/// ```
pub fn sort_slice_with_stats<T: SortElement>(v: &mut [T], config: &SortConfig) -> SortStats {
    let mut comparisons = 0u64;
    let mut is_less = |a: &T, b: &T| {
        comparisons += 1;
        a.is_less(b)
    };

    let mut stats = SortStats {
        len: v.len(),
        ..SortStats::default()
    };
    introsort(v, &mut is_less, config, &mut stats);
    stats.comparisons = comparisons;
    stats
}

/// Sorts the memory behind a buffer view in place.
///
/// The element type was fixed when the view was built; this resolves it once and runs
/// the kernel instantiated for that type.
pub fn sort_view(view: BufferView<'_>, config: &SortConfig) -> SortStats {
    let element_type = view.element_type();
    let origin = view.origin();
    tracing::debug!(%element_type, len = view.len(), ?origin, "sort_view");

    let stats = match view.into_typed() {
        TypedSlice::Int32(v) => sort_slice_with(v, config),
        TypedSlice::Int64(v) => sort_slice_with(v, config),
        TypedSlice::Float32(v) => sort_slice_with(v, config),
        TypedSlice::Float64(v) => sort_slice_with(v, config),
    };

    tracing::debug!(
        %element_type,
        len = stats.len,
        max_depth = stats.max_depth,
        heapsort_fallbacks = stats.heapsort_fallbacks,
        "sort_view_done"
    );
    stats
}

fn introsort<T, F>(v: &mut [T], is_less: &mut F, config: &SortConfig, stats: &mut SortStats)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    if v.len() <= 1 {
        return;
    }

    let limit = config.depth_limit().resolve(v.len());
    recurse(v, is_less, config.insertion_threshold().max(1), limit, 0, stats);
}

/// Sorts `v`, which sits at partition level `depth`.
///
/// `limit` is the partition level at which the remaining work is handed to heapsort.
fn recurse<T, F>(
    mut v: &mut [T],
    is_less: &mut F,
    threshold: usize,
    limit: u32,
    mut depth: u32,
    stats: &mut SortStats,
) where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    loop {
        stats.max_depth = stats.max_depth.max(depth);
        let len = v.len();

        if len <= threshold {
            insertion_sort(v, is_less);
            return;
        }

        if depth >= limit {
            stats.heapsort_fallbacks += 1;
            tracing::trace!(len, depth, limit, "heapsort_fallback");
            heapsort(v, is_less);
            return;
        }

        let mid = partition(v, is_less);
        depth += 1;

        // The pivot at `mid` is in its final place.
        let (left, right) = std::mem::take(&mut v).split_at_mut(mid);
        let right = &mut right[1..];

        if left.len() < right.len() {
            recurse(left, is_less, threshold, limit, depth, stats);
            v = right;
        } else {
            recurse(right, is_less, threshold, limit, depth, stats);
            v = left;
        }
    }
}

/// Orders `v[a]`, `v[b]`, `v[c]` so that `v[a] <= v[b] <= v[c]`.
#[inline]
fn sort3<T, F>(v: &mut [T], a: usize, b: usize, c: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
    if is_less(&v[c], &v[b]) {
        v.swap(b, c);
        if is_less(&v[b], &v[a]) {
            v.swap(a, b);
        }
    }
}

/// Partitions `v` around the median of its first, middle and last elements.
///
/// Returns the final index of the pivot. Everything before it is not greater than the
/// pivot and everything after it is not less. Requires `v.len() >= 2`.
fn partition<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len >= 2);

    let mid = len / 2;
    sort3(v, 0, mid, len - 1, is_less);
    v.swap(0, mid);
    let pivot = v[0];

    let mut i = 1;
    let mut j = len - 1;
    loop {
        while i <= j && is_less(&v[i], &pivot) {
            i += 1;
        }
        while i <= j && is_less(&pivot, &v[j]) {
            j -= 1;
        }
        if i >= j {
            break;
        }
        v.swap(i, j);
        i += 1;
        j -= 1;
    }

    v.swap(0, j);
    j
}

/// Sorts `v` using insertion sort, which is *O*(*n*^2) worst-case but fast on short slices.
fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..v.len() {
        let tmp = v[i];
        let mut hole = i;
        while hole > 0 && is_less(&tmp, &v[hole - 1]) {
            v[hole] = v[hole - 1];
            hole -= 1;
        }
        v[hole] = tmp;
    }
}

/// Sorts `v` using heapsort, which guarantees *O*(*n* \* log(*n*)) worst-case.
#[inline(never)]
fn heapsort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    // Max-heap: `parent >= child`.
    let mut sift_down = |v: &mut [T], mut node: usize| {
        loop {
            let mut child = 2 * node + 1;
            if child >= v.len() {
                break;
            }

            if child + 1 < v.len() && is_less(&v[child], &v[child + 1]) {
                child += 1;
            }

            if !is_less(&v[node], &v[child]) {
                break;
            }

            v.swap(node, child);
            node = child;
        }
    };

    for i in (0..v.len() / 2).rev() {
        sift_down(v, i);
    }

    for i in (1..v.len()).rev() {
        v.swap(0, i);
        sift_down(&mut v[..i], 0);
    }
}
