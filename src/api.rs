//! Entry points for host bindings.
//!
//! Both families sort in place and hand back the caller's own storage:
//! - [`sort`] / [`sort_with`] for owned growable sequences.
//! - [`sort_array`] / [`sort_array_with`] for externally owned typed arrays, zero-copy.
//!
//! [`sorted`] is the one place that allocates: it duplicates the input first and then
//! sorts the duplicate.

use crate::algo::{SortStats, sort_slice, sort_view};
use crate::config::SortConfig;
use crate::core::SortElement;
use crate::error::Result;
use crate::view::{BufferView, TypedBuffer};

/// Sorts an owned sequence in place and returns it.
///
/// # Examples
///
/// ```
/// use numsort::sort;
///
/// let mut data = vec![-5, -2, -8, 1, 3, -1, 0];
/// let handle = sort(&mut data);
/// assert_eq!(*handle, [-8, -5, -2, -1, 0, 1, 3]);
/// ```
pub fn sort<T: SortElement>(seq: &mut Vec<T>) -> &mut Vec<T> {
    sort_with(seq, &SortConfig::default()).0
}

/// Sorts an owned sequence in place with an explicit configuration.
pub fn sort_with<'a, T: SortElement>(
    seq: &'a mut Vec<T>,
    config: &SortConfig,
) -> (&'a mut Vec<T>, SortStats) {
    let stats = sort_view(BufferView::from_vec(seq), config);
    (seq, stats)
}

/// Sorts an externally owned typed array in place, without copying it.
///
/// The array is validated first; on error nothing has been written.
///
/// # Errors
///
/// - [`SortError::TypeMismatch`](crate::SortError::TypeMismatch) if the declared format
///   is not int32, int64, float32 or float64.
/// - [`SortError::InvalidBuffer`](crate::SortError::InvalidBuffer) if the memory is null,
///   misaligned, strided, or its item size disagrees with its format.
///
/// # Examples
///
/// ```
/// use numsort::sort_array;
///
/// let mut data = vec![3.14f32, 1.41, 2.71, 0.57];
/// sort_array(&mut data).unwrap();
/// assert_eq!(data, vec![0.57, 1.41, 2.71, 3.14]);
/// ```
pub fn sort_array<B: TypedBuffer + ?Sized>(buffer: &mut B) -> Result<&mut B> {
    sort_array_with(buffer, &SortConfig::default()).map(|(buffer, _)| buffer)
}

/// Sorts an externally owned typed array in place with an explicit configuration.
pub fn sort_array_with<'a, B: TypedBuffer + ?Sized>(
    buffer: &'a mut B,
    config: &SortConfig,
) -> Result<(&'a mut B, SortStats)> {
    let view = BufferView::from_external(buffer)?;
    let stats = sort_view(view, config);
    Ok((buffer, stats))
}

/// Returns a sorted copy of `src`, leaving `src` untouched.
pub fn sorted<T: SortElement>(src: &[T]) -> Vec<T> {
    let mut copy = src.to_vec();
    sort_slice(&mut copy);
    copy
}
