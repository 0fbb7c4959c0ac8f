//! # numsort
//!
//! `numsort` is an in-place sorting kernel for numeric buffers. It sorts owned
//! sequences and externally allocated typed arrays directly in their own memory,
//! without copying them in or out.
//!
//! The kernel is an **introsort**: quicksort with a median-of-three pivot, insertion
//! sort for short partitions, and a heapsort fallback once partitioning goes too deep.
//! That gives *O*(*n* \* log(*n*)) comparisons in the worst case with *O*(log(*n*))
//! auxiliary space.
//!
//! ## Key Features
//!
//! - **Closed type set**: `i32`, `i64`, `f32` and `f64` through the sealed [`SortElement`]
//!   trait. The element type is resolved once, when a [`BufferView`] is built.
//! - **Zero-copy external arrays**: the [`TypedBuffer`] trait lets array types (numpy-like
//!   arrays, Arrow buffers, FFI allocations) be sorted where they live.
//! - **Eager validation**: null, misaligned, strided or mistyped buffers are rejected with a
//!   [`SortError`] before a single element moves.
//! - **Deterministic NaN placement**: NaNs sort after every other float.
//!
//! ## Usage
//!
//! ### Owned sequences
//!
//! ```rust
//! use numsort::sort;
//!
//! let mut data = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
//! sort(&mut data);
//!
//! assert_eq!(data, vec![1, 1, 2, 3, 3, 4, 5, 5, 6, 9]);
//! ```
//!
//! ### External memory
//!
//! ```rust
//! use numsort::{sort_view, BufferView, ElementType, SortConfig};
//!
//! let mut storage = [3.0f64, -1.5, 2.25];
//! let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut storage);
//!
//! let view = BufferView::from_bytes(ElementType::Float64, bytes).unwrap();
//! sort_view(view, &SortConfig::default());
//!
//! assert_eq!(storage, [-1.5, 2.25, 3.0]);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Worst Case**: *O*(*n* \* log(*n*)) comparisons, guaranteed by the depth guard.
//! - **Memory Overhead**: none beyond the recursion stack, which is at most
//!   *O*(log(*n*)) frames.
//! - **Stability**: not stable; equal elements may be reordered.

pub mod algo;
pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod view;

pub use algo::{SortStats, sort_slice, sort_slice_with, sort_slice_with_stats, sort_view};
pub use api::{sort, sort_array, sort_array_with, sort_with, sorted};
pub use config::{DepthLimit, SortConfig};
pub use core::{ElementType, SortElement};
pub use error::{InvalidBufferReason, Result, SortError};
pub use view::{ArrayDescriptor, BufferView, Origin, TypedBuffer, TypedSlice};

pub mod prelude {
    pub use crate::api::{sort, sort_array, sorted};
    pub use crate::config::SortConfig;
    pub use crate::core::{ElementType, SortElement};
    pub use crate::error::SortError;
    pub use crate::view::{BufferView, TypedBuffer};
}
