//! Error types for buffer construction and type dispatch.
//!
//! Every error is raised before the kernel touches a single element, so a failed
//! call leaves the caller's memory exactly as it was. The kernel itself is total
//! over valid views and has no error path.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::core::ElementType;

/// Result alias used throughout the crate.
pub type Result<T, E = SortError> = std::result::Result<T, E>;

/// Error type for sort entry points and buffer views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The requested or declared element type is not one of the supported numeric types.
    TypeMismatch {
        /// Description of what was found (a format string, a host value kind, ...).
        found: String,
    },

    /// The memory region is structurally unusable.
    InvalidBuffer(InvalidBufferReason),
}

/// Why a region was rejected as a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidBufferReason {
    /// Null data pointer with a non-zero length.
    NullData {
        /// Declared element count.
        len: usize,
    },

    /// Elements are not laid out back to back.
    NonContiguous {
        /// Byte distance between consecutive elements.
        stride: isize,
        /// Size of one element in bytes.
        itemsize: usize,
    },

    /// The data pointer is not aligned for the element type.
    Misaligned {
        /// Address of the first element.
        address: usize,
        /// Required alignment in bytes.
        align: usize,
    },

    /// The declared item size disagrees with the declared element type.
    ItemSizeMismatch {
        /// Element type named by the format.
        element_type: ElementType,
        /// Item size that came with it.
        itemsize: usize,
    },

    /// A byte region does not hold a whole number of elements.
    TrailingBytes {
        /// Length of the region in bytes.
        byte_len: usize,
        /// Size of one element in bytes.
        itemsize: usize,
    },
}

impl SortError {
    pub(crate) fn type_mismatch(found: impl Into<String>) -> Self {
        SortError::TypeMismatch {
            found: found.into(),
        }
    }
}

impl From<InvalidBufferReason> for SortError {
    fn from(reason: InvalidBufferReason) -> Self {
        SortError::InvalidBuffer(reason)
    }
}

impl Display for SortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SortError::TypeMismatch { found } => write!(
                f,
                "Type mismatch: {found} is not one of int32, int64, float32, float64"
            ),
            SortError::InvalidBuffer(reason) => write!(f, "Invalid buffer: {reason}"),
        }
    }
}

impl Display for InvalidBufferReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            InvalidBufferReason::NullData { len } => {
                write!(f, "null data pointer with length {len}")
            }
            InvalidBufferReason::NonContiguous { stride, itemsize } => write!(
                f,
                "non-contiguous region (stride {stride} bytes, item size {itemsize} bytes)"
            ),
            InvalidBufferReason::Misaligned { address, align } => write!(
                f,
                "address {address:#x} is not aligned to {align} bytes"
            ),
            InvalidBufferReason::ItemSizeMismatch {
                element_type,
                itemsize,
            } => write!(
                f,
                "item size {itemsize} does not match {element_type} ({} bytes)",
                element_type.size()
            ),
            InvalidBufferReason::TrailingBytes { byte_len, itemsize } => write!(
                f,
                "{byte_len} bytes is not a whole number of {itemsize}-byte elements"
            ),
        }
    }
}

impl Error for SortError {}
