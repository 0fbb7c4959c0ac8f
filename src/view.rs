//! Buffer views: type-tagged handles to contiguous, mutable numeric memory.
//!
//! A [`BufferView`] never owns the memory it points at. It either wraps the storage
//! of an owned sequence ([`Origin::Owned`]) or references memory that belongs to an
//! external array ([`Origin::Borrowed`]). Either way the kernel writes straight into
//! that memory, so results are visible to the caller without a copy-back step.
//!
//! External arrays plug in through the [`TypedBuffer`] trait, which describes their
//! memory the way a buffer protocol would: a format string, an item size, a length,
//! a stride and a base pointer. All validation happens in the constructors, before
//! any element is touched.

use crate::core::{ElementType, SortElement};
use crate::error::{InvalidBufferReason, Result, SortError};
use bytemuck::PodCastError;

/// Where the memory behind a view comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Storage of an owned growable sequence (e.g. a `Vec`).
    Owned,
    /// Memory owned by an external array or caller-managed allocation.
    Borrowed,
}

/// A mutable slice tagged with its element type.
#[derive(Debug)]
pub enum TypedSlice<'a> {
    Int32(&'a mut [i32]),
    Int64(&'a mut [i64]),
    Float32(&'a mut [f32]),
    Float64(&'a mut [f64]),
}

impl<'a> TypedSlice<'a> {
    fn empty(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Int32 => TypedSlice::Int32(Default::default()),
            ElementType::Int64 => TypedSlice::Int64(Default::default()),
            ElementType::Float32 => TypedSlice::Float32(Default::default()),
            ElementType::Float64 => TypedSlice::Float64(Default::default()),
        }
    }

    /// Element type of the slice.
    pub fn element_type(&self) -> ElementType {
        match self {
            TypedSlice::Int32(_) => ElementType::Int32,
            TypedSlice::Int64(_) => ElementType::Int64,
            TypedSlice::Float32(_) => ElementType::Float32,
            TypedSlice::Float64(_) => ElementType::Float64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedSlice::Int32(s) => s.len(),
            TypedSlice::Int64(s) => s.len(),
            TypedSlice::Float32(s) => s.len(),
            TypedSlice::Float64(s) => s.len(),
        }
    }

    /// Returns `true` if the slice has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Buffer-protocol style description of an external array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayDescriptor {
    /// Element type string, e.g. `"<f8"`, `"i"` or `"int32"`. See [`ElementType`]'s `FromStr`.
    pub format: String,
    /// Size of one element in bytes.
    pub itemsize: usize,
    /// Number of elements.
    pub len: usize,
    /// Byte distance between consecutive elements.
    pub stride: isize,
}

impl ArrayDescriptor {
    /// Descriptor of a packed array of `len` elements of `element_type`.
    pub fn contiguous(element_type: ElementType, len: usize) -> Self {
        Self {
            format: element_type.name().to_string(),
            itemsize: element_type.size(),
            len,
            stride: element_type.size() as isize,
        }
    }
}

/// An externally owned typed array that can be sorted without copying.
///
/// This is the seam for array libraries: implement it for your array type and pass
/// it to [`sort_array`](crate::sort_array).
///
/// # Safety
///
/// Implementors guarantee that the pointer returned by [`as_mut_ptr`](Self::as_mut_ptr)
/// addresses memory laid out exactly as [`descriptor`](Self::descriptor) describes,
/// and that this memory stays valid and is not accessed through any other path while
/// the `&mut self` borrow is alive.
///
/// # Examples
///
/// ```
/// use numsort::{sort_array, ArrayDescriptor, ElementType, TypedBuffer};
///
/// struct Column {
///     values: Vec<f64>,
/// }
///
/// unsafe impl TypedBuffer for Column {
///     fn descriptor(&self) -> ArrayDescriptor {
///         ArrayDescriptor::contiguous(ElementType::Float64, self.values.len())
///     }
///
///     fn as_mut_ptr(&mut self) -> *mut u8 {
///         self.values.as_mut_ptr().cast()
///     }
/// }
///
/// let mut column = Column { values: vec![2.5, -1.0, 0.5] };
/// sort_array(&mut column).unwrap();
/// assert_eq!(column.values, vec![-1.0, 0.5, 2.5]);
/// ```
pub unsafe trait TypedBuffer {
    /// Layout of the array.
    fn descriptor(&self) -> ArrayDescriptor;

    /// Base address of the first element.
    fn as_mut_ptr(&mut self) -> *mut u8;
}

unsafe impl<T: SortElement> TypedBuffer for [T] {
    fn descriptor(&self) -> ArrayDescriptor {
        ArrayDescriptor::contiguous(T::ELEMENT_TYPE, self.len())
    }

    fn as_mut_ptr(&mut self) -> *mut u8 {
        <[T]>::as_mut_ptr(self).cast()
    }
}

unsafe impl<T: SortElement> TypedBuffer for Vec<T> {
    fn descriptor(&self) -> ArrayDescriptor {
        self.as_slice().descriptor()
    }

    fn as_mut_ptr(&mut self) -> *mut u8 {
        Vec::as_mut_ptr(self).cast()
    }
}

/// A type-tagged view over contiguous mutable numeric memory.
#[derive(Debug)]
pub struct BufferView<'a> {
    data: TypedSlice<'a>,
    origin: Origin,
}

impl<'a> BufferView<'a> {
    /// Wraps the storage of an owned vector. No copy is made.
    pub fn from_vec<T: SortElement>(vec: &'a mut Vec<T>) -> Self {
        Self {
            data: T::wrap(vec.as_mut_slice()),
            origin: Origin::Owned,
        }
    }

    /// Wraps a borrowed slice. No copy is made.
    pub fn from_slice<T: SortElement>(slice: &'a mut [T]) -> Self {
        Self {
            data: T::wrap(slice),
            origin: Origin::Borrowed,
        }
    }

    /// Reinterprets a byte region as elements of `element_type`, in place.
    ///
    /// Fails with [`SortError::InvalidBuffer`] when the region is misaligned for the
    /// element type or its length is not a whole number of elements.
    pub fn from_bytes(element_type: ElementType, bytes: &'a mut [u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self::empty(element_type));
        }

        let data = match element_type {
            ElementType::Int32 => TypedSlice::Int32(cast_bytes(element_type, bytes)?),
            ElementType::Int64 => TypedSlice::Int64(cast_bytes(element_type, bytes)?),
            ElementType::Float32 => TypedSlice::Float32(cast_bytes(element_type, bytes)?),
            ElementType::Float64 => TypedSlice::Float64(cast_bytes(element_type, bytes)?),
        };

        Ok(Self {
            data,
            origin: Origin::Borrowed,
        })
    }

    /// Builds a view from a raw base pointer and an element count.
    ///
    /// A zero length is always accepted, whatever the pointer. Otherwise the pointer
    /// must be non-null and aligned for `element_type`.
    ///
    /// # Safety
    ///
    /// For `len > 0`, `data` must point to `len` initialized elements of
    /// `element_type` that are valid for reads and writes for `'a`, that no other
    /// reference accesses during `'a`, and whose total size does not exceed
    /// `isize::MAX` bytes.
    pub unsafe fn from_raw_parts(
        element_type: ElementType,
        data: *mut u8,
        len: usize,
    ) -> Result<Self> {
        if len == 0 {
            return Ok(Self::empty(element_type));
        }
        if data.is_null() {
            return Err(reject(InvalidBufferReason::NullData { len }));
        }
        let address = data as usize;
        if address % element_type.align() != 0 {
            return Err(reject(InvalidBufferReason::Misaligned {
                address,
                align: element_type.align(),
            }));
        }

        // SAFETY: non-null and aligned checked above; validity, exclusivity and size
        // are the caller's obligations.
        let data = unsafe {
            match element_type {
                ElementType::Int32 => {
                    TypedSlice::Int32(std::slice::from_raw_parts_mut(data.cast(), len))
                }
                ElementType::Int64 => {
                    TypedSlice::Int64(std::slice::from_raw_parts_mut(data.cast(), len))
                }
                ElementType::Float32 => {
                    TypedSlice::Float32(std::slice::from_raw_parts_mut(data.cast(), len))
                }
                ElementType::Float64 => {
                    TypedSlice::Float64(std::slice::from_raw_parts_mut(data.cast(), len))
                }
            }
        };

        Ok(Self {
            data,
            origin: Origin::Borrowed,
        })
    }

    /// Builds a view from a buffer-protocol descriptor and its base pointer.
    ///
    /// Checks run in this order:
    /// 1. `format` names a supported type, else [`SortError::TypeMismatch`].
    /// 2. `itemsize` matches that type, else [`InvalidBufferReason::ItemSizeMismatch`].
    /// 3. `stride == itemsize` when there is more than one element, else
    ///    [`InvalidBufferReason::NonContiguous`].
    /// 4. The checks of [`from_raw_parts`](Self::from_raw_parts).
    ///
    /// # Safety
    ///
    /// Same as [`from_raw_parts`](Self::from_raw_parts) with `desc.len` elements.
    pub unsafe fn from_descriptor(desc: &ArrayDescriptor, data: *mut u8) -> Result<Self> {
        let element_type = desc.format.parse::<ElementType>().inspect_err(|err| {
            tracing::debug!(format = %desc.format, error = %err, "buffer_rejected");
        })?;

        if desc.itemsize != element_type.size() {
            return Err(reject(InvalidBufferReason::ItemSizeMismatch {
                element_type,
                itemsize: desc.itemsize,
            }));
        }
        if desc.len > 1 && desc.stride != desc.itemsize as isize {
            return Err(reject(InvalidBufferReason::NonContiguous {
                stride: desc.stride,
                itemsize: desc.itemsize,
            }));
        }

        // SAFETY: forwarded to the caller.
        unsafe { Self::from_raw_parts(element_type, data, desc.len) }
    }

    /// Builds a view over an external array without copying it.
    pub fn from_external<B: TypedBuffer + ?Sized>(buffer: &'a mut B) -> Result<Self> {
        let desc = buffer.descriptor();
        let data = buffer.as_mut_ptr();

        // SAFETY: the TypedBuffer contract says `data` is laid out as `desc` and is
        // exclusively ours for as long as `buffer` is borrowed, which is `'a`.
        unsafe { Self::from_descriptor(&desc, data) }
    }

    fn empty(element_type: ElementType) -> Self {
        Self {
            data: TypedSlice::empty(element_type),
            origin: Origin::Borrowed,
        }
    }

    /// Element type of the viewed memory.
    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the memory belongs to an owned sequence or an external array.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Consumes the view, returning the typed slice for dispatch.
    pub fn into_typed(self) -> TypedSlice<'a> {
        self.data
    }
}

fn cast_bytes<T: SortElement>(
    element_type: ElementType,
    bytes: &mut [u8],
) -> Result<&mut [T]> {
    let address = bytes.as_ptr() as usize;
    let byte_len = bytes.len();

    bytemuck::try_cast_slice_mut(bytes).map_err(|err| {
        let reason = match err {
            PodCastError::TargetAlignmentGreaterAndInputNotAligned => {
                InvalidBufferReason::Misaligned {
                    address,
                    align: element_type.align(),
                }
            }
            _ => InvalidBufferReason::TrailingBytes {
                byte_len,
                itemsize: element_type.size(),
            },
        };
        reject(reason)
    })
}

fn reject(reason: InvalidBufferReason) -> SortError {
    tracing::debug!(%reason, "buffer_rejected");
    SortError::InvalidBuffer(reason)
}
