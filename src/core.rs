//! Core element model for numsort.
//!
//! This module defines:
//! - [`ElementType`]: The closed set of numeric types the kernel sorts.
//! - [`SortElement`]: The comparable-element capability the kernel is written against.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::SortError;
use crate::view::TypedSlice;

/// Element type tag carried by every buffer view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// IEEE 754 single precision float.
    Float32,
    /// IEEE 754 double precision float.
    Float64,
}

impl ElementType {
    /// All supported element types.
    pub const ALL: [ElementType; 4] = [
        ElementType::Int32,
        ElementType::Int64,
        ElementType::Float32,
        ElementType::Float64,
    ];

    /// Size of one element in bytes.
    pub const fn size(self) -> usize {
        match self {
            ElementType::Int32 => size_of::<i32>(),
            ElementType::Int64 => size_of::<i64>(),
            ElementType::Float32 => size_of::<f32>(),
            ElementType::Float64 => size_of::<f64>(),
        }
    }

    /// Required alignment of one element in bytes.
    pub const fn align(self) -> usize {
        match self {
            ElementType::Int32 => align_of::<i32>(),
            ElementType::Int64 => align_of::<i64>(),
            ElementType::Float32 => align_of::<f32>(),
            ElementType::Float64 => align_of::<f64>(),
        }
    }

    /// Canonical lowercase name, e.g. `"float64"`.
    pub const fn name(self) -> &'static str {
        match self {
            ElementType::Int32 => "int32",
            ElementType::Int64 => "int64",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
        }
    }

    /// Returns `true` for the floating point types.
    pub const fn is_float(self) -> bool {
        matches!(self, ElementType::Float32 | ElementType::Float64)
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the type strings hosts use to describe typed arrays.
///
/// Accepted spellings:
/// - canonical names: `int32`, `int64`, `float32`, `float64`
/// - numpy dtype strings: `i4`, `i8`, `f4`, `f8`, optionally prefixed with a
///   byte-order character (`<`, `>`, `=`, `|`, `!`)
/// - `struct` module codes: `i`, `q`, `f`, `d` (same prefixes)
///
/// A non-native byte order is rejected, because the kernel compares native values.
///
/// ```
/// use numsort::ElementType;
///
/// assert_eq!("<f8".parse::<ElementType>().unwrap(), ElementType::Float64);
/// assert!("U8".parse::<ElementType>().is_err());
/// ```
impl FromStr for ElementType {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();

        match spec.to_ascii_lowercase().as_str() {
            "int32" => return Ok(ElementType::Int32),
            "int64" => return Ok(ElementType::Int64),
            "float32" => return Ok(ElementType::Float32),
            "float64" => return Ok(ElementType::Float64),
            _ => {}
        }

        let (order, code) = match spec.chars().next() {
            Some(c @ ('<' | '>' | '=' | '|' | '!' | '@')) => (Some(c), &spec[1..]),
            _ => (None, spec),
        };

        let native = match order {
            None | Some('=' | '|' | '@') => true,
            Some('<') => cfg!(target_endian = "little"),
            Some('>' | '!') => cfg!(target_endian = "big"),
            Some(_) => false,
        };
        if !native {
            return Err(SortError::type_mismatch(format!(
                "{s:?} (non-native byte order)"
            )));
        }

        match code {
            "i4" | "i" => Ok(ElementType::Int32),
            "i8" | "q" => Ok(ElementType::Int64),
            "f4" | "f" => Ok(ElementType::Float32),
            "f8" | "d" => Ok(ElementType::Float64),
            _ => Err(SortError::type_mismatch(format!("{s:?}"))),
        }
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A numeric element the kernel knows how to order.
///
/// Implemented for `i32`, `i64`, `f32` and `f64` only; the trait is sealed so the
/// set of element types stays closed and every type has a [`TypedSlice`] variant.
///
/// Integers use their natural order. Floats use the ordinary `<` on non-NaN
/// values; every NaN sorts after every non-NaN value and NaNs are equivalent to
/// each other. `-0.0` and `0.0` are equivalent.
pub trait SortElement: bytemuck::Pod + PartialOrd + fmt::Debug + private::Sealed {
    /// Tag for this type.
    const ELEMENT_TYPE: ElementType;

    /// Strict "less than" under the kernel's order.
    fn is_less(&self, other: &Self) -> bool;

    /// Wraps a slice of this type into the matching dispatch variant.
    fn wrap(slice: &mut [Self]) -> TypedSlice<'_>;
}

macro_rules! impl_int_element {
    ($t:ty, $tag:ident) => {
        impl SortElement for $t {
            const ELEMENT_TYPE: ElementType = ElementType::$tag;

            #[inline(always)]
            fn is_less(&self, other: &Self) -> bool {
                *self < *other
            }

            fn wrap(slice: &mut [Self]) -> TypedSlice<'_> {
                TypedSlice::$tag(slice)
            }
        }
    };
}

macro_rules! impl_float_element {
    ($t:ty, $tag:ident) => {
        impl SortElement for $t {
            const ELEMENT_TYPE: ElementType = ElementType::$tag;

            #[inline(always)]
            fn is_less(&self, other: &Self) -> bool {
                if self.is_nan() {
                    false
                } else if other.is_nan() {
                    true
                } else {
                    *self < *other
                }
            }

            fn wrap(slice: &mut [Self]) -> TypedSlice<'_> {
                TypedSlice::$tag(slice)
            }
        }
    };
}

impl_int_element!(i32, Int32);
impl_int_element!(i64, Int64);
impl_float_element!(f32, Float32);
impl_float_element!(f64, Float64);
