//! Host-side sequences resolved to a typed view once, at the boundary.
//!
//! Bindings whose host language has dynamically typed lists land here. A [`Sequence`]
//! is an owned, homogeneous sequence whose element type is already known. A list of
//! [`Value`]s is inspected in full before anything moves: it must be entirely
//! integers or entirely floats.

use crate::algo::sort_view;
use crate::config::SortConfig;
use crate::core::ElementType;
use crate::error::{Result, SortError};
use crate::view::BufferView;

/// An owned numeric sequence with its element type as the variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Sequence {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl Sequence {
    /// Element type of the sequence.
    pub fn element_type(&self) -> ElementType {
        match self {
            Sequence::Int32(_) => ElementType::Int32,
            Sequence::Int64(_) => ElementType::Int64,
            Sequence::Float32(_) => ElementType::Float32,
            Sequence::Float64(_) => ElementType::Float64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Sequence::Int32(v) => v.len(),
            Sequence::Int64(v) => v.len(),
            Sequence::Float32(v) => v.len(),
            Sequence::Float64(v) => v.len(),
        }
    }

    /// Returns `true` if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A view over this sequence's own storage.
    pub fn view(&mut self) -> BufferView<'_> {
        match self {
            Sequence::Int32(v) => BufferView::from_vec(v),
            Sequence::Int64(v) => BufferView::from_vec(v),
            Sequence::Float32(v) => BufferView::from_vec(v),
            Sequence::Float64(v) => BufferView::from_vec(v),
        }
    }
}

macro_rules! impl_from_vec {
    ($t:ty, $variant:ident) => {
        impl From<Vec<$t>> for Sequence {
            fn from(v: Vec<$t>) -> Self {
                Sequence::$variant(v)
            }
        }
    };
}

impl_from_vec!(i32, Int32);
impl_from_vec!(i64, Int64);
impl_from_vec!(f32, Float32);
impl_from_vec!(f64, Float64);

/// Sorts a [`Sequence`] in place and returns it.
pub fn sort_sequence(seq: &mut Sequence) -> &mut Sequence {
    sort_view(seq.view(), &SortConfig::default());
    seq
}

/// A dynamically typed host scalar.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    None,
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "str",
            Value::None => "none",
        }
    }
}

/// Sorts a homogeneous list of host values in place and returns it.
///
/// All `Int` values sort as int64 and all `Float` values as float64. Unlike the
/// Python binding, a float list containing ints (`[1.5, 2]`) is not coerced to
/// float64, and bools are not treated as ints; both are rejected.
///
/// # Errors
///
/// [`SortError::TypeMismatch`] if the list holds a non-numeric value or mixes ints
/// with floats. The list is left untouched.
///
/// # Examples
///
/// ```
/// use numsort::host::{sort_values, Value};
///
/// let mut list = vec![Value::Int(3), Value::Int(1), Value::Int(2)];
/// sort_values(&mut list).unwrap();
/// assert_eq!(list, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
///
/// let mut mixed = vec![Value::Int(3), Value::Float(1.5)];
/// assert!(sort_values(&mut mixed).is_err());
/// ```
pub fn sort_values(values: &mut Vec<Value>) -> Result<&mut Vec<Value>> {
    let Some(first) = values.first() else {
        return Ok(values);
    };

    let kind = first.kind();
    if let Some(other) = values.iter().find(|v| v.kind() != kind) {
        return Err(SortError::type_mismatch(format!(
            "mixed list of {kind} and {}",
            other.kind()
        )));
    }

    let mut seq = match first {
        Value::Int(_) => Sequence::Int64(
            values
                .iter()
                .filter_map(|v| match v {
                    Value::Int(x) => Some(*x),
                    _ => None,
                })
                .collect(),
        ),
        Value::Float(_) => Sequence::Float64(
            values
                .iter()
                .filter_map(|v| match v {
                    Value::Float(x) => Some(*x),
                    _ => None,
                })
                .collect(),
        ),
        other => {
            return Err(SortError::type_mismatch(format!(
                "list of {}",
                other.kind()
            )));
        }
    };

    tracing::debug!(element_type = %seq.element_type(), len = seq.len(), "sort_values");
    sort_sequence(&mut seq);

    let sorted: Vec<Value> = match seq {
        Sequence::Int32(v) => v.into_iter().map(|x| Value::Int(x.into())).collect(),
        Sequence::Int64(v) => v.into_iter().map(Value::Int).collect(),
        Sequence::Float32(v) => v.into_iter().map(|x| Value::Float(x.into())).collect(),
        Sequence::Float64(v) => v.into_iter().map(Value::Float).collect(),
    };
    for (slot, value) in values.iter_mut().zip(sorted) {
        *slot = value;
    }

    Ok(values)
}
