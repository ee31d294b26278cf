//! Packed rectangular numeric arrays.

use num_complex::Complex64;
use thiserror::Error;

/// Error type for array construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArrayError {
    #[error("array storage holds {len} elements but shape {shape:?} implies {expected}")]
    ShapeMismatch {
        shape: Vec<usize>,
        len: usize,
        expected: usize,
    },
    #[error("arrays must have rank >= 1")]
    ZeroRank,
}

/// Element storage for an [`Array`].
///
/// One vector per element kind, row-major. `Float` and `Complex` carry an
/// optional unit shared by every element; `None` means dimensionless.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayStore {
    Bool(Vec<bool>),
    Int(Vec<i32>),
    UInt(Vec<u32>),
    Float {
        values: Vec<f64>,
        unit: Option<String>,
    },
    Complex {
        values: Vec<Complex64>,
        unit: Option<String>,
    },
}

impl ArrayStore {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        match self {
            ArrayStore::Bool(v) => v.len(),
            ArrayStore::Int(v) => v.len(),
            ArrayStore::UInt(v) => v.len(),
            ArrayStore::Float { values, .. } => values.len(),
            ArrayStore::Complex { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shared unit, when the element kind carries one.
    pub fn unit(&self) -> Option<&str> {
        match self {
            ArrayStore::Float { unit, .. } | ArrayStore::Complex { unit, .. } => unit.as_deref(),
            _ => None,
        }
    }
}

/// A packed rectangular array of numeric or boolean elements.
///
/// Every axis of the shape is explicit and the element count equals the
/// product of the axes. This is the native form that `*i`, `*2v[Hz]` and
/// friends unflatten into, and the only native form that can carry
/// multi-dimensional data.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Vec<usize>,
    store: ArrayStore,
}

impl Array {
    /// Builds an array, checking that the storage length matches the shape.
    ///
    /// Rank-0 arrays are rejected: a scalar is not a list on the wire.
    /// An empty-unit string on `Float`/`Complex` storage is normalized to
    /// `None` (dimensionless).
    pub fn new(shape: Vec<usize>, store: ArrayStore) -> Result<Array, ArrayError> {
        if shape.is_empty() {
            return Err(ArrayError::ZeroRank);
        }
        let expected: usize = shape.iter().product();
        if store.len() != expected {
            return Err(ArrayError::ShapeMismatch {
                shape,
                len: store.len(),
                expected,
            });
        }
        let store = match store {
            ArrayStore::Float { values, unit } => ArrayStore::Float {
                values,
                unit: unit.filter(|u| !u.is_empty()),
            },
            ArrayStore::Complex { values, unit } => ArrayStore::Complex {
                values,
                unit: unit.filter(|u| !u.is_empty()),
            },
            other => other,
        };
        Ok(Array { shape, store })
    }

    /// A rank-1 boolean array.
    pub fn bools(values: Vec<bool>) -> Array {
        let shape = vec![values.len()];
        Array {
            shape,
            store: ArrayStore::Bool(values),
        }
    }

    /// A rank-1 signed integer array.
    pub fn ints(values: Vec<i32>) -> Array {
        let shape = vec![values.len()];
        Array {
            shape,
            store: ArrayStore::Int(values),
        }
    }

    /// A rank-1 unsigned integer array.
    pub fn uints(values: Vec<u32>) -> Array {
        let shape = vec![values.len()];
        Array {
            shape,
            store: ArrayStore::UInt(values),
        }
    }

    /// A rank-1 dimensionless real array.
    pub fn floats(values: Vec<f64>) -> Array {
        let shape = vec![values.len()];
        Array {
            shape,
            store: ArrayStore::Float { values, unit: None },
        }
    }

    /// A rank-1 real array with a unit.
    pub fn values(values: Vec<f64>, unit: &str) -> Array {
        let shape = vec![values.len()];
        Array {
            shape,
            store: ArrayStore::Float {
                values,
                unit: Some(unit.to_owned()).filter(|u| !u.is_empty()),
            },
        }
    }

    /// A rank-1 dimensionless complex array.
    pub fn complexes(values: Vec<Complex64>) -> Array {
        let shape = vec![values.len()];
        Array {
            shape,
            store: ArrayStore::Complex { values, unit: None },
        }
    }

    /// A rank-1 complex array with a unit.
    pub fn complex_values(values: Vec<Complex64>, unit: &str) -> Array {
        let shape = vec![values.len()];
        Array {
            shape,
            store: ArrayStore::Complex {
                values,
                unit: Some(unit.to_owned()).filter(|u| !u.is_empty()),
            },
        }
    }

    /// The axis sizes, outer dimension first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Row-major element storage.
    pub fn store(&self) -> &ArrayStore {
        &self.store
    }
}
