//! Native values: the closed union the flattening engine operates on.
//!
//! Every value that can cross the wire is a [`Data`]. The compatibility
//! engine is exhaustive pattern matching over `(Data, Type)` pairs, so this
//! union is deliberately closed: adding a variant means teaching the
//! engine, the encoder and the decoder about it.

mod array;
mod time;

use num_complex::Complex64;

use crate::tag::Type;

pub use array::{Array, ArrayError, ArrayStore};
pub use time::Timestamp;

/// A native value.
///
/// Scalar numeric variants keep the full range of their Rust representation;
/// the 32-bit wire domains are enforced at flatten time, never by silent
/// truncation. `Float`/`Complex` are dimensionless; `Value`/`ComplexValue`
/// carry an opaque unit string that flattening preserves verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    None,
    Bool(bool),
    /// A signed integer. Flattens to `i` when in range, to `w` otherwise.
    Int(i64),
    /// A declared-unsigned integer. Flattens to `w`.
    UInt(u64),
    Str(String),
    Bytes(Vec<u8>),
    Time(Timestamp),
    /// Dimensionless real; flattens as `v[]`.
    Float(f64),
    /// Unit-tagged real; flattens as `v[unit]`.
    Value { value: f64, unit: String },
    /// Dimensionless complex; flattens as `c[]`.
    Complex(Complex64),
    /// Unit-tagged complex; flattens as `c[unit]`.
    ComplexValue { value: Complex64, unit: String },
    /// Fixed-arity heterogeneous tuple.
    Cluster(Vec<Data>),
    /// General sequence; element types must unify when flattened.
    List(Vec<Data>),
    /// Packed rectangular numeric array.
    Array(Array),
    /// Error record.
    Error(ErrorData),
    /// An already-flattened value, embeddable wherever a value of its tag's
    /// type may appear; its bytes are copied verbatim on flatten.
    Flat(Flat),
}

impl Data {
    /// A unit-tagged real value. An empty unit is the dimensionless
    /// [`Data::Float`].
    pub fn value(value: f64, unit: &str) -> Data {
        if unit.is_empty() {
            Data::Float(value)
        } else {
            Data::Value {
                value,
                unit: unit.to_owned(),
            }
        }
    }

    /// A unit-tagged complex value. An empty unit is the dimensionless
    /// [`Data::Complex`].
    pub fn complex_value(value: Complex64, unit: &str) -> Data {
        if unit.is_empty() {
            Data::Complex(value)
        } else {
            Data::ComplexValue {
                value,
                unit: unit.to_owned(),
            }
        }
    }

    /// An error record without a payload.
    pub fn error(code: i32, message: &str) -> Data {
        Data::Error(ErrorData {
            code,
            message: message.to_owned(),
            payload: None,
        })
    }

    /// An error record carrying a typed payload.
    pub fn error_with(code: i32, message: &str, payload: Data) -> Data {
        Data::Error(ErrorData {
            code,
            message: message.to_owned(),
            payload: Some(Box::new(payload)),
        })
    }
}

/// An error record: integer code, message text, optional typed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorData {
    pub code: i32,
    pub message: String,
    pub payload: Option<Box<Data>>,
}

/// A flattened `(bytes, Type)` pair.
///
/// This is both the output of flattening and the partial-flat input form:
/// wrapped as [`Data::Flat`], it can sit inside a larger native structure
/// exactly where a value of its type would, and flattening the structure
/// copies the stored bytes verbatim. Two pairs are equal iff both the bytes
/// and the types are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Flat {
    bytes: Vec<u8>,
    tag: Type,
}

impl Flat {
    /// Wraps pre-encoded bytes with their type.
    ///
    /// `bytes` must be exactly the flattened encoding of a value of `tag`'s
    /// type; this is not re-checked here. Pairs received from a peer can be
    /// validated by unflattening them.
    pub fn new(bytes: Vec<u8>, tag: Type) -> Flat {
        Flat { bytes, tag }
    }

    /// The encoded payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The type describing the payload layout.
    pub fn tag(&self) -> &Type {
        &self.tag
    }

    /// The canonical tag string, as sent alongside the payload.
    pub fn tag_string(&self) -> String {
        self.tag.to_string()
    }

    /// Splits the pair into its parts.
    pub fn into_parts(self) -> (Vec<u8>, Type) {
        (self.bytes, self.tag)
    }
}

impl From<bool> for Data {
    fn from(v: bool) -> Data {
        Data::Bool(v)
    }
}

impl From<i32> for Data {
    fn from(v: i32) -> Data {
        Data::Int(v as i64)
    }
}

impl From<i64> for Data {
    fn from(v: i64) -> Data {
        Data::Int(v)
    }
}

impl From<u32> for Data {
    fn from(v: u32) -> Data {
        Data::UInt(v as u64)
    }
}

impl From<u64> for Data {
    fn from(v: u64) -> Data {
        Data::UInt(v)
    }
}

impl From<f64> for Data {
    fn from(v: f64) -> Data {
        Data::Float(v)
    }
}

impl From<Complex64> for Data {
    fn from(v: Complex64) -> Data {
        Data::Complex(v)
    }
}

impl From<&str> for Data {
    fn from(v: &str) -> Data {
        Data::Str(v.to_owned())
    }
}

impl From<String> for Data {
    fn from(v: String) -> Data {
        Data::Str(v)
    }
}

impl From<Vec<u8>> for Data {
    fn from(v: Vec<u8>) -> Data {
        Data::Bytes(v)
    }
}

impl From<Timestamp> for Data {
    fn from(v: Timestamp) -> Data {
        Data::Time(v)
    }
}

impl From<Array> for Data {
    fn from(v: Array) -> Data {
        Data::Array(v)
    }
}

impl From<Flat> for Data {
    fn from(v: Flat) -> Data {
        Data::Flat(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_units_normalize_to_dimensionless() {
        assert_eq!(Data::value(5.0, ""), Data::Float(5.0));
        assert_eq!(
            Data::value(5.0, "GHz"),
            Data::Value {
                value: 5.0,
                unit: "GHz".into()
            }
        );
        assert_eq!(
            Data::complex_value(Complex64::new(1.0, 2.0), ""),
            Data::Complex(Complex64::new(1.0, 2.0))
        );
    }

    #[test]
    fn flat_equality_needs_bytes_and_tag() {
        let a = Flat::new(vec![0, 0, 0, 1], Type::Int);
        let b = Flat::new(vec![0, 0, 0, 1], Type::UInt);
        let c = Flat::new(vec![0, 0, 0, 2], Type::Int);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Flat::new(vec![0, 0, 0, 1], Type::Int));
    }
}
