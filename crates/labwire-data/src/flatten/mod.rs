//! Flattening: native values to wire bytes.
//!
//! [`flatten`] picks a type for the value (its default, or the first
//! compatible hint) and encodes it; the result is a [`Flat`] pair of bytes
//! and type that a peer can decode with no other information. Flattening is
//! idempotent: a [`Flat`] flattens to itself, and partial-flat sub-values
//! embedded in a larger structure are spliced in byte-for-byte.

mod encoder;
mod error;
mod select;

use crate::data::{Data, Flat};
use crate::tag::{parse_type_tag, Type};

pub use encoder::FlattenEncoder;
pub use error::FlattenError;
pub use select::{default_type, select_type};

/// Flattens a value to its default type.
///
/// # Example
///
/// ```
/// use labwire_data::{flatten, Data};
///
/// let flat = flatten(&Data::from(5i32)).unwrap();
/// assert_eq!(flat.tag_string(), "i");
/// assert_eq!(flat.bytes(), &[0, 0, 0, 5]);
/// ```
pub fn flatten(data: &Data) -> Result<Flat, FlattenError> {
    flatten_as(data, &[])
}

/// Flattens a value to the first compatible type among `hints`.
///
/// An empty hint list flattens to the value's default type. Hint order is
/// part of the contract: the first compatible hint wins, and any `?`
/// components in it are resolved against the value.
pub fn flatten_as(data: &Data, hints: &[Type]) -> Result<Flat, FlattenError> {
    let tag = select_type(data, hints)?;
    let mut encoder = FlattenEncoder::new();
    let bytes = encoder.encode(data, &tag)?;
    Ok(Flat::new(bytes, tag))
}

/// Flattens a value against hint tag strings, parsing them first.
///
/// # Example
///
/// ```
/// use labwire_data::{flatten_tagged, Data};
///
/// let flat = flatten_tagged(&Data::from(1i32), &["s", "w"]).unwrap();
/// assert_eq!(flat.tag_string(), "w");
/// ```
pub fn flatten_tagged(data: &Data, tags: &[&str]) -> Result<Flat, FlattenError> {
    let hints = tags
        .iter()
        .map(|tag| parse_type_tag(tag))
        .collect::<Result<Vec<_>, _>>()?;
    flatten_as(data, &hints)
}
