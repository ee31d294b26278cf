//! Self-describing binary flattening and type tags for the labwire protocol.
//!
//! labwire instruments exchange values as a `(payload bytes, tag string)`
//! pair: the tag — a compact textual grammar like `*2v[Hz]` or `(si*b)` —
//! fully determines the byte layout, so a receiver holding only the tag can
//! decode the payload with no out-of-band schema.
//!
//! The crate has four parts:
//!
//! - [`Type`] and [`parse_type_tag`] — the algebraic type model and its
//!   textual grammar; `Type`'s `Display` prints the canonical tag.
//! - [`Data`] — the closed union of native values (scalars, unit-tagged
//!   quantities, timestamps, clusters, lists, packed arrays, error records,
//!   and pre-flattened values).
//! - [`flatten`] / [`flatten_as`] / [`flatten_tagged`] — pick a type for a
//!   value (its default, or the first compatible hint) and encode it.
//! - [`unflatten`] / [`unflatten_tagged`] — decode bytes back into a value
//!   given the type.
//!
//! All operations are synchronous and pure: types, values and flattened
//! pairs are immutable value objects that can be shared freely across
//! threads.
//!
//! # Example
//!
//! ```
//! use labwire_data::{flatten, unflatten, Data};
//!
//! let value = Data::Cluster(vec![
//!     Data::from("scan"),
//!     Data::from(-42i32),
//!     Data::List(vec![Data::Bool(false), Data::Bool(true)]),
//! ]);
//! let flat = flatten(&value).unwrap();
//! assert_eq!(flat.tag_string(), "(si*b)");
//!
//! let back = unflatten(flat.bytes(), flat.tag()).unwrap();
//! assert_eq!(back, value);
//! ```

mod data;
mod flatten;
mod tag;
mod unflatten;

pub use data::{Array, ArrayError, ArrayStore, Data, ErrorData, Flat, Timestamp};
pub use flatten::{default_type, flatten, flatten_as, flatten_tagged, select_type, FlattenEncoder, FlattenError};
pub use tag::{parse_type_tag, TagError, Type};
pub use unflatten::{unflatten, unflatten_tagged, UnflattenDecoder, UnflattenError};

// The complex scalar type used by `Data::Complex`.
pub use num_complex::Complex64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_string_travels_with_the_bytes() {
        let flat = flatten(&Data::value(440.0, "Hz")).unwrap();
        assert_eq!(flat.tag_string(), "v[Hz]");
        let back = unflatten_tagged(flat.bytes(), &flat.tag_string()).unwrap();
        assert_eq!(back, Data::value(440.0, "Hz"));
    }

    #[test]
    fn wire_bytes_are_big_endian() {
        let flat = flatten_tagged(&Data::Int(5), &["i"]).unwrap();
        assert_eq!(flat.bytes(), &[0x00, 0x00, 0x00, 0x05]);
        let flat = flatten_tagged(&Data::Int(-5), &["i"]).unwrap();
        assert_eq!(flat.bytes(), &[0xff, 0xff, 0xff, 0xfb]);
    }

    #[test]
    fn flattened_pairs_compare_by_bytes_and_tag() {
        let a = flatten(&Data::from(1u32)).unwrap();
        let b = flatten(&Data::from(1u32)).unwrap();
        assert_eq!(a, b);
        let c = flatten(&Data::from(2u32)).unwrap();
        assert_ne!(a, c);
    }
}
