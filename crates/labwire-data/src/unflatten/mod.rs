//! Unflattening: wire bytes back to native values.
//!
//! The inverse of flattening: given the payload bytes and the type (or tag
//! string) that was sent alongside them, rebuilds the native value. The
//! whole buffer must be consumed exactly.

mod decoder;
mod error;

use crate::data::Data;
use crate::tag::{parse_type_tag, Type};

pub use decoder::UnflattenDecoder;
pub use error::UnflattenError;

/// Unflattens `bytes` as a value of the given type.
///
/// # Example
///
/// ```
/// use labwire_data::{unflatten, Data, Type};
///
/// let value = unflatten(&[0, 0, 0, 5], &Type::Int).unwrap();
/// assert_eq!(value, Data::Int(5));
/// ```
pub fn unflatten(bytes: &[u8], tag: &Type) -> Result<Data, UnflattenError> {
    if tag.contains_any() {
        return Err(UnflattenError::NonConcreteType(tag.to_string()));
    }
    let mut decoder = UnflattenDecoder::new(bytes);
    let value = decoder.read_any(tag)?;
    decoder.finish()?;
    Ok(value)
}

/// Unflattens `bytes` against a tag string, parsing it first.
///
/// # Example
///
/// ```
/// use labwire_data::{unflatten_tagged, Data};
///
/// let value = unflatten_tagged(&[0, 0, 0, 3, b'f', b'o', b'o'], "y").unwrap();
/// assert_eq!(value, Data::Bytes(b"foo".to_vec()));
/// ```
pub fn unflatten_tagged(bytes: &[u8], tag: &str) -> Result<Data, UnflattenError> {
    let tag = parse_type_tag(tag)?;
    unflatten(bytes, &tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_buffers_are_rejected() {
        assert!(unflatten(&[0, 0, 0], &Type::Int).is_err());
        assert!(unflatten(&[], &Type::Bool).is_err());
        // Declared string length exceeds the remaining bytes.
        assert!(unflatten(&[0, 0, 0, 9, b'a'], &Type::Str).is_err());
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        assert_eq!(
            unflatten(&[0, 0, 0, 1, 0xff], &Type::Int),
            Err(UnflattenError::TrailingBytes(1))
        );
    }

    #[test]
    fn wildcards_never_describe_flattened_data() {
        assert!(matches!(
            unflatten_tagged(&[], "?"),
            Err(UnflattenError::NonConcreteType(_))
        ));
        assert!(matches!(
            unflatten_tagged(&[0, 0, 0, 0], "*?"),
            Err(UnflattenError::NonConcreteType(_))
        ));
    }

    #[test]
    fn oversized_list_lengths_fail_before_allocation() {
        // 0xffffffff declared elements in a 12-byte payload.
        let bytes = [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 1, 0, 0, 0, 2];
        assert!(unflatten_tagged(&bytes, "*i").is_err());
    }
}
