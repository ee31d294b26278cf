use thiserror::Error;

use crate::tag::TagError;

/// Error type for type selection and flattening.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FlattenError {
    #[error("cannot flatten {kind} value to any of: {hints}")]
    NoCompatibleType {
        kind: &'static str,
        hints: String,
    },
    #[error("cannot flatten {kind} value to {tag}")]
    Incompatible {
        kind: &'static str,
        tag: String,
    },
    #[error("integer {value} out of range for tag {tag}")]
    IntOutOfRange {
        value: i128,
        tag: &'static str,
    },
    #[error("cannot unify list element types {0} and {1}")]
    ElementTypeMismatch(String, String),
    #[error("ragged list: row of {found} elements where {expected} were expected")]
    RaggedList {
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Tag(#[from] TagError),
}
