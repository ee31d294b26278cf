use labwire_buffers::BufferError;
use thiserror::Error;

use crate::tag::TagError;

/// Error type for unflattening.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnflattenError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("cannot unflatten to non-concrete type {0}")]
    NonConcreteType(String),
    #[error("list with unknown element type declares {0} elements")]
    ElementsWithoutType(usize),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
    #[error(transparent)]
    Tag(#[from] TagError),
}
