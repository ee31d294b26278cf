//! Type tags: the textual grammar naming labwire wire types.
//!
//! A tag string like `*2v[Hz]` or `(si*b)` fully determines the byte layout
//! of a flattened payload; [`parse_type_tag`] turns it into a [`Type`] and
//! the [`Type`] `Display` impl prints the canonical form back.

mod error;
mod parser;
mod types;

pub use error::TagError;
pub use parser::parse_type_tag;
pub use types::Type;
