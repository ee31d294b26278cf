//! The unflattening decoder.

use labwire_buffers::{BufferError, Reader};
use num_complex::Complex64;

use crate::data::{Array, ArrayStore, Data, ErrorData, Timestamp};
use crate::tag::Type;

use super::UnflattenError;

/// Decodes wire bytes back into native values, driven by a [`Type`].
///
/// The format is schema-driven: there is no self-describing read, the type
/// dictates every field. Dimensionless `v`/`v[]` positions decode to
/// [`Data::Float`]; numeric and boolean list elements decode to a packed
/// [`Data::Array`], everything else to nested [`Data::List`]s.
pub struct UnflattenDecoder<'a> {
    reader: Reader<'a>,
}

impl<'a> UnflattenDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(bytes),
        }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    /// Fails unless the buffer was consumed exactly.
    pub fn finish(&self) -> Result<(), UnflattenError> {
        match self.reader.remaining() {
            0 => Ok(()),
            n => Err(UnflattenError::TrailingBytes(n)),
        }
    }

    pub fn read_any(&mut self, tag: &Type) -> Result<Data, UnflattenError> {
        match tag {
            Type::None => Ok(Data::None),
            Type::Bool => Ok(Data::Bool(self.reader.u8()? != 0)),
            Type::Int => Ok(Data::Int(self.reader.i32()? as i64)),
            Type::UInt => Ok(Data::UInt(self.reader.u32()? as u64)),
            Type::Str => {
                let len = self.reader.u32()? as usize;
                Ok(Data::Str(self.reader.utf8(len)?.to_owned()))
            }
            Type::Bytes => {
                let len = self.reader.u32()? as usize;
                Ok(Data::Bytes(self.reader.bytes(len)?.to_vec()))
            }
            Type::Time => {
                let seconds = self.reader.i64()?;
                let fraction = self.reader.u64()?;
                Ok(Data::Time(Timestamp::new(seconds, fraction)))
            }
            Type::Value(unit) => {
                let value = self.reader.f64()?;
                Ok(scalar_value(value, unit))
            }
            Type::Complex(unit) => {
                let re = self.reader.f64()?;
                let im = self.reader.f64()?;
                Ok(scalar_complex(Complex64::new(re, im), unit))
            }
            Type::Cluster(tags) => {
                let mut elems = Vec::with_capacity(tags.len());
                for t in tags {
                    elems.push(self.read_any(t)?);
                }
                Ok(Data::Cluster(elems))
            }
            Type::List { elem, depth } => self.read_list(elem.as_deref(), *depth),
            Type::Error(payload_tag) => {
                let code = self.reader.i32()?;
                let len = self.reader.u32()? as usize;
                let message = self.reader.utf8(len)?.to_owned();
                let payload = match payload_tag {
                    None => None,
                    Some(t) => Some(Box::new(self.read_any(t)?)),
                };
                Ok(Data::Error(ErrorData {
                    code,
                    message,
                    payload,
                }))
            }
            Type::Any => Err(UnflattenError::NonConcreteType(tag.to_string())),
        }
    }

    fn read_list(&mut self, elem: Option<&Type>, depth: usize) -> Result<Data, UnflattenError> {
        let mut dims = Vec::with_capacity(depth);
        for _ in 0..depth {
            dims.push(self.reader.u32()? as usize);
        }
        let total: usize = dims.iter().product();
        let elem = match elem {
            Some(t) => t,
            None => {
                if total != 0 {
                    return Err(UnflattenError::ElementsWithoutType(total));
                }
                return Ok(empty_nested(&dims));
            }
        };
        // The declared element count must plausibly fit in the remaining
        // bytes before anything is allocated for it.
        match total.checked_mul(min_width(elem)) {
            Some(needed) if needed <= self.reader.remaining() => {}
            _ => return Err(UnflattenError::Buffer(BufferError::EndOfBuffer)),
        }
        match elem {
            Type::Bool => {
                let mut values = Vec::with_capacity(total);
                for _ in 0..total {
                    values.push(self.reader.u8()? != 0);
                }
                self.packed(dims, ArrayStore::Bool(values))
            }
            Type::Int => {
                let mut values = Vec::with_capacity(total);
                for _ in 0..total {
                    values.push(self.reader.i32()?);
                }
                self.packed(dims, ArrayStore::Int(values))
            }
            Type::UInt => {
                let mut values = Vec::with_capacity(total);
                for _ in 0..total {
                    values.push(self.reader.u32()?);
                }
                self.packed(dims, ArrayStore::UInt(values))
            }
            Type::Value(unit) => {
                let mut values = Vec::with_capacity(total);
                for _ in 0..total {
                    values.push(self.reader.f64()?);
                }
                self.packed(
                    dims,
                    ArrayStore::Float {
                        values,
                        unit: unit.clone(),
                    },
                )
            }
            Type::Complex(unit) => {
                let mut values = Vec::with_capacity(total);
                for _ in 0..total {
                    let re = self.reader.f64()?;
                    let im = self.reader.f64()?;
                    values.push(Complex64::new(re, im));
                }
                self.packed(
                    dims,
                    ArrayStore::Complex {
                        values,
                        unit: unit.clone(),
                    },
                )
            }
            _ => {
                let mut items = Vec::with_capacity(total);
                for _ in 0..total {
                    items.push(self.read_any(elem)?);
                }
                Ok(reshape(&dims, &mut items.into_iter()))
            }
        }
    }

    fn packed(&self, dims: Vec<usize>, store: ArrayStore) -> Result<Data, UnflattenError> {
        // The store was sized from the dims, so this cannot fail.
        match Array::new(dims, store) {
            Ok(arr) => Ok(Data::Array(arr)),
            Err(_) => Err(UnflattenError::Buffer(BufferError::EndOfBuffer)),
        }
    }
}

fn scalar_value(value: f64, unit: &Option<String>) -> Data {
    match unit {
        Some(u) if !u.is_empty() => Data::Value {
            value,
            unit: u.clone(),
        },
        _ => Data::Float(value),
    }
}

fn scalar_complex(value: Complex64, unit: &Option<String>) -> Data {
    match unit {
        Some(u) if !u.is_empty() => Data::ComplexValue {
            value,
            unit: u.clone(),
        },
        _ => Data::Complex(value),
    }
}

/// Nested empty lists matching the given dimensions (total element count
/// is zero).
fn empty_nested(dims: &[usize]) -> Data {
    match dims {
        [] | [_] => Data::List(Vec::new()),
        [first, rest @ ..] => Data::List((0..*first).map(|_| empty_nested(rest)).collect()),
    }
}

/// Rebuilds nested lists from row-major items.
fn reshape(dims: &[usize], items: &mut std::vec::IntoIter<Data>) -> Data {
    match dims {
        [] => Data::List(Vec::new()),
        [n] => Data::List(items.by_ref().take(*n).collect()),
        [first, rest @ ..] => Data::List((0..*first).map(|_| reshape(rest, items)).collect()),
    }
}

/// Fewest bytes a value of this type can occupy on the wire.
fn min_width(tag: &Type) -> usize {
    match tag {
        Type::None | Type::Any => 0,
        Type::Bool => 1,
        Type::Int | Type::UInt | Type::Str | Type::Bytes => 4,
        Type::Time | Type::Complex(_) => 16,
        Type::Value(_) => 8,
        Type::Cluster(elems) => elems.iter().map(min_width).sum(),
        Type::List { depth, .. } => 4 * depth,
        Type::Error(payload) => 8 + payload.as_deref().map(min_width).unwrap_or(0),
    }
}
