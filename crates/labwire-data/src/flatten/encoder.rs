//! The flattening encoder.

use labwire_buffers::Writer;
use num_complex::Complex64;

use crate::data::{Array, ArrayStore, Data, ErrorData};
use crate::tag::Type;

use super::select::{kind, specialize};
use super::FlattenError;

/// Encodes native values into their wire bytes.
///
/// The byte layout is fully determined by the [`Type`] being encoded to:
/// big-endian, no padding, `u32` length prefixes for text/bytes, and one
/// `u32` dimension per list depth hoisted to the front of the list body.
/// `encode` expects the exact type previously chosen by
/// [`select_type`](super::select_type) and re-checks compatibility before
/// writing, so a mismatched call fails instead of producing garbage bytes.
pub struct FlattenEncoder {
    pub writer: Writer,
}

impl Default for FlattenEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlattenEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `data` as `tag` and returns the encoded bytes.
    pub fn encode(&mut self, data: &Data, tag: &Type) -> Result<Vec<u8>, FlattenError> {
        if specialize(data, tag).as_ref() != Some(tag) {
            return Err(incompatible(data, tag));
        }
        self.writer.reset();
        self.write_any(data, tag)?;
        Ok(self.writer.flush())
    }

    fn write_any(&mut self, data: &Data, tag: &Type) -> Result<(), FlattenError> {
        // A partial-flat value of the right type is spliced in verbatim.
        if let Data::Flat(f) = data {
            if f.tag() == tag {
                self.writer.buf(f.bytes());
                return Ok(());
            }
            return Err(incompatible(data, tag));
        }
        match (data, tag) {
            (Data::None, Type::None) => Ok(()),
            (Data::Bool(b), Type::Bool) => {
                self.writer.u8(u8::from(*b));
                Ok(())
            }
            (Data::Int(n), Type::Int) => self.write_i32(*n as i128),
            (Data::UInt(n), Type::Int) => self.write_i32(*n as i128),
            (Data::Int(n), Type::UInt) => self.write_u32(*n as i128),
            (Data::UInt(n), Type::UInt) => self.write_u32(*n as i128),
            (Data::Str(s), Type::Str) => {
                self.writer.u32(s.len() as u32);
                self.writer.utf8(s);
                Ok(())
            }
            (Data::Bytes(b), Type::Bytes) => {
                self.writer.u32(b.len() as u32);
                self.writer.buf(b);
                Ok(())
            }
            (Data::Time(ts), Type::Time) => {
                self.writer.i64(ts.seconds());
                self.writer.u64(ts.fraction());
                Ok(())
            }
            (_, Type::Value(_)) => {
                let v = real_of(data).ok_or_else(|| incompatible(data, tag))?;
                self.writer.f64(v);
                Ok(())
            }
            (_, Type::Complex(_)) => {
                let v = complex_of(data).ok_or_else(|| incompatible(data, tag))?;
                self.writer.f64(v.re);
                self.writer.f64(v.im);
                Ok(())
            }
            (Data::Cluster(elems), Type::Cluster(tags)) if elems.len() == tags.len() => {
                for (x, t) in elems.iter().zip(tags) {
                    self.write_any(x, t)?;
                }
                Ok(())
            }
            (Data::List(_) | Data::Array(_), Type::List { elem, depth }) => {
                self.write_list(data, elem.as_deref(), *depth)
            }
            (Data::Error(e), Type::Error(payload_tag)) => self.write_error(e, payload_tag.as_deref()),
            _ => Err(incompatible(data, tag)),
        }
    }

    fn write_i32(&mut self, n: i128) -> Result<(), FlattenError> {
        let n = i32::try_from(n).map_err(|_| FlattenError::IntOutOfRange {
            value: n,
            tag: "i",
        })?;
        self.writer.i32(n);
        Ok(())
    }

    fn write_u32(&mut self, n: i128) -> Result<(), FlattenError> {
        let n = u32::try_from(n).map_err(|_| FlattenError::IntOutOfRange {
            value: n,
            tag: "w",
        })?;
        self.writer.u32(n);
        Ok(())
    }

    /// Writes `depth` dimension sizes, outer to inner, then the elements in
    /// row-major order.
    fn write_list(
        &mut self,
        data: &Data,
        elem: Option<&Type>,
        depth: usize,
    ) -> Result<(), FlattenError> {
        let dims = collect_dims(data, depth)?;
        for dim in &dims {
            self.writer.u32(*dim as u32);
        }
        let total: usize = dims.iter().product();
        if total == 0 {
            return Ok(());
        }
        let elem = elem.ok_or_else(|| incompatible(data, &Type::empty_list(depth)))?;
        self.write_rows(data, depth, elem)
    }

    fn write_rows(&mut self, data: &Data, depth: usize, elem: &Type) -> Result<(), FlattenError> {
        if depth == 0 {
            return self.write_any(data, elem);
        }
        match data {
            Data::List(elems) => {
                for x in elems {
                    self.write_rows(x, depth - 1, elem)?;
                }
                Ok(())
            }
            Data::Array(arr) if arr.rank() == depth => self.write_array_elems(arr, elem),
            _ => Err(incompatible(data, elem)),
        }
    }

    fn write_array_elems(&mut self, arr: &Array, elem: &Type) -> Result<(), FlattenError> {
        match (arr.store(), elem) {
            (ArrayStore::Bool(v), Type::Bool) => {
                for b in v {
                    self.writer.u8(u8::from(*b));
                }
                Ok(())
            }
            (ArrayStore::Int(v), Type::Int) => {
                for n in v {
                    self.writer.i32(*n);
                }
                Ok(())
            }
            (ArrayStore::Int(v), Type::UInt) => {
                for n in v {
                    self.write_u32(*n as i128)?;
                }
                Ok(())
            }
            (ArrayStore::UInt(v), Type::UInt) => {
                for n in v {
                    self.writer.u32(*n);
                }
                Ok(())
            }
            (ArrayStore::UInt(v), Type::Int) => {
                for n in v {
                    self.write_i32(*n as i128)?;
                }
                Ok(())
            }
            (ArrayStore::Int(v), Type::Value(_)) => {
                for n in v {
                    self.writer.f64(*n as f64);
                }
                Ok(())
            }
            (ArrayStore::UInt(v), Type::Value(_)) => {
                for n in v {
                    self.writer.f64(*n as f64);
                }
                Ok(())
            }
            (ArrayStore::Float { values, .. }, Type::Value(_)) => {
                for v in values {
                    self.writer.f64(*v);
                }
                Ok(())
            }
            (ArrayStore::Int(v), Type::Complex(_)) => {
                for n in v {
                    self.writer.f64(*n as f64);
                    self.writer.f64(0.0);
                }
                Ok(())
            }
            (ArrayStore::UInt(v), Type::Complex(_)) => {
                for n in v {
                    self.writer.f64(*n as f64);
                    self.writer.f64(0.0);
                }
                Ok(())
            }
            (ArrayStore::Float { values, .. }, Type::Complex(_)) => {
                for v in values {
                    self.writer.f64(*v);
                    self.writer.f64(0.0);
                }
                Ok(())
            }
            (ArrayStore::Complex { values, .. }, Type::Complex(_)) => {
                for v in values {
                    self.writer.f64(v.re);
                    self.writer.f64(v.im);
                }
                Ok(())
            }
            _ => Err(FlattenError::Incompatible {
                kind: "array",
                tag: elem.to_string(),
            }),
        }
    }

    fn write_error(
        &mut self,
        e: &ErrorData,
        payload_tag: Option<&Type>,
    ) -> Result<(), FlattenError> {
        self.writer.i32(e.code);
        self.writer.u32(e.message.len() as u32);
        self.writer.utf8(&e.message);
        match (&e.payload, payload_tag) {
            (None, None) => Ok(()),
            (Some(payload), Some(t)) => self.write_any(payload, t),
            (payload, _) => Err(FlattenError::Incompatible {
                kind: if payload.is_some() {
                    "error with payload"
                } else {
                    "error"
                },
                tag: Type::Error(payload_tag.cloned().map(Box::new)).to_string(),
            }),
        }
    }
}

/// Gathers the dimension sizes of a `depth`-dimensional list, checking that
/// every row at each level has the same length.
fn collect_dims(data: &Data, depth: usize) -> Result<Vec<usize>, FlattenError> {
    match data {
        _ if depth == 0 => Ok(Vec::new()),
        Data::Array(arr) if arr.rank() == depth => Ok(arr.shape().to_vec()),
        Data::List(elems) => {
            let mut dims = vec![elems.len()];
            let mut inner: Option<Vec<usize>> = None;
            for x in elems {
                let sub = collect_dims(x, depth - 1)?;
                match &inner {
                    None => inner = Some(sub),
                    Some(prev) if *prev == sub => {}
                    Some(prev) => {
                        return Err(FlattenError::RaggedList {
                            expected: prev.first().copied().unwrap_or(0),
                            found: sub.first().copied().unwrap_or(0),
                        })
                    }
                }
            }
            dims.extend(inner.unwrap_or_else(|| vec![0; depth - 1]));
            Ok(dims)
        }
        _ => Err(incompatible(data, &Type::empty_list(depth))),
    }
}

fn real_of(data: &Data) -> Option<f64> {
    match data {
        Data::Int(n) => Some(*n as f64),
        Data::UInt(n) => Some(*n as f64),
        Data::Float(v) => Some(*v),
        Data::Value { value, .. } => Some(*value),
        _ => None,
    }
}

fn complex_of(data: &Data) -> Option<Complex64> {
    match data {
        Data::Complex(v) => Some(*v),
        Data::ComplexValue { value, .. } => Some(*value),
        _ => real_of(data).map(|re| Complex64::new(re, 0.0)),
    }
}

fn incompatible(data: &Data, tag: &Type) -> FlattenError {
    FlattenError::Incompatible {
        kind: kind(data),
        tag: tag.to_string(),
    }
}
