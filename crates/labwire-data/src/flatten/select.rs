//! Type selection: compatibility, hint specialization, and default-type
//! inference.
//!
//! The rules here are exhaustive matches over `(Data, Type)` pairs. A hint
//! either specializes to a fully concrete type for the given value or is
//! incompatible; there is no scoring, no conversion, and no silent
//! coercion. Hint order is an observable contract: the first compatible
//! hint wins.

use crate::data::{Array, ArrayStore, Data};
use crate::tag::Type;

use super::FlattenError;

const I32_MIN: i64 = i32::MIN as i64;
const I32_MAX: i64 = i32::MAX as i64;
const U32_MAX: i64 = u32::MAX as i64;

/// Picks the type a value will flatten to.
///
/// With hints, tries each in order and returns the first compatible one,
/// with any `?` components resolved against the value. With no hints,
/// computes the value's default type.
pub fn select_type(data: &Data, hints: &[Type]) -> Result<Type, FlattenError> {
    if hints.is_empty() {
        return default_type(data);
    }
    for hint in hints {
        if let Some(t) = specialize(data, hint) {
            return Ok(t);
        }
    }
    let hints = hints
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(FlattenError::NoCompatibleType {
        kind: kind(data),
        hints,
    })
}

/// The default type a value flattens to when no hints constrain it.
///
/// Bare numerics become explicitly dimensionless (`v[]`, `c[]`); integers
/// prefer `i`, falling back to `w` only when out of the signed range; lists
/// unify their element defaults, with empty siblings contributing no
/// constraint.
pub fn default_type(data: &Data) -> Result<Type, FlattenError> {
    Ok(match data {
        Data::None => Type::None,
        Data::Bool(_) => Type::Bool,
        Data::Int(n) => {
            if (I32_MIN..=I32_MAX).contains(n) {
                Type::Int
            } else if (0..=U32_MAX).contains(n) {
                Type::UInt
            } else {
                return Err(FlattenError::IntOutOfRange {
                    value: *n as i128,
                    tag: "i",
                });
            }
        }
        Data::UInt(n) => {
            if *n <= u32::MAX as u64 {
                Type::UInt
            } else {
                return Err(FlattenError::IntOutOfRange {
                    value: *n as i128,
                    tag: "w",
                });
            }
        }
        Data::Str(_) => Type::Str,
        Data::Bytes(_) => Type::Bytes,
        Data::Time(_) => Type::Time,
        Data::Float(_) => Type::Value(Some(String::new())),
        Data::Value { unit, .. } => Type::Value(Some(unit.clone())),
        Data::Complex(_) => Type::Complex(Some(String::new())),
        Data::ComplexValue { unit, .. } => Type::Complex(Some(unit.clone())),
        Data::Cluster(elems) => Type::Cluster(
            elems
                .iter()
                .map(default_type)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Data::List(elems) => list_default(elems)?,
        Data::Array(arr) => Type::List {
            elem: Some(Box::new(store_default(arr.store()))),
            depth: arr.rank(),
        },
        Data::Error(e) => Type::Error(match &e.payload {
            None => None,
            Some(payload) => Some(Box::new(default_type(payload)?)),
        }),
        Data::Flat(f) => f.tag().clone(),
    })
}

/// Resolves a hint against a value: `Some(concrete type)` when compatible,
/// `None` otherwise.
pub(super) fn specialize(data: &Data, hint: &Type) -> Option<Type> {
    match (data, hint) {
        // A partial-flat value matches only its own type or the wildcard;
        // its bytes are copied verbatim, so no respecialization is possible.
        (Data::Flat(f), t) => {
            if *t == Type::Any || f.tag() == t {
                Some(f.tag().clone())
            } else {
                None
            }
        }
        (_, Type::Any) => default_type(data).ok(),
        (Data::None, Type::None) => Some(Type::None),
        (Data::Bool(_), Type::Bool) => Some(Type::Bool),
        (Data::Int(n), Type::Int) if (I32_MIN..=I32_MAX).contains(n) => Some(Type::Int),
        (Data::Int(n), Type::UInt) if (0..=U32_MAX).contains(n) => Some(Type::UInt),
        (Data::UInt(n), Type::UInt) if *n <= u32::MAX as u64 => Some(Type::UInt),
        (Data::UInt(n), Type::Int) if *n <= I32_MAX as u64 => Some(Type::Int),
        (Data::Int(_) | Data::UInt(_) | Data::Float(_), Type::Value(u)) => {
            bare_unit(u).map(Type::Value)
        }
        (Data::Value { unit, .. }, Type::Value(u)) => united_unit(unit, u).map(Type::Value),
        (
            Data::Int(_) | Data::UInt(_) | Data::Float(_) | Data::Complex(_),
            Type::Complex(u),
        ) => bare_unit(u).map(Type::Complex),
        (Data::Value { unit, .. } | Data::ComplexValue { unit, .. }, Type::Complex(u)) => {
            united_unit(unit, u).map(Type::Complex)
        }
        (Data::Str(_), Type::Str) => Some(Type::Str),
        (Data::Bytes(_), Type::Bytes) => Some(Type::Bytes),
        (Data::Time(_), Type::Time) => Some(Type::Time),
        (Data::Cluster(elems), Type::Cluster(hints)) if elems.len() == hints.len() => elems
            .iter()
            .zip(hints)
            .map(|(x, t)| specialize(x, t))
            .collect::<Option<Vec<_>>>()
            .map(Type::Cluster),
        (Data::List(elems), Type::List { elem, depth }) => {
            specialize_list(elems, elem.as_deref(), *depth)
        }
        (Data::Array(arr), Type::List { elem, depth }) => {
            specialize_array(arr, elem.as_deref(), *depth)
        }
        (Data::Error(e), Type::Error(payload_hint)) => match (&e.payload, payload_hint) {
            (None, None) => Some(Type::Error(None)),
            (Some(payload), Some(t)) => {
                specialize(payload, t).map(|t| Type::Error(Some(Box::new(t))))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Bare numerics take a unit-unconstrained or dimensionless hint as `[]`;
/// a non-empty unit hint would silently assign a unit, so it is rejected.
fn bare_unit(hint: &Option<String>) -> Option<Option<String>> {
    match hint {
        None => Some(Some(String::new())),
        Some(u) if u.is_empty() => Some(Some(String::new())),
        Some(_) => None,
    }
}

/// Unit-carrying values keep their own unit under any unit-constrained
/// hint — this core never converts, so `ft` against `v[m]` yields `v[ft]`.
/// A dimensionless hint (`v[]`) never accepts a dimensioned value.
fn united_unit(unit: &str, hint: &Option<String>) -> Option<Option<String>> {
    match hint {
        Some(u) if u.is_empty() => None,
        _ => Some(Some(unit.to_owned())),
    }
}

fn specialize_list(elems: &[Data], hint_elem: Option<&Type>, depth: usize) -> Option<Type> {
    if elems.is_empty() {
        // No data to resolve wildcards against: a bare `?` element becomes
        // unset, a hint with nested wildcards cannot be resolved at all.
        let elem = match hint_elem {
            None => None,
            Some(Type::Any) => None,
            Some(t) if t.contains_any() => return None,
            Some(t) => Some(Box::new(t.clone())),
        };
        return Some(Type::List { elem, depth });
    }
    let mut unified: Option<Type> = None;
    if depth > 1 {
        let sub = Type::List {
            elem: hint_elem.cloned().map(Box::new),
            depth: depth - 1,
        };
        for x in elems {
            // Inner rows of a rectangular list are not self-contained on
            // the wire (dimensions are hoisted to the front), so a
            // pre-flattened sub-list cannot be spliced in here.
            if matches!(x, Data::Flat(_)) {
                return None;
            }
            let t = specialize(x, &sub)?;
            let Type::List { elem, .. } = t else {
                return None;
            };
            if let Some(elem) = elem {
                unified = Some(merge(unified, *elem)?);
            }
        }
    } else {
        // A depth-1 list with elements needs an element type to check
        // them against; an unset element only ever describes empty data.
        let hint_elem = hint_elem?;
        for x in elems {
            let t = specialize(x, hint_elem)?;
            unified = Some(merge(unified, t)?);
        }
    }
    Some(Type::List {
        elem: unified.map(Box::new),
        depth,
    })
}

fn specialize_array(arr: &Array, hint_elem: Option<&Type>, depth: usize) -> Option<Type> {
    if arr.rank() != depth {
        return None;
    }
    let hint_elem = match hint_elem {
        Some(t) => t,
        None => {
            // Unknown-element hint only ever describes zero-length data.
            if arr.is_empty() {
                return Some(Type::List { elem: None, depth });
            }
            return None;
        }
    };
    let elem = match (arr.store(), hint_elem) {
        (store, Type::Any) => store_default(store),
        (ArrayStore::Bool(_), Type::Bool) => Type::Bool,
        (ArrayStore::Int(_), Type::Int) => Type::Int,
        (ArrayStore::Int(v), Type::UInt) if v.iter().all(|n| *n >= 0) => Type::UInt,
        (ArrayStore::UInt(_), Type::UInt) => Type::UInt,
        (ArrayStore::UInt(v), Type::Int) if v.iter().all(|n| *n <= i32::MAX as u32) => Type::Int,
        (ArrayStore::Int(_) | ArrayStore::UInt(_), Type::Value(u)) => {
            Type::Value(bare_unit(u)?)
        }
        (ArrayStore::Int(_) | ArrayStore::UInt(_), Type::Complex(u)) => {
            Type::Complex(bare_unit(u)?)
        }
        (ArrayStore::Float { unit, .. }, Type::Value(u)) => Type::Value(array_unit(unit, u)?),
        (ArrayStore::Float { unit, .. }, Type::Complex(u)) => Type::Complex(array_unit(unit, u)?),
        (ArrayStore::Complex { unit, .. }, Type::Complex(u)) => Type::Complex(array_unit(unit, u)?),
        _ => return None,
    };
    Some(Type::List {
        elem: Some(Box::new(elem)),
        depth,
    })
}

/// Unit rule for array storage, where `None` marks a dimensionless array.
fn array_unit(unit: &Option<String>, hint: &Option<String>) -> Option<Option<String>> {
    match unit {
        None => bare_unit(hint),
        Some(u) => united_unit(u, hint),
    }
}

fn merge(unified: Option<Type>, t: Type) -> Option<Type> {
    match unified {
        None => Some(t),
        Some(u) => unify(u, t).ok(),
    }
}

/// The most specific common type of two sibling element types. Unknown
/// list elements defer to their siblings; everything else must agree
/// exactly (units included — there is no conversion to reconcile them).
fn unify(a: Type, b: Type) -> Result<Type, FlattenError> {
    if a == b {
        return Ok(a);
    }
    match (a, b) {
        // An unconstrained unit defers to a constrained sibling.
        (Type::Value(None), Type::Value(u)) | (Type::Value(u), Type::Value(None)) => {
            Ok(Type::Value(u))
        }
        (Type::Complex(None), Type::Complex(u)) | (Type::Complex(u), Type::Complex(None)) => {
            Ok(Type::Complex(u))
        }
        (
            Type::List { elem: ea, depth: da },
            Type::List { elem: eb, depth: db },
        ) if da == db => {
            let elem = match (ea, eb) {
                (None, e) | (e, None) => e,
                (Some(x), Some(y)) => Some(Box::new(unify(*x, *y)?)),
            };
            Ok(Type::List { elem, depth: da })
        }
        (Type::Cluster(xs), Type::Cluster(ys)) if xs.len() == ys.len() => Ok(Type::Cluster(
            xs.into_iter()
                .zip(ys)
                .map(|(x, y)| unify(x, y))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        (Type::Error(Some(x)), Type::Error(Some(y))) => {
            Ok(Type::Error(Some(Box::new(unify(*x, *y)?))))
        }
        (a, b) => Err(FlattenError::ElementTypeMismatch(
            a.to_string(),
            b.to_string(),
        )),
    }
}

fn list_default(elems: &[Data]) -> Result<Type, FlattenError> {
    if elems.is_empty() {
        return Ok(Type::empty_list(1));
    }
    // A pre-flattened sub-list is self-contained on the wire, so its
    // dimension cannot be hoisted into the outer list's depth.
    let has_flat_list = elems
        .iter()
        .any(|x| matches!(x, Data::Flat(f) if matches!(f.tag(), Type::List { .. })));
    let mut unified: Option<Type> = None;
    for x in elems {
        let t = default_type(x)?;
        unified = Some(match unified {
            None => t,
            Some(u) => unify(u, t)?,
        });
    }
    match unified {
        // A list whose children are native lists is one dimension deeper;
        // the children's own dimension folds into the depth.
        Some(Type::List { elem, depth }) if !has_flat_list => Ok(Type::List {
            elem,
            depth: depth + 1,
        }),
        Some(t) => Ok(Type::list_of(t)),
        None => Ok(Type::empty_list(1)),
    }
}

fn store_default(store: &ArrayStore) -> Type {
    match store {
        ArrayStore::Bool(_) => Type::Bool,
        ArrayStore::Int(_) => Type::Int,
        ArrayStore::UInt(_) => Type::UInt,
        ArrayStore::Float { unit, .. } => {
            Type::Value(Some(unit.clone().unwrap_or_default()))
        }
        ArrayStore::Complex { unit, .. } => {
            Type::Complex(Some(unit.clone().unwrap_or_default()))
        }
    }
}

/// Short human name for a value's shape, used in error messages.
pub(super) fn kind(data: &Data) -> &'static str {
    match data {
        Data::None => "none",
        Data::Bool(_) => "bool",
        Data::Int(_) => "int",
        Data::UInt(_) => "uint",
        Data::Str(_) => "str",
        Data::Bytes(_) => "bytes",
        Data::Time(_) => "time",
        Data::Float(_) => "float",
        Data::Value { .. } => "value",
        Data::Complex(_) => "complex",
        Data::ComplexValue { .. } => "complex value",
        Data::Cluster(_) => "cluster",
        Data::List(_) => "list",
        Data::Array(_) => "array",
        Data::Error(_) => "error",
        Data::Flat(_) => "flattened data",
    }
}
