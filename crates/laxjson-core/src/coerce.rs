//! Coercion of a decoded [`Value`] into a caller-declared destination type.
//!
//! Assignability is decided by the destination's static type through
//! [`FromValue`]. There is no implicit conversion between shapes: an `Int`
//! never fills an `f64`, a numeric string never fills an `i64`. [`Value`]
//! itself is the "any" destination and accepts everything.
//!
//! Record types opt in by implementing [`FromValue`] on top of [`Fields`], or
//! derive `serde::Deserialize` and go through [`crate::de`] instead:
//!
//! ```
//! use laxjson_core::{from_slice, Fields, FromValue, Result, Value};
//!
//! #[derive(Debug, PartialEq)]
//! struct Bucket {
//!     foo: i64,
//! }
//!
//! impl FromValue for Bucket {
//!     fn shape() -> String {
//!         "record Bucket".to_string()
//!     }
//!
//!     fn from_value(value: Value) -> Result<Self> {
//!         let mut fields = Fields::from_value::<Self>(value)?;
//!         Ok(Bucket { foo: fields.take("foo")? })
//!     }
//! }
//!
//! let buckets: Vec<Bucket> = from_slice(br#"[{"foo":1},{"foo":2}]"#).unwrap();
//! assert_eq!(buckets, vec![Bucket { foo: 1 }, Bucket { foo: 2 }]);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::{DecodeError, Result};
use crate::value::{Object, Value};

/// A type that a decoded [`Value`] can be coerced into.
pub trait FromValue: Sized {
    /// Name of the destination shape, reported in [`DecodeError::TypeMismatch`].
    fn shape() -> String;

    fn from_value(value: Value) -> Result<Self>;
}

/// Build the mismatch error for `value` against destination `T`.
pub fn mismatch<T: FromValue>(value: &Value) -> DecodeError {
    DecodeError::TypeMismatch {
        found: value.kind(),
        expected: T::shape(),
    }
}

impl FromValue for Value {
    fn shape() -> String {
        "any value".to_string()
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

macro_rules! scalar_from_value {
    ($ty:ty, $variant:ident, $shape:literal) => {
        impl FromValue for $ty {
            fn shape() -> String {
                $shape.to_string()
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

scalar_from_value!(bool, Bool, "bool");
scalar_from_value!(i64, Int, "int");
scalar_from_value!(f64, Float, "float");
scalar_from_value!(String, Str, "string");

impl<T: FromValue> FromValue for Option<T> {
    fn shape() -> String {
        format!("optional {}", T::shape())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Arrays coerce element by element, so an array of objects fills a
/// sequence of records.
impl<T: FromValue> FromValue for Vec<T> {
    fn shape() -> String {
        format!("sequence of {}", T::shape())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn shape() -> String {
        format!("mapping of string to {}", T::shape())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue, S: BuildHasher + Default> FromValue for HashMap<String, T, S> {
    fn shape() -> String {
        format!("mapping of string to {}", T::shape())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Field-by-field access to an object being coerced into a record type.
#[derive(Debug)]
pub struct Fields {
    record: String,
    map: Object,
}

impl Fields {
    /// Open `value` as the members of record `R`. Anything but an object is
    /// a type mismatch against `R`.
    pub fn from_value<R: FromValue>(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                record: R::shape(),
                map,
            }),
            other => Err(mismatch::<R>(&other)),
        }
    }

    /// Remove and coerce a required field.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T> {
        match self.map.remove(name) {
            Some(value) => T::from_value(value),
            None => Err(DecodeError::MissingField {
                field: name.to_string(),
                record: self.record.clone(),
            }),
        }
    }

    /// Remove and coerce a field, falling back to `T::default()` when it is
    /// absent or null.
    pub fn take_or_default<T: FromValue + Default>(&mut self, name: &str) -> Result<T> {
        match self.map.remove(name) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => T::from_value(value),
        }
    }

    /// Members not taken so far.
    pub fn into_rest(self) -> Object {
        self.map
    }
}

/// A location the decoder may write its result into.
///
/// `&mut T` is always addressable. `Option<&mut T>` models a nullable
/// destination; `None` is rejected with [`DecodeError::InvalidDestination`].
pub trait Destination {
    type Target: FromValue;

    fn slot(&mut self) -> Option<&mut Self::Target>;
}

impl<T: FromValue> Destination for &mut T {
    type Target = T;

    fn slot(&mut self) -> Option<&mut T> {
        Some(&mut **self)
    }
}

impl<T: FromValue> Destination for Option<&mut T> {
    type Target = T;

    fn slot(&mut self) -> Option<&mut T> {
        self.as_deref_mut()
    }
}

/// Coerce `value` and store it in `dst`. The destination is only written
/// once coercion has fully succeeded.
pub(crate) fn assign<D: Destination>(value: Value, mut dst: D) -> Result<()> {
    let Some(slot) = dst.slot() else {
        return Err(DecodeError::InvalidDestination {
            type_name: std::any::type_name::<D::Target>(),
        });
    };
    *slot = D::Target::from_value(value)?;
    Ok(())
}
