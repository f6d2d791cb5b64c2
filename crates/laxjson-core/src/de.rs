//! Serde bridge: a decoded [`Value`] drives any `Deserialize` type.
//!
//! This is the route for records that derive `serde::Deserialize` instead of
//! implementing [`FromValue`](crate::FromValue) by hand. The shape rules are
//! the same as for coercion: an `Int` never fills an `f64`, a string never
//! fills a number. Serde's own visitors reject the remaining mismatches.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Debug, PartialEq, Deserialize)]
//! struct Bucket {
//!     foo: i64,
//! }
//!
//! let buckets: Vec<Bucket> = laxjson_core::deserialize(br#"[{"foo":1},{"foo":2}]"#).unwrap();
//! assert_eq!(buckets, vec![Bucket { foo: 1 }, Bucket { foo: 2 }]);
//! ```

use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

use crate::error::{DecodeError, Result};
use crate::value::Value;

/// Build a `T` from an already decoded value.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(value)
}

impl Value {
    fn float_mismatch(&self) -> DecodeError {
        DecodeError::TypeMismatch {
            found: self.kind(),
            expected: "float".to_string(),
        }
    }
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(n) => visitor.visit_i64(n),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Str(s) => visitor.visit_string(s),
            Value::Array(items) => {
                let mut seq: SeqDeserializer<_, DecodeError> =
                    SeqDeserializer::new(items.into_iter());
                let out = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(out)
            }
            Value::Object(map) => {
                let mut access: MapDeserializer<'de, _, DecodeError> =
                    MapDeserializer::new(map.into_iter());
                let out = visitor.visit_map(&mut access)?;
                access.end()?;
                Ok(out)
            }
        }
    }

    // serde's float visitors accept integers; decoded shapes do not widen.
    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Float(f) => visitor.visit_f64(f),
            other => Err(other.float_mismatch()),
        }
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Float(f) => visitor.visit_f64(f),
            other => Err(other.float_mismatch()),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_any(visitor).map_err(|e| e.in_record(name))
    }

    /// Unit variants are strings; other variants are single-member objects
    /// keyed by the variant name.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self {
            Value::Str(variant) => visitor.visit_enum(
                <String as IntoDeserializer<'de, DecodeError>>::into_deserializer(variant),
            ),
            Value::Object(map) if map.len() == 1 => {
                let access: MapDeserializer<'de, _, DecodeError> =
                    MapDeserializer::new(map.into_iter());
                visitor.visit_enum(MapAccessDeserializer::new(access))
            }
            other => Err(DecodeError::TypeMismatch {
                found: other.kind(),
                expected: format!("enum {name}"),
            }),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, DecodeError> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}
