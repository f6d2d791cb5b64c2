//! Error types for decoding and coercion.

use serde::de::{Expected, Unexpected};
use thiserror::Error;

/// Errors that can occur while decoding JSON text or coercing the result.
///
/// Offsets are byte offsets into the input buffer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A byte that cannot start (or continue) a value at this position.
    /// `context` shows up to 10 bytes on either side of the offending byte.
    #[error("syntax error at byte {offset}: {context}")]
    Syntax { offset: usize, context: String },

    /// The input ended where a value or delimiter was required.
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid number {text:?} at byte {offset}")]
    InvalidNumber { offset: usize, text: String },

    #[error("invalid escape at byte {offset}: {message}")]
    InvalidEscape { offset: usize, message: String },

    /// The decoded bytes of a string (raw or escaped) are not valid UTF-8.
    #[error("string starting at byte {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("missing colon after object key at byte {offset}")]
    MissingColon { offset: usize },

    #[error("missing comma or closing delimiter at byte {offset}")]
    MissingComma { offset: usize },

    #[error("nesting exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },

    /// The destination cannot be written to.
    #[error("need an addressable target, got a null {type_name} destination")]
    InvalidDestination { type_name: &'static str },

    /// The decoded shape cannot be assigned to the requested destination.
    #[error("cannot assign {found} to {expected}")]
    TypeMismatch {
        found: &'static str,
        expected: String,
    },

    #[error("missing field `{field}` for {record}")]
    MissingField { field: String, record: String },

    /// Raised by a `Deserialize` implementation through [`serde::de::Error`].
    #[error("{0}")]
    Custom(String),
}

impl DecodeError {
    /// Name the record a serde-reported missing field belongs to.
    pub(crate) fn in_record(self, name: &str) -> Self {
        match self {
            DecodeError::MissingField { field, record } if record.is_empty() => {
                DecodeError::MissingField {
                    field,
                    record: format!("record {name}"),
                }
            }
            other => other,
        }
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        DecodeError::Custom(msg.to_string())
    }

    fn invalid_type(unexp: Unexpected<'_>, exp: &dyn Expected) -> Self {
        let found = match unexp {
            Unexpected::Unit | Unexpected::Option => "null",
            Unexpected::Bool(_) => "bool",
            Unexpected::Signed(_) | Unexpected::Unsigned(_) => "int",
            Unexpected::Float(_) => "float",
            Unexpected::Char(_) | Unexpected::Str(_) | Unexpected::Bytes(_) => "string",
            Unexpected::Seq => "array",
            Unexpected::Map => "object",
            _ => "value",
        };
        DecodeError::TypeMismatch {
            found,
            expected: exp.to_string(),
        }
    }

    fn missing_field(field: &'static str) -> Self {
        DecodeError::MissingField {
            field: field.to_string(),
            record: String::new(),
        }
    }
}

/// Convenience alias used throughout laxjson-core.
pub type Result<T> = std::result::Result<T, DecodeError>;
