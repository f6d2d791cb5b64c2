//! # laxjson-core
//!
//! Schema-free JSON decoding into a generic [`Value`], followed by coercion
//! into a caller-chosen Rust type.
//!
//! The decoder is a hand-written recursive-descent scanner. Beyond standard
//! JSON string escapes it accepts `\UXXXXXXXX` (a full Unicode scalar value)
//! and `\xHH` (a raw byte, so UTF-8 sequences can be spelled byte by byte).
//! Numbers without a decimal point decode to exact 64-bit integers.
//!
//! ## Quick start
//!
//! ```rust
//! use laxjson_core::{decode, parse, Value};
//!
//! // Straight into a typed destination
//! let mut ids: Vec<i64> = Vec::new();
//! decode(b"[1, 2, 291983420479905792]", &mut ids).unwrap();
//! assert_eq!(ids, vec![1, 2, 291983420479905792]);
//!
//! // Or inspect the generic tree
//! let value = parse(br#"{"note": "\U0001D11E"}"#).unwrap();
//! assert_eq!(value.get("note"), Some(&Value::from("𝄞")));
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — bytes → [`Value`]; `decode`, `from_slice`, `parse`, [`Parser`]
//! - [`coerce`] — [`Value`] → typed destination ([`FromValue`], [`Fields`], [`Destination`])
//! - [`de`] — [`Value`] → any `serde::Deserialize` type (`deserialize`, `from_value`)
//! - [`value`] — the [`Value`] tree and path lookup
//! - [`error`] — [`DecodeError`]

mod cursor;
mod number;
mod string;

pub mod coerce;
pub mod de;
pub mod decoder;
pub mod error;
pub mod value;

pub use coerce::{Destination, Fields, FromValue};
pub use de::from_value;
pub use decoder::{decode, deserialize, from_slice, parse, Parser, DEFAULT_MAX_DEPTH};
pub use error::{DecodeError, Result};
pub use value::{Object, Value};
