//! Number scanning.
//!
//! Grammar: `-? digit* ('.' digit*)?` with at least one digit. A number
//! ends at a blank byte, `,`, `}`, `]` or the end of input; the terminator
//! is left for the caller.
//! Exponents are not part of the grammar.

use crate::cursor::{is_blank, Cursor};
use crate::error::{DecodeError, Result};
use crate::value::Value;

pub(crate) fn decode_number(cursor: &mut Cursor<'_>) -> Result<Value> {
    let offset = cursor.pos();
    let rest = cursor.rest();
    let len = rest
        .iter()
        .position(|&b| is_terminator(b))
        .unwrap_or(rest.len());
    let text = &rest[..len];

    let invalid = || DecodeError::InvalidNumber {
        offset,
        text: String::from_utf8_lossy(text).into_owned(),
    };

    let is_float = validate(text).ok_or_else(invalid)?;
    // `validate` only accepts ASCII.
    let literal = std::str::from_utf8(text).map_err(|_| invalid())?;
    let value = if is_float {
        Value::Float(literal.parse::<f64>().map_err(|_| invalid())?)
    } else {
        // Fails on anything outside the 64-bit range.
        Value::Int(literal.parse::<i64>().map_err(|_| invalid())?)
    };

    cursor.advance(len);
    Ok(value)
}

fn is_terminator(b: u8) -> bool {
    is_blank(b) || matches!(b, b',' | b'}' | b']')
}

/// Check the grammar; returns whether a fractional part was seen.
///
/// Either side of the `.` may be empty (`1.`, `-.5`), but at least one
/// digit is required overall.
fn validate(text: &[u8]) -> Option<bool> {
    let unsigned = text.strip_prefix(b"-").unwrap_or(text);
    let (whole, fraction) = match unsigned.iter().position(|&b| b == b'.') {
        Some(dot) => (&unsigned[..dot], Some(&unsigned[dot + 1..])),
        None => (unsigned, None),
    };
    let digits = |part: &[u8]| part.iter().all(u8::is_ascii_digit);

    if !digits(whole) || !fraction.map_or(true, digits) {
        return None;
    }
    if whole.is_empty() && fraction.map_or(true, <[u8]>::is_empty) {
        return None;
    }
    Some(fraction.is_some())
}
