//! String literal decoding.
//!
//! Raw bytes are copied verbatim until a backslash or the closing quote.
//! Every escape form writes into the same byte buffer, which is interpreted
//! as UTF-8 only once the literal ends. That lets consecutive `\xHH` escapes
//! spell out a multi-byte character one byte at a time:
//!
//! | selector | form         | meaning                                      |
//! |----------|--------------|----------------------------------------------|
//! | `u`      | `\uXXXX`     | UTF-16 code unit (surrogates must pair up)   |
//! | `U`      | `\UXXXXXXXX` | Unicode scalar value                         |
//! | `x`      | `\xHH`       | one raw byte                                 |
//! | other    | `\n`, `\"`…  | literal substitution                         |

use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};

/// Decode the string literal starting at the cursor (which must sit on the
/// opening quote). On success the cursor is left just past the closing quote.
pub(crate) fn decode_string(cursor: &mut Cursor<'_>) -> Result<String> {
    let start = cursor.pos();
    cursor.advance(1);

    let mut buf = Vec::new();
    loop {
        let rest = cursor.rest();
        let Some(stop) = rest.iter().position(|&b| b == b'"' || b == b'\\') else {
            return Err(DecodeError::UnterminatedString { offset: start });
        };
        buf.extend_from_slice(&rest[..stop]);
        cursor.advance(stop);
        if rest[stop] == b'"' {
            cursor.advance(1);
            break;
        }
        decode_escape(cursor, &mut buf, start)?;
    }

    String::from_utf8(buf).map_err(|_| DecodeError::InvalidUtf8 { offset: start })
}

/// Decode one escape sequence. The cursor sits on the backslash and is
/// moved past the whole sequence.
fn decode_escape(cursor: &mut Cursor<'_>, buf: &mut Vec<u8>, string_start: usize) -> Result<()> {
    let offset = cursor.pos();
    let Some(&selector) = cursor.rest().get(1) else {
        return Err(DecodeError::UnterminatedString {
            offset: string_start,
        });
    };

    match selector {
        b'u' => {
            let unit = read_hex(cursor.rest(), 4, offset, string_start)?;
            cursor.advance(6);
            let code_point = match unit {
                0xD800..=0xDBFF => {
                    let low = read_low_surrogate(cursor, unit, string_start)?;
                    cursor.advance(6);
                    0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                }
                0xDC00..=0xDFFF => {
                    return Err(DecodeError::InvalidEscape {
                        offset,
                        message: format!("unpaired low surrogate \\u{unit:04X}"),
                    });
                }
                _ => unit,
            };
            push_char(buf, code_point, offset)
        }
        b'U' => {
            let code_point = read_hex(cursor.rest(), 8, offset, string_start)?;
            cursor.advance(10);
            push_char(buf, code_point, offset)
        }
        b'x' => {
            let byte = read_hex(cursor.rest(), 2, offset, string_start)?;
            cursor.advance(4);
            // Two hex digits never exceed 0xFF.
            buf.push(byte as u8);
            Ok(())
        }
        other => {
            let substitute = match other {
                b'"' => b'"',
                b'\\' => b'\\',
                b'/' => b'/',
                b't' => b'\t',
                b'b' => 0x08,
                b'n' => b'\n',
                b'r' => b'\r',
                b'f' => 0x0C,
                _ => {
                    return Err(DecodeError::InvalidEscape {
                        offset,
                        message: format!(
                            "unknown escape selector '{}'",
                            char::from(other).escape_default()
                        ),
                    });
                }
            };
            buf.push(substitute);
            cursor.advance(2);
            Ok(())
        }
    }
}

/// The cursor sits just past a high surrogate; require `\uXXXX` holding the
/// matching low half and return it without consuming.
fn read_low_surrogate(cursor: &Cursor<'_>, high: u32, string_start: usize) -> Result<u32> {
    let offset = cursor.pos();
    let unpaired = || DecodeError::InvalidEscape {
        offset,
        message: format!("high surrogate \\u{high:04X} is not followed by a low surrogate"),
    };

    let rest = cursor.rest();
    if !rest.starts_with(b"\\u") {
        return Err(unpaired());
    }
    let low = read_hex(rest, 4, offset, string_start)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(unpaired());
    }
    Ok(low)
}

/// Read `count` hex digits following a two-byte escape prefix in `rest`.
fn read_hex(rest: &[u8], count: usize, offset: usize, string_start: usize) -> Result<u32> {
    let mut value = 0u32;
    for i in 0..count {
        let Some(&b) = rest.get(2 + i) else {
            return Err(DecodeError::UnterminatedString {
                offset: string_start,
            });
        };
        let digit = char::from(b)
            .to_digit(16)
            .ok_or_else(|| DecodeError::InvalidEscape {
                offset,
                message: format!("expected {count} hex digits"),
            })?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

fn push_char(buf: &mut Vec<u8>, code_point: u32, offset: usize) -> Result<()> {
    let ch = char::from_u32(code_point).ok_or_else(|| DecodeError::InvalidEscape {
        offset,
        message: format!("U+{code_point:04X} is not a Unicode scalar value"),
    })?;
    let mut utf8 = [0u8; 4];
    buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    Ok(())
}
