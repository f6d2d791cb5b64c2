//! Recursive-descent JSON decoder.
//!
//! The decoder walks the input once, dispatching on the token kind reported
//! by the cursor's one-token lookahead:
//!
//! - strings and numbers go to their scalar decoders,
//! - `true`/`false`/`null` are matched case-insensitively at fixed width,
//! - objects and arrays recurse back into dispatch for every member.
//!
//! # Key design decisions
//!
//! - **Explicit end steps**: element dispatch returns [`Step::End`] when it
//!   meets `}` or `]` instead of a value. Only the composite decoders act on
//!   it; at the root an end marker is a syntax error.
//! - **Lenient delimiters**: a trailing comma before the closing delimiter is
//!   accepted (`[1,2,]`, `{"a":1,}`).
//! - **Trailing bytes**: anything after the root value is left unread.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::coerce::{self, Destination, FromValue};
use crate::cursor::{Cursor, Token};
use crate::de;
use crate::error::{DecodeError, Result};
use crate::number::decode_number;
use crate::string::decode_string;
use crate::value::{Object, Value};

/// Nesting limit applied by [`Parser::default`]. Every level costs a few
/// stack frames, so the limit stays within a 2 MiB thread stack even in
/// unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decode `input` and coerce the result into `dst`.
///
/// `dst` is either `&mut T` or `Option<&mut T>` for any `T: FromValue`. On
/// error the destination is left untouched.
///
/// ```
/// let mut n: i64 = 0;
/// laxjson_core::decode(b"-1234", &mut n).unwrap();
/// assert_eq!(n, -1234);
/// ```
pub fn decode<D: Destination>(input: &[u8], dst: D) -> Result<()> {
    Parser::default().decode(input, dst)
}

/// Decode `input` into a freshly built `T`.
pub fn from_slice<T: FromValue>(input: &[u8]) -> Result<T> {
    Parser::default().from_slice(input)
}

/// Decode `input` and hand the result to `T`'s serde `Deserialize` impl.
pub fn deserialize<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    Parser::default().deserialize(input)
}

/// Decode `input` into a generic [`Value`] without coercion.
pub fn parse(input: &[u8]) -> Result<Value> {
    Parser::default().parse(input)
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of nested objects/arrays. Deeper input fails with
    /// [`DecodeError::DepthLimitExceeded`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn parse(&self, input: &[u8]) -> Result<Value> {
        let mut decoder = Decoder {
            cursor: Cursor::new(input),
            depth: 0,
            max_depth: self.max_depth,
        };
        match decoder.root() {
            Ok(value) => {
                debug!(
                    bytes = input.len(),
                    consumed = decoder.cursor.pos(),
                    root = value.kind(),
                    "decoded document"
                );
                Ok(value)
            }
            Err(err) => {
                debug!(bytes = input.len(), error = %err, "decode failed");
                Err(err)
            }
        }
    }

    pub fn from_slice<T: FromValue>(&self, input: &[u8]) -> Result<T> {
        T::from_value(self.parse(input)?)
    }

    pub fn deserialize<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T> {
        de::from_value(self.parse(input)?)
    }

    pub fn decode<D: Destination>(&self, input: &[u8], dst: D) -> Result<()> {
        let value = self.parse(input)?;
        coerce::assign(value, dst)
    }
}

/// Which composite an end marker closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closer {
    Object,
    Array,
}

/// Outcome of dispatching on the next token.
#[derive(Debug)]
enum Step {
    Value(Value),
    /// A closing delimiter where a value could start; not consumed.
    End(Closer),
}

struct Decoder<'a> {
    cursor: Cursor<'a>,
    depth: usize,
    max_depth: usize,
}

impl Decoder<'_> {
    fn root(&mut self) -> Result<Value> {
        match self.step()? {
            Step::Value(value) => Ok(value),
            Step::End(_) => Err(self.cursor.syntax_error()),
        }
    }

    fn step(&mut self) -> Result<Step> {
        let value = match self.cursor.peek()? {
            Token::ObjectEnd => return Ok(Step::End(Closer::Object)),
            Token::ArrayEnd => return Ok(Step::End(Closer::Array)),
            Token::String => Value::Str(decode_string(&mut self.cursor)?),
            Token::Number => decode_number(&mut self.cursor)?,
            Token::ObjectStart => self.object()?,
            Token::ArrayStart => self.array()?,
            Token::Bool => self.boolean()?,
            Token::Null => self.null()?,
        };
        Ok(Step::Value(value))
    }

    fn object(&mut self) -> Result<Value> {
        self.enter()?;
        trace_open("object", self.cursor.pos(), self.depth);
        self.cursor.advance(1);

        let mut map = Object::new();
        loop {
            match self.cursor.peek()? {
                Token::ObjectEnd => {
                    self.cursor.advance(1);
                    break;
                }
                Token::String => {}
                _ => return Err(self.cursor.syntax_error()),
            }
            let key = decode_string(&mut self.cursor)?;

            if self.cursor.peek_byte() != Some(b':') {
                return Err(DecodeError::MissingColon {
                    offset: self.cursor.pos(),
                });
            }
            self.cursor.advance(1);

            let value = match self.step()? {
                Step::Value(value) => value,
                Step::End(_) => return Err(self.cursor.syntax_error()),
            };
            map.insert(key, value);

            if self.delimiter(Closer::Object)? {
                break;
            }
        }

        trace_close("object", self.cursor.pos(), map.len());
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn array(&mut self) -> Result<Value> {
        self.enter()?;
        trace_open("array", self.cursor.pos(), self.depth);
        self.cursor.advance(1);

        let mut items = Vec::new();
        loop {
            match self.step()? {
                Step::End(Closer::Array) => {
                    self.cursor.advance(1);
                    break;
                }
                Step::End(Closer::Object) => return Err(self.cursor.syntax_error()),
                Step::Value(value) => items.push(value),
            }

            if self.delimiter(Closer::Array)? {
                break;
            }
        }

        trace_close("array", self.cursor.pos(), items.len());
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Consume the `,` or closing delimiter after a member. Returns `true`
    /// when the composite is closed.
    fn delimiter(&mut self, closer: Closer) -> Result<bool> {
        let closed = match (self.cursor.peek_byte(), closer) {
            (Some(b','), _) => false,
            (Some(b'}'), Closer::Object) | (Some(b']'), Closer::Array) => true,
            (Some(b'}' | b']'), _) => return Err(self.cursor.syntax_error()),
            _ => {
                return Err(DecodeError::MissingComma {
                    offset: self.cursor.pos(),
                })
            }
        };
        self.cursor.advance(1);
        Ok(closed)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn boolean(&mut self) -> Result<Value> {
        if self.literal(b"true") {
            Ok(Value::Bool(true))
        } else if self.literal(b"false") {
            Ok(Value::Bool(false))
        } else {
            Err(self.cursor.syntax_error())
        }
    }

    fn null(&mut self) -> Result<Value> {
        if self.literal(b"null") {
            Ok(Value::Null)
        } else {
            Err(self.cursor.syntax_error())
        }
    }

    /// Case-insensitive fixed-width match; consumes the word on success.
    fn literal(&mut self, word: &[u8]) -> bool {
        let matched = self
            .cursor
            .rest()
            .get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word));
        if matched {
            self.cursor.advance(word.len());
        }
        matched
    }
}

// Kept out of line so the event machinery does not widen the recursive frames.
#[inline(never)]
fn trace_open(kind: &'static str, offset: usize, depth: usize) {
    trace!(kind, offset, depth, "open");
}

#[inline(never)]
fn trace_close(kind: &'static str, offset: usize, len: usize) {
    trace!(kind, offset, len, "close");
}
