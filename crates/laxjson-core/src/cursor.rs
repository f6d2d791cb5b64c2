//! Positional view over the input buffer with one-token lookahead.
//!
//! The cursor never consumes a token when classifying it: [`Cursor::peek`]
//! skips blank bytes and reports what kind of value (or delimiter) starts at
//! the current position, leaving the decoders free to dispatch on it.

use crate::error::{DecodeError, Result};

/// Bytes shown on each side of the failing offset in syntax errors.
const CONTEXT_WINDOW: usize = 10;

/// Kind of token starting at the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    String,
    Number,
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    Bool,
    Null,
}

#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// The byte at the current position, if any.
    pub(crate) fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// The unread remainder of the input.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    pub(crate) fn skip_blank(&mut self) {
        while let Some(b) = self.current() {
            if !is_blank(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Skip blank bytes and return the next significant byte without
    /// consuming it.
    pub(crate) fn peek_byte(&mut self) -> Option<u8> {
        self.skip_blank();
        self.current()
    }

    /// Skip blank bytes and classify the next significant byte.
    pub(crate) fn peek(&mut self) -> Result<Token> {
        let Some(b) = self.peek_byte() else {
            return Err(DecodeError::UnexpectedEnd { offset: self.pos });
        };
        match b {
            b'"' => Ok(Token::String),
            b'0'..=b'9' | b'-' => Ok(Token::Number),
            b'{' => Ok(Token::ObjectStart),
            b'}' => Ok(Token::ObjectEnd),
            b'[' => Ok(Token::ArrayStart),
            b']' => Ok(Token::ArrayEnd),
            b't' | b'T' | b'f' | b'F' => Ok(Token::Bool),
            b'n' => Ok(Token::Null),
            _ => Err(self.syntax_error()),
        }
    }

    /// Build a syntax error pointing at the current position.
    pub(crate) fn syntax_error(&self) -> DecodeError {
        DecodeError::Syntax {
            offset: self.pos,
            context: context_window(self.input, self.pos),
        }
    }
}

/// Space, tab, and line breaks separate tokens.
pub(crate) fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Render the bytes around `pos` as `before -->c<-- after`.
fn context_window(input: &[u8], pos: usize) -> String {
    let start = pos.saturating_sub(CONTEXT_WINDOW);
    let end = (pos + 1 + CONTEXT_WINDOW).min(input.len());
    let before = String::from_utf8_lossy(&input[start..pos.min(input.len())]);
    let (current, after) = if pos < input.len() {
        (
            String::from_utf8_lossy(&input[pos..pos + 1]),
            String::from_utf8_lossy(&input[pos + 1..end]),
        )
    } else {
        (Default::default(), Default::default())
    };
    format!("{before} -->{current}<-- {after}")
}
