//! Cursor-based tokenizer over a single input line
//!
//! A [`Tokenizer`] reads typed lexemes off the front of the remaining input and
//! advances its cursor exactly past what it consumed. Positions are byte
//! offsets into the text and always sit on a character boundary.
//!
//! Every recoverable failure (numbers, booleans, `expect`) leaves the cursor
//! where the read started, so a caller can try another interpretation. Errors
//! inside a quoted string (bad escape, missing closing quote) leave the cursor
//! where the problem was found.

use crate::core::value::ArgKind;
use crate::error::{CommandError, Result};
use std::str::FromStr;
use tracing::trace;

const SYNTAX_QUOTE: char = '"';
const SYNTAX_ESCAPE: char = '\\';

/// Typed read operations over a string
pub trait StringReader {
    /// Read the character under the cursor and advance past it
    fn next_char(&mut self) -> Result<char>;
    /// Advance past the character under the cursor
    fn skip(&mut self);
    /// Advance past a run of whitespace, possibly empty
    fn skip_whitespace(&mut self);
    fn read_int32(&mut self) -> Result<i32>;
    fn read_int64(&mut self) -> Result<i64>;
    fn read_single(&mut self) -> Result<f32>;
    fn read_double(&mut self) -> Result<f64>;
    /// Read a run of `[0-9A-Za-z_.+-]`; never fails, may be empty
    fn read_unquoted_string(&mut self) -> String;
    /// Read a `"`-delimited string, decoding `\"` and `\\`
    fn read_quoted_string(&mut self) -> Result<String>;
    /// Read a quoted string if the cursor is on a quote, otherwise an unquoted one
    fn read_string(&mut self) -> Result<String>;
    /// Read `true` or `false`
    fn read_boolean(&mut self) -> Result<bool>;
    /// Require `c` under the cursor and advance past it
    fn expect(&mut self, c: char) -> Result<()>;
}

/// Reader over an immutable line with a mutable cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer with the cursor at the start of `text`
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor, e.g. to rewind to a previously recorded position
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.text.len() || !self.text.is_char_boundary(position) {
            return Err(CommandError::InvalidPosition {
                position,
                length: self.text.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Total length of the text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Characters left after the cursor
    pub fn remaining_len(&self) -> usize {
        self.remaining().chars().count()
    }

    /// Text before the cursor
    pub fn consumed(&self) -> &'a str {
        let text = self.text;
        &text[..self.position]
    }

    /// Text from the cursor on
    pub fn remaining(&self) -> &'a str {
        let text = self.text;
        &text[self.position..]
    }

    /// Whether `length` more characters are available
    pub fn can_read(&self, length: usize) -> bool {
        length == 0 || self.remaining().chars().nth(length - 1).is_some()
    }

    pub fn is_readable(&self) -> bool {
        self.position < self.text.len()
    }

    /// Character under the cursor
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Character `offset` characters past the cursor
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.remaining().chars().nth(offset)
    }

    fn scan_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.position;
        while let Some(c) = self.peek() {
            if !accept(c) {
                break;
            }
            self.position += c.len_utf8();
        }
        let text = self.text;
        &text[start..self.position]
    }

    /// Shared scan for all numeric reads; the target type's parser rejects
    /// runs such as `1.5` for integers or `--1` for anything.
    fn read_number<T: FromStr>(&mut self, kind: ArgKind) -> Result<T> {
        let start = self.position;
        let token = self.scan_while(is_number_char);
        if token.is_empty() {
            return Err(CommandError::missing_value(start, kind.name()));
        }

        match token.parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                trace!("Rejected '{}' as {} on position {}", token, kind, start);
                self.position = start;
                Err(CommandError::wrong_type(start, kind.name(), token))
            }
        }
    }
}

impl StringReader for Tokenizer<'_> {
    fn next_char(&mut self) -> Result<char> {
        let c = self.peek().ok_or(CommandError::EndOfInput {
            position: self.position,
        })?;
        self.position += c.len_utf8();
        Ok(c)
    }

    fn skip(&mut self) {
        if let Some(c) = self.peek() {
            self.position += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        self.scan_while(char::is_whitespace);
    }

    fn read_int32(&mut self) -> Result<i32> {
        self.read_number(ArgKind::Int32)
    }

    fn read_int64(&mut self) -> Result<i64> {
        self.read_number(ArgKind::Int64)
    }

    fn read_single(&mut self) -> Result<f32> {
        self.read_number(ArgKind::Single)
    }

    fn read_double(&mut self) -> Result<f64> {
        self.read_number(ArgKind::Double)
    }

    fn read_unquoted_string(&mut self) -> String {
        self.scan_while(is_allowed_in_unquoted_string).to_string()
    }

    fn read_quoted_string(&mut self) -> Result<String> {
        match self.peek() {
            None => {
                return Err(CommandError::EndOfInput {
                    position: self.position,
                });
            }
            Some(SYNTAX_QUOTE) => self.skip(),
            Some(c) => {
                return Err(CommandError::unexpected_char(self.position, "quote", Some(c)));
            }
        }

        let mut result = String::new();
        let mut escaped = false;
        while let Some(c) = self.peek() {
            if escaped {
                if c != SYNTAX_QUOTE && c != SYNTAX_ESCAPE {
                    return Err(CommandError::InvalidEscape {
                        position: self.position,
                        found: c,
                    });
                }
                result.push(c);
                escaped = false;
            } else if c == SYNTAX_ESCAPE {
                escaped = true;
            } else if c == SYNTAX_QUOTE {
                self.position += c.len_utf8();
                return Ok(result);
            } else {
                result.push(c);
            }
            self.position += c.len_utf8();
        }

        Err(CommandError::UnterminatedQuote {
            position: self.position,
        })
    }

    fn read_string(&mut self) -> Result<String> {
        if self.peek() == Some(SYNTAX_QUOTE) {
            self.read_quoted_string()
        } else {
            Ok(self.read_unquoted_string())
        }
    }

    fn read_boolean(&mut self) -> Result<bool> {
        let start = self.position;
        let value = self.read_string().inspect_err(|_| self.position = start)?;

        match value.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            "" => {
                self.position = start;
                Err(CommandError::missing_value(start, ArgKind::Boolean.name()))
            }
            _ => {
                self.position = start;
                Err(CommandError::wrong_type(start, ArgKind::Boolean.name(), value))
            }
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        match self.peek() {
            Some(found) if found == c => {
                self.skip();
                Ok(())
            }
            found => Err(CommandError::unexpected_char(
                self.position,
                format!("symbol '{c}'"),
                found,
            )),
        }
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

/// Characters an unquoted string may contain
pub fn is_allowed_in_unquoted_string(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

/// Wrap `s` in quotes, escaping `"` and `\` so `read_quoted_string` returns it unchanged
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push(SYNTAX_QUOTE);
    for c in s.chars() {
        if c == SYNTAX_QUOTE || c == SYNTAX_ESCAPE {
            quoted.push(SYNTAX_ESCAPE);
        }
        quoted.push(c);
    }
    quoted.push(SYNTAX_QUOTE);
    quoted
}
