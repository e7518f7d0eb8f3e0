//! JSON text → value tree.
//!
//! A recursive-descent reader over one complete document. Any scalar or
//! container may appear at the top level. Object keys go through
//! [`Object::add`], so a repeated key fails with `DuplicateKey` exactly as
//! an explicit insert would.
//!
//! Numbers keep the most precise representation that holds them: integral
//! literals within 64 bits stay integers, other literals that fit a decimal
//! exactly become decimals, and the rest are doubles. A literal outside the
//! double range is a format error.

use crate::container::{Array, Object};
use crate::error::{JsonError, Result};
use crate::number::Number;
use crate::value::Value;
use std::io;
use std::str::FromStr;

/// Per-call reader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Deepest container nesting accepted before the input is rejected.
    pub max_depth: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions { max_depth: 512 }
    }
}

/// Parse a JSON document.
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, &ReadOptions::default())
}

/// Parse a JSON document, or `None` if it is malformed.
pub fn try_parse(text: &str) -> Option<Value> {
    parse(text).ok()
}

pub fn parse_with(text: &str, options: &ReadOptions) -> Result<Value> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        pos: 0,
        depth: 0,
        max_depth: options.max_depth,
    };
    parser.parse_document()
}

/// Read a whole JSON document from `reader`.
pub fn load<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        JsonError::format_at("input is not valid UTF-8", e.utf8_error().valid_up_to())
    })?;
    parse(&text)
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(text: &str) -> Result<Value> {
        parse(text)
    }
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn parse_document(&mut self) -> Result<Value> {
        if self.text.starts_with('\u{feff}') {
            self.pos = '\u{feff}'.len_utf8();
        }
        self.skip_whitespace();
        if self.pos >= self.bytes.len() {
            return Err(JsonError::format_at("empty input", self.pos));
        }
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.error("unexpected trailing characters"));
        }
        Ok(value)
    }

    fn error(&self, message: &str) -> JsonError {
        JsonError::format_at(message, self.pos)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            Some(b'{') => self.nested(Self::parse_object),
            Some(b'[') => self.nested(Self::parse_array),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number().map(Value::Number),
            Some(b't') => self.parse_literal("true", Value::Boolean(true)),
            Some(b'f') => self.parse_literal("false", Value::Boolean(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(self.error(&format!(
                "nesting exceeds the maximum depth of {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.pos += 1; // '{'
        let mut object = Object::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Object(object));
        }
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'"') => {}
                None => return Err(self.error("unterminated object")),
                Some(_) => return Err(self.error("expected a string key")),
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.pos += 1;
            self.skip_whitespace();
            let value = self.parse_value()?;
            object.add(key, value)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(object));
                }
                None => return Err(self.error("unterminated object")),
                Some(_) => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.pos += 1; // '['
        let mut array = Array::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(array));
        }
        loop {
            self.skip_whitespace();
            let value = self.parse_value()?;
            array.add(value)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(array));
                }
                None => return Err(self.error("unterminated array")),
                Some(_) => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1; // opening quote
        let mut out = String::new();
        let mut run = self.pos;
        loop {
            let Some(byte) = self.peek() else {
                return Err(JsonError::format_at("unterminated string", start));
            };
            match byte {
                b'"' => {
                    out.push_str(&self.text[run..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&self.text[run..self.pos]);
                    self.pos += 1;
                    let ch = self.parse_escape()?;
                    out.push(ch);
                    run = self.pos;
                }
                0x00..=0x1f => return Err(self.error("control character in string")),
                _ => self.pos += 1,
            }
        }
    }

    /// Decode the escape after a backslash.
    fn parse_escape(&mut self) -> Result<char> {
        let Some(byte) = self.peek() else {
            return Err(self.error("unterminated escape sequence"));
        };
        self.pos += 1;
        let ch = match byte {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.parse_unicode_escape(),
            _ => {
                self.pos -= 1;
                return Err(self.error("invalid escape sequence"));
            }
        };
        Ok(ch)
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let first = self.parse_hex4()?;
        if (0xDC00..=0xDFFF).contains(&first) {
            return Err(self.error("unpaired low surrogate in unicode escape"));
        }
        if !(0xD800..=0xDBFF).contains(&first) {
            let code = first as u32;
            return char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"));
        }
        if !self.text[self.pos..].starts_with("\\u") {
            return Err(self.error("unpaired high surrogate in unicode escape"));
        }
        self.pos += 2;
        let second = self.parse_hex4()?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err(self.error("unpaired high surrogate in unicode escape"));
        }
        let code = 0x10000 + (((first as u32) - 0xD800) << 10) + ((second as u32) - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u16> {
        let digits = self
            .bytes
            .get(self.pos..self.pos + 4)
            .filter(|d| d.iter().all(u8::is_ascii_hexdigit))
            .ok_or_else(|| self.error("invalid unicode escape"))?;
        let mut code = 0u16;
        for &d in digits {
            let nibble = (d as char).to_digit(16).unwrap_or(0) as u16;
            code = (code << 4) | nibble;
        }
        self.pos += 4;
        Ok(code)
    }

    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn parse_number(&mut self) -> Result<Number> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error("invalid number")),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
                return Err(self.error("expected digits after decimal point"));
            }
            self.skip_digits();
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
                return Err(self.error("expected digits in exponent"));
            }
            self.skip_digits();
        }
        Number::from_literal(&self.text[start..self.pos]).map_err(|e| match e {
            JsonError::Format { message, .. } => JsonError::format_at(message, start),
            other => other,
        })
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.text[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.error("invalid literal"))
        }
    }
}
