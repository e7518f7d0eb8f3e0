//! Value tree → JSON text.
//!
//! Output follows container order exactly. Strings escape `"`, `\`, `/`
//! and every C0 control character; characters above `~` are written as `\uXXXX`,
//! with UTF-16 surrogate pairs outside the BMP. Numbers use the shortest
//! text that parses back to the same value.
//!
//! # Example
//! ```
//! use jsontree_core::{Value, WriteOptions};
//!
//! let doc = Value::object([("a", Value::from(1)), ("b", Value::array([true]).unwrap())]).unwrap();
//! assert_eq!(doc.to_text(&WriteOptions::compact()).unwrap(), r#"{"a":1,"b":[true]}"#);
//! assert_eq!(
//!     doc.to_text(&WriteOptions::indented(2)).unwrap(),
//!     "{\n  \"a\": 1,\n  \"b\": [\n    true\n  ]\n}"
//! );
//! ```

use crate::error::{JsonError, Result};
use crate::value::Value;
use std::io;

/// Per-call serialization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// `None` writes compact text; `Some(width)` puts every member and
    /// element on its own line, indented `width` spaces per level.
    pub indent: Option<usize>,
    /// Write `/` as `\/`.
    pub escape_solidus: bool,
    /// Write characters above `~` as `\uXXXX` escapes.
    pub escape_non_ascii: bool,
}

impl WriteOptions {
    pub const fn compact() -> Self {
        WriteOptions {
            indent: None,
            escape_solidus: true,
            escape_non_ascii: true,
        }
    }

    pub const fn indented(width: usize) -> Self {
        WriteOptions {
            indent: Some(width),
            escape_solidus: true,
            escape_non_ascii: true,
        }
    }

    pub const fn with_escape_solidus(mut self, on: bool) -> Self {
        self.escape_solidus = on;
        self
    }

    pub const fn with_escape_non_ascii(mut self, on: bool) -> Self {
        self.escape_non_ascii = on;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions::compact()
    }
}

impl Value {
    /// Serialize this value. Fails with `InvalidState` for `UNDEFINED` and
    /// for non-finite numbers, which JSON cannot represent.
    pub fn to_text(&self, options: &WriteOptions) -> Result<String> {
        let mut out = String::new();
        write_value(self, options, 0, &mut out)?;
        Ok(out)
    }

    /// Serialize into `writer`. Nothing is written when serialization fails.
    pub fn save<W: io::Write>(&self, mut writer: W, options: &WriteOptions) -> Result<()> {
        let text = self.to_text(options)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn write_value(
    value: &Value,
    options: &WriteOptions,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    match value {
        Value::Undefined => {
            return Err(JsonError::InvalidState(
                "undefined cannot be serialized".to_string(),
            ))
        }
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            if !n.is_finite() {
                return Err(JsonError::InvalidState(format!(
                    "non-finite number {n} cannot be serialized"
                )));
            }
            out.push_str(&n.to_string());
        }
        Value::String(s) => write_string(s, options, out),
        Value::Array(arr) => {
            if arr.is_empty() {
                out.push_str("[]");
                return Ok(());
            }
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(options, depth + 1, out);
                write_value(item, options, depth + 1, out)?;
            }
            newline(options, depth, out);
            out.push(']');
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                out.push_str("{}");
                return Ok(());
            }
            out.push('{');
            for (i, (key, item)) in obj.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(options, depth + 1, out);
                write_string(key, options, out);
                out.push(':');
                if options.indent.is_some() {
                    out.push(' ');
                }
                write_value(item, options, depth + 1, out)?;
            }
            newline(options, depth, out);
            out.push('}');
        }
    }
    Ok(())
}

fn newline(options: &WriteOptions, depth: usize, out: &mut String) {
    if let Some(width) = options.indent {
        out.push('\n');
        out.extend(std::iter::repeat_n(' ', width * depth));
    }
}

fn write_string(s: &str, options: &WriteOptions, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' if options.escape_solidus => out.push_str("\\/"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => push_unicode_escape(c, out),
            c if (c as u32) > 0x7e && options.escape_non_ascii => push_unicode_escape(c, out),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_unicode_escape(c: char, out: &mut String) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{unit:04x}"));
    }
}
