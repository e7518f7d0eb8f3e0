//! 128-bit globally unique identifiers, stored in JSON as text.

use crate::error::{JsonError, Result};
use std::fmt;
use std::str::FromStr;

/// A GUID in textual byte order.
///
/// Parsing accepts the plain 32-digit form, the hyphenated form, and the
/// hyphenated form wrapped in braces or parentheses, in either case. The
/// canonical text is lowercase and hyphenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Guid([u8; 16]);

impl Guid {
    pub const NIL: Guid = Guid([0; 16]);

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Guid(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == [0; 16]
    }
}

impl FromStr for Guid {
    type Err = JsonError;

    fn from_str(text: &str) -> Result<Guid> {
        let bad = || JsonError::format(format!("\"{text}\" is not a valid GUID"));
        let inner = match text.len() {
            32 => return decode_hex(text).ok_or_else(bad),
            36 => text,
            38 if (text.starts_with('{') && text.ends_with('}'))
                || (text.starts_with('(') && text.ends_with(')')) =>
            {
                &text[1..37]
            }
            _ => return Err(bad()),
        };
        let bytes = inner.as_bytes();
        if [8, 13, 18, 23].iter().any(|&i| bytes[i] != b'-') {
            return Err(bad());
        }
        let compact: String = inner.chars().filter(|&c| c != '-').collect();
        if compact.len() != 32 {
            return Err(bad());
        }
        decode_hex(&compact).ok_or_else(bad)
    }
}

fn decode_hex(text: &str) -> Option<Guid> {
    if !text.is_ascii() {
        return None;
    }
    let mut out = [0u8; 16];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&text[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(Guid(out))
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
