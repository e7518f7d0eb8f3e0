//! URI references, stored in JSON as text.

use crate::error::{JsonError, Result};
use std::fmt;
use std::str::FromStr;

/// An absolute URI or a relative reference.
///
/// Validation is structural only: the text must be non-empty, free of
/// whitespace and control characters, carry well-formed percent escapes, and
/// a leading `scheme:` (if any) must be a valid scheme name. The canonical
/// form lowercases the scheme and is otherwise the input text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    pub fn parse(text: &str) -> Result<Uri> {
        let bad = |why: &str| JsonError::format(format!("\"{text}\" is not a valid URI: {why}"));
        if text.is_empty() {
            return Err(bad("empty"));
        }
        if text.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(bad("contains whitespace or control characters"));
        }
        let bytes = text.as_bytes();
        for (i, _) in text.match_indices('%') {
            let escaped = bytes.get(i + 1..i + 3);
            if !escaped.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                return Err(bad("malformed percent escape"));
            }
        }

        let scheme_end = scheme_delimiter(text);
        match scheme_end {
            Some(end) => {
                let scheme = &text[..end];
                let valid = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
                if !valid {
                    return Err(bad("invalid scheme"));
                }
                Ok(Uri(format!(
                    "{}{}",
                    scheme.to_ascii_lowercase(),
                    &text[end..]
                )))
            }
            None => Ok(Uri(text.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> Option<&str> {
        scheme_delimiter(&self.0).map(|end| &self.0[..end])
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme().is_some()
    }
}

/// Position of the `:` ending a scheme, if the first path segment has one.
fn scheme_delimiter(text: &str) -> Option<usize> {
    let colon = text.find(':')?;
    let first_delimiter = text.find(['/', '?', '#']).unwrap_or(text.len());
    (colon < first_delimiter && colon > 0).then_some(colon)
}

impl FromStr for Uri {
    type Err = JsonError;

    fn from_str(text: &str) -> Result<Uri> {
        Uri::parse(text)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
