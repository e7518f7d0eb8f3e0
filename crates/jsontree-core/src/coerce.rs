//! Scalar coercion: reading a value as a host type.
//!
//! | source  | legal targets                                                  |
//! |---------|----------------------------------------------------------------|
//! | Number  | every numeric type (range-checked), `String`, `Number`          |
//! | String  | `String`, `char`, `bool`, every numeric type (parsed), `Uri`,   |
//! |         | `Guid`, `DateTime<Utc>`, `DateTime<FixedOffset>`, `Number`      |
//! | Boolean | `bool`, `String`                                                |
//! | Null    | `Option<T>` (as `None`)                                         |
//!
//! Everything else fails with `InvalidCast`. Malformed text fails with
//! `FormatError`; numbers out of the target's range fail with `Overflow`.
//! Text is parsed by content, so `"1"` reads as the integer `1`.

use crate::datetime;
use crate::decimal::Decimal;
use crate::error::{JsonError, Result};
use crate::guid::Guid;
use crate::number::{Number, NumericType};
use crate::uri::Uri;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, Utc};

/// Host types a [`Value`] can be read as.
pub trait FromValue: Sized {
    /// Name used in `InvalidCast`/`Overflow` messages.
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Result<Self>;
}

impl Value {
    /// Convert this value to `T`, failing with the coercion error taxonomy.
    pub fn read_as<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    /// Convert this value to `T`; `None` on any failure.
    pub fn try_read_as<T: FromValue>(&self) -> Option<T> {
        T::from_value(self).ok()
    }

    /// Convert this value to `T`, falling back to `default` on any failure.
    pub fn read_as_or<T: FromValue>(&self, default: T) -> T {
        T::from_value(self).unwrap_or(default)
    }
}

fn cast_error(value: &Value, to: &'static str) -> JsonError {
    JsonError::invalid_cast(value.kind().to_string(), to)
}

/// Parse scalar text with the invariant numeric grammar: optional sign,
/// digits with optional fraction, optional exponent; surrounding
/// whitespace is ignored.
fn number_from_text(text: &str) -> Result<Number> {
    let trimmed = text.trim();
    if !is_numeric_text(trimmed) {
        let message = format!("\"{text}\" is not a valid number");
        return Err(JsonError::format(message));
    }
    Number::from_literal(trimmed)
}

fn is_numeric_text(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

fn has_fraction(number: &Number) -> bool {
    match *number {
        Number::I64(_) | Number::U64(_) => false,
        Number::F32(v) => v.is_finite() && v.fract() != 0.0,
        Number::F64(v) => v.is_finite() && v.fract() != 0.0,
        Number::Decimal(d) => !d.is_integral(),
    }
}

fn read_integer(value: &Value, target: NumericType) -> Result<i128> {
    match value {
        Value::Number(n) => n.to_integer(target),
        Value::String(s) => {
            let n = number_from_text(s)?;
            if has_fraction(&n) {
                return Err(JsonError::format(format!(
                    "\"{s}\" is not an integral number"
                )));
            }
            n.to_integer(target)
        }
        _ => Err(cast_error(value, target.name())),
    }
}

macro_rules! from_value_integer {
    ($($t:ty => $target:expr),* $(,)?) => {
        $(
            impl FromValue for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn from_value(value: &Value) -> Result<Self> {
                    let raw = read_integer(value, $target)?;
                    <$t>::try_from(raw).map_err(|_| JsonError::overflow(raw, Self::TYPE_NAME))
                }
            }
        )*
    };
}

from_value_integer!(
    i8 => NumericType::I8,
    u8 => NumericType::U8,
    i16 => NumericType::I16,
    u16 => NumericType::U16,
    i32 => NumericType::I32,
    u32 => NumericType::U32,
    i64 => NumericType::I64,
    u64 => NumericType::U64,
);

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            Value::String(s) => Ok(number_from_text(s)?.as_f64()),
            _ => Err(cast_error(value, Self::TYPE_NAME)),
        }
    }
}

impl FromValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.to_f32(),
            Value::String(s) => number_from_text(s)?.to_f32(),
            _ => Err(cast_error(value, Self::TYPE_NAME)),
        }
    }
}

impl FromValue for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.to_decimal(),
            Value::String(s) => {
                let trimmed = s.trim();
                if !is_numeric_text(trimmed) {
                    return Err(JsonError::format(format!("\"{s}\" is not a valid number")));
                }
                trimmed.parse()
            }
            _ => Err(cast_error(value, Self::TYPE_NAME)),
        }
    }
}

impl FromValue for Number {
    const TYPE_NAME: &'static str = "number";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(*n),
            Value::String(s) => number_from_text(s),
            _ => Err(cast_error(value, Self::TYPE_NAME)),
        }
    }
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Boolean(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            Value::String(s) => Err(JsonError::format(format!(
                "\"{s}\" is not a valid boolean"
            ))),
            _ => Err(cast_error(value, Self::TYPE_NAME)),
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Boolean(b) => Ok(b.to_string()),
            _ => Err(cast_error(value, Self::TYPE_NAME)),
        }
    }
}

impl FromValue for char {
    const TYPE_NAME: &'static str = "char";

    fn from_value(value: &Value) -> Result<Self> {
        let Value::String(s) = value else {
            return Err(cast_error(value, Self::TYPE_NAME));
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(JsonError::format(format!(
                "\"{s}\" is not a single character"
            ))),
        }
    }
}

/// Implement `FromValue` for a type read only from `String` values.
macro_rules! from_value_text {
    ($t:ty, $name:literal, $parse:expr) => {
        impl FromValue for $t {
            const TYPE_NAME: &'static str = $name;

            fn from_value(value: &Value) -> Result<Self> {
                match value {
                    Value::String(s) => $parse(s.as_str()),
                    _ => Err(cast_error(value, Self::TYPE_NAME)),
                }
            }
        }
    };
}

from_value_text!(Uri, "uri", Uri::parse);
from_value_text!(Guid, "guid", str::parse::<Guid>);
from_value_text!(DateTime<Utc>, "date/time", datetime::parse_utc);
from_value_text!(DateTime<FixedOffset>, "date/time with offset", datetime::parse_offset);

/// `Null` reads as `None`; every other kind must convert to `T`.
impl<T: FromValue> FromValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
