//! Numeric scalars and the host numeric type lattice.
//!
//! A [`Number`] keeps the representation it was built from (64-bit integer,
//! float, or decimal) so reads as integer types never lose precision. The
//! legality of cross-type reads is decided by [`NumericType::widens_to`], an
//! explicit table of implicit (lossless-in-range) conversions; anything
//! that is not a widening is range-checked and fails with `Overflow`.

use crate::decimal::Decimal;
use crate::error::{JsonError, Result};
use std::fmt;

/// Host numeric types a number can be read as or built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
}

use NumericType::{F32, F64, I16, I32, I64, I8, U16, U32, U64, U8};

const DECIMAL: NumericType = NumericType::Decimal;

/// Implicit widening edges, narrow to wide.
const WIDENING: &[(NumericType, &[NumericType])] = &[
    (I8, &[I16, I32, I64, F32, F64, DECIMAL]),
    (U8, &[I16, U16, I32, U32, I64, U64, F32, F64, DECIMAL]),
    (I16, &[I32, I64, F32, F64, DECIMAL]),
    (U16, &[I32, U32, I64, U64, F32, F64, DECIMAL]),
    (I32, &[I64, F32, F64, DECIMAL]),
    (U32, &[I64, U64, F32, F64, DECIMAL]),
    (I64, &[F32, F64, DECIMAL]),
    (U64, &[F32, F64, DECIMAL]),
    (F32, &[F64]),
    (F64, &[]),
    (DECIMAL, &[]),
];

impl NumericType {
    pub fn name(self) -> &'static str {
        match self {
            I8 => "i8",
            U8 => "u8",
            I16 => "i16",
            U16 => "u16",
            I32 => "i32",
            U32 => "u32",
            I64 => "i64",
            U64 => "u64",
            F32 => "f32",
            F64 => "f64",
            NumericType::Decimal => "decimal",
        }
    }

    /// True when every value of `self` converts to `target` without a range
    /// check. Identity counts as a widening.
    pub fn widens_to(self, target: NumericType) -> bool {
        self == target
            || WIDENING
                .iter()
                .find(|(from, _)| *from == self)
                .is_some_and(|(_, wider)| wider.contains(&target))
    }

    pub fn is_integral(self) -> bool {
        !matches!(self, F32 | F64 | NumericType::Decimal)
    }

    /// Inclusive range of an integral type.
    pub(crate) fn integer_bounds(self) -> (i128, i128) {
        match self {
            I8 => (i8::MIN as i128, i8::MAX as i128),
            U8 => (0, u8::MAX as i128),
            I16 => (i16::MIN as i128, i16::MAX as i128),
            U16 => (0, u16::MAX as i128),
            I32 => (i32::MIN as i128, i32::MAX as i128),
            U32 => (0, u32::MAX as i128),
            I64 => (i64::MIN as i128, i64::MAX as i128),
            U64 => (0, u64::MAX as i128),
            F32 | F64 | NumericType::Decimal => (i128::MIN, i128::MAX),
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON number in the representation it was produced with.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
}

impl Number {
    pub fn numeric_type(&self) -> NumericType {
        match self {
            Number::I64(_) => I64,
            Number::U64(_) => U64,
            Number::F32(_) => F32,
            Number::F64(_) => F64,
            Number::Decimal(_) => NumericType::Decimal,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::I64(_) | Number::U64(_))
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::F32(f) => f.is_finite(),
            Number::F64(f) => f.is_finite(),
            _ => true,
        }
    }

    /// Exact `i64` value, if the number is integral and in range.
    pub fn as_i64(&self) -> Option<i64> {
        self.exact_integer().and_then(|v| i64::try_from(v).ok())
    }

    /// Exact `u64` value, if the number is integral and in range.
    pub fn as_u64(&self) -> Option<u64> {
        self.exact_integer().and_then(|v| u64::try_from(v).ok())
    }

    /// Nearest `f64`. Single-precision values go through their shortest
    /// text so `0.1f32` reads back as `0.1`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::I64(v) => v as f64,
            Number::U64(v) => v as f64,
            Number::F32(v) => format!("{v:e}").parse().unwrap_or(v as f64),
            Number::F64(v) => v,
            Number::Decimal(d) => d.to_f64(),
        }
    }

    fn exact_integer(&self) -> Option<i128> {
        match *self {
            Number::I64(v) => Some(v as i128),
            Number::U64(v) => Some(v as i128),
            Number::F32(v) => float_exact_integer(v as f64),
            Number::F64(v) => float_exact_integer(v),
            Number::Decimal(d) => d.is_integral().then(|| d.round_to_integer()),
        }
    }

    /// The value as a decimal when that is exact.
    fn exact_decimal(&self) -> Option<Decimal> {
        match *self {
            Number::I64(v) => Some(v.into()),
            Number::U64(v) => Some(v.into()),
            Number::F32(v) if v.is_finite() => Decimal::parse_exact(&format!("{v:e}")),
            Number::F64(v) if v.is_finite() => Decimal::parse_exact(&format!("{v:e}")),
            Number::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Convert to an integral target. Widening sources skip the range check;
    /// floats and decimals round half to even first.
    pub(crate) fn to_integer(&self, target: NumericType) -> Result<i128> {
        let raw = match *self {
            Number::I64(v) => v as i128,
            Number::U64(v) => v as i128,
            Number::F32(v) => round_float(v as f64, target)?,
            Number::F64(v) => round_float(v, target)?,
            Number::Decimal(d) => d.round_to_integer(),
        };
        if self.numeric_type().widens_to(target) {
            return Ok(raw);
        }
        let (min, max) = target.integer_bounds();
        if raw < min || raw > max {
            return Err(JsonError::overflow(self, target.name()));
        }
        Ok(raw)
    }

    pub(crate) fn to_f32(&self) -> Result<f32> {
        match *self {
            Number::F32(v) => Ok(v),
            Number::F64(v) => {
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    return Err(JsonError::overflow(self, F32.name()));
                }
                Ok(v as f32)
            }
            Number::I64(v) => Ok(v as f32),
            Number::U64(v) => Ok(v as f32),
            Number::Decimal(d) => Ok(d.to_f64() as f32),
        }
    }

    pub(crate) fn to_decimal(&self) -> Result<Decimal> {
        match *self {
            Number::I64(v) => Ok(v.into()),
            Number::U64(v) => Ok(v.into()),
            Number::F32(v) => Decimal::from_f32(v),
            Number::F64(v) => Decimal::from_f64(v),
            Number::Decimal(d) => Ok(d),
        }
    }

    /// Classify numeric text: integral literals that fit 64 bits stay
    /// integers, exactly representable literals become decimals, everything
    /// else is a finite double. The caller has validated the grammar.
    pub(crate) fn from_literal(text: &str) -> Result<Number> {
        let integral = text
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'-' || b == b'+');
        if integral {
            if let Ok(v) = text.parse::<i64>() {
                return Ok(Number::I64(v));
            }
            if let Ok(v) = text.trim_start_matches('+').parse::<u64>() {
                return Ok(Number::U64(v));
            }
        }
        if let Some(d) = Decimal::parse_exact(text) {
            return Ok(Number::Decimal(d));
        }
        let invalid = || JsonError::format(format!("\"{text}\" is not a valid number"));
        let value: f64 = text.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(JsonError::format(format!(
                "\"{text}\" is outside the range of a double"
            )));
        }
        Ok(Number::F64(value))
    }
}

fn float_exact_integer(v: f64) -> Option<i128> {
    (v.is_finite() && v.fract() == 0.0 && v.abs() < 1e38).then_some(v as i128)
}

fn round_float(v: f64, target: NumericType) -> Result<i128> {
    if !v.is_finite() || v.abs() >= 1e38 {
        return Err(JsonError::overflow(v, target.name()));
    }
    Ok(v.round_ties_even() as i128)
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        if self.is_integer() && other.is_integer() {
            return self.exact_integer() == other.exact_integer();
        }
        match (self.exact_decimal(), other.exact_decimal()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

/// Shortest text that parses back to the same double, using exponent form
/// only for very large or very small magnitudes.
pub(crate) fn format_f64(v: f64) -> String {
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

fn format_f32(v: f32) -> String {
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

impl fmt::Display for Number {
    /// Canonical round-trip text. Decimals are normalized (`1.50` prints
    /// `1.5`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::I64(v) => write!(f, "{v}"),
            Number::U64(v) => write!(f, "{v}"),
            Number::F32(v) => f.write_str(&format_f32(v)),
            Number::F64(v) => f.write_str(&format_f64(v)),
            Number::Decimal(d) => write!(f, "{}", d.normalize()),
        }
    }
}

macro_rules! number_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::I64(value as i64)
                }
            }
        )*
    };
}

macro_rules! number_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::U64(value as u64)
                }
            }
        )*
    };
}

number_from_signed!(i8, i16, i32, i64);
number_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::F32(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::F64(value)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::Decimal(value)
    }
}
