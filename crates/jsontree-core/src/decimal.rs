//! Fixed-point decimal with a 96-bit mantissa and a scale of 0..=28.
//!
//! This is the host "128-bit decimal" numeric type. Values are
//! `mantissa / 10^scale`; text parsing rounds half to even when the input
//! carries more precision than fits, and reports `Overflow` when the
//! integral magnitude does not fit.

use crate::error::{JsonError, Result};
use std::fmt;
use std::str::FromStr;

/// Largest representable scale (number of fractional digits).
pub const MAX_SCALE: u8 = 28;

const MAX_MANTISSA: i128 = (1i128 << 96) - 1;
const MAX_DIGITS: usize = 29;

/// A base-10 fixed-point number.
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    mantissa: i128,
    scale: u8,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };
    pub const MAX: Decimal = Decimal {
        mantissa: MAX_MANTISSA,
        scale: 0,
    };
    pub const MIN: Decimal = Decimal {
        mantissa: -MAX_MANTISSA,
        scale: 0,
    };

    /// Build a decimal from `mantissa / 10^scale`. Returns `None` when either
    /// part is out of range.
    pub fn new(mantissa: i128, scale: u32) -> Option<Decimal> {
        if scale > MAX_SCALE as u32 || mantissa.unsigned_abs() > MAX_MANTISSA as u128 {
            return None;
        }
        Some(Decimal {
            mantissa,
            scale: scale as u8,
        })
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale as u32
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Strip trailing fractional zeros: `1.500` becomes `1.5`.
    pub fn normalize(self) -> Decimal {
        let mut m = self.mantissa;
        let mut s = self.scale;
        while s > 0 && m % 10 == 0 {
            m /= 10;
            s -= 1;
        }
        Decimal {
            mantissa: m,
            scale: s,
        }
    }

    pub fn is_integral(&self) -> bool {
        self.mantissa % pow10(self.scale) == 0
    }

    /// Round to the nearest integer, ties to even.
    pub fn round_to_integer(&self) -> i128 {
        let divisor = pow10(self.scale);
        let quotient = self.mantissa / divisor;
        let remainder = (self.mantissa % divisor).abs();
        let twice = remainder * 2;
        if twice > divisor || (twice == divisor && quotient % 2 != 0) {
            quotient + self.mantissa.signum()
        } else {
            quotient
        }
    }

    /// Nearest `f64`, obtained by parsing the exact decimal text.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Convert a finite float through its shortest round-trip text.
    pub fn from_f64(value: f64) -> Result<Decimal> {
        if !value.is_finite() {
            return Err(JsonError::overflow(value, "decimal"));
        }
        format!("{value:e}")
            .parse()
            .map_err(|_| JsonError::overflow(value, "decimal"))
    }

    pub fn from_f32(value: f32) -> Result<Decimal> {
        if !value.is_finite() {
            return Err(JsonError::overflow(value, "decimal"));
        }
        format!("{value:e}")
            .parse()
            .map_err(|_| JsonError::overflow(value, "decimal"))
    }

    /// Parse `text` only when it is representable without rounding.
    pub(crate) fn parse_exact(text: &str) -> Option<Decimal> {
        let (negative, digits, exp10) = split_numeric_text(text).ok()?;
        let digits = trim_leading_zeros(digits);
        if digits.is_empty() {
            let scale = (-exp10).clamp(0, MAX_SCALE as i64) as u8;
            return Some(Decimal { mantissa: 0, scale });
        }
        // Trailing zeros beyond the scale limit carry no precision.
        let mut digits = digits;
        let mut exp10 = exp10;
        while exp10 < -(MAX_SCALE as i64) && digits.last() == Some(&0) {
            digits.pop();
            exp10 += 1;
        }
        if exp10 < -(MAX_SCALE as i64) {
            return None;
        }
        if exp10 > 0 {
            if digits.len() as i64 + exp10 > MAX_DIGITS as i64 {
                return None;
            }
            digits.extend(std::iter::repeat_n(0, exp10 as usize));
            exp10 = 0;
        }
        if digits.len() > MAX_DIGITS {
            return None;
        }
        let magnitude = digits_to_i128(&digits);
        if magnitude > MAX_MANTISSA {
            return None;
        }
        Some(Decimal {
            mantissa: if negative { -magnitude } else { magnitude },
            scale: (-exp10) as u8,
        })
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let a = self.normalize();
        let b = other.normalize();
        a.mantissa == b.mantissa && a.scale == b.scale
    }
}

impl Eq for Decimal {}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::ZERO
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if self.mantissa < 0 {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let split = padded.len() - scale;
        write!(f, "{}.{}", &padded[..split], &padded[split..])
    }
}

impl FromStr for Decimal {
    type Err = JsonError;

    /// Invariant-culture grammar: optional sign, digits with an optional
    /// fraction, optional exponent. Excess precision is rounded half to even.
    fn from_str(text: &str) -> Result<Decimal> {
        let (negative, digits, exp10) = split_numeric_text(text)?;
        let mut digits = trim_leading_zeros(digits);
        if digits.is_empty() {
            let scale = (-exp10).clamp(0, MAX_SCALE as i64) as u8;
            return Ok(Decimal { mantissa: 0, scale });
        }

        let mut exp10 = exp10;
        if exp10 > 0 {
            if digits.len() as i64 + exp10 > MAX_DIGITS as i64 {
                return Err(JsonError::overflow(text, "decimal"));
            }
            digits.extend(std::iter::repeat_n(0, exp10 as usize));
            exp10 = 0;
        }
        let mut scale = (-exp10) as u64;

        loop {
            let excess_scale = scale.saturating_sub(MAX_SCALE as u64);
            let excess_digits = digits.len().saturating_sub(MAX_DIGITS) as u64;
            let mut drop = excess_scale.max(excess_digits);
            if drop == 0 && digits_to_i128(&digits) > MAX_MANTISSA {
                drop = 1;
            }
            if drop == 0 {
                break;
            }
            if drop > scale {
                return Err(JsonError::overflow(text, "decimal"));
            }
            round_off(&mut digits, drop as usize);
            scale -= drop;
        }

        let magnitude = digits_to_i128(&digits);
        Ok(Decimal {
            mantissa: if negative { -magnitude } else { magnitude },
            scale: scale as u8,
        })
    }
}

macro_rules! decimal_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    Decimal {
                        mantissa: value as i128,
                        scale: 0,
                    }
                }
            }
        )*
    };
}

decimal_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Split numeric text into sign, significant digits and a power of ten.
fn split_numeric_text(text: &str) -> Result<(bool, Vec<u8>, i64)> {
    let bad = || JsonError::format(format!("\"{text}\" is not a valid number"));
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut negative = false;
    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            negative = sign == b'-';
            i = 1;
        }
    }

    let mut digits = Vec::with_capacity(bytes.len());
    let mut frac_len: i64 = 0;
    let mut seen_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        digits.push(bytes[i] - b'0');
        seen_digit = true;
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            digits.push(bytes[i] - b'0');
            frac_len += 1;
            seen_digit = true;
            i += 1;
        }
    }
    if !seen_digit {
        return Err(bad());
    }

    let mut exponent: i64 = 0;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        let mut exp_negative = false;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            exp_negative = bytes[i] == b'-';
            i += 1;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            // Saturate; anything this large over- or underflows regardless.
            exponent = (exponent * 10 + (bytes[i] - b'0') as i64).min(1_000_000);
            i += 1;
        }
        if start == i {
            return Err(bad());
        }
        if exp_negative {
            exponent = -exponent;
        }
    }
    if i != bytes.len() {
        return Err(bad());
    }
    Ok((negative, digits, exponent - frac_len))
}

fn trim_leading_zeros(digits: Vec<u8>) -> Vec<u8> {
    let first = digits.iter().position(|&d| d != 0).unwrap_or(digits.len());
    digits[first..].to_vec()
}

/// Remove the last `count` digits, rounding half to even.
fn round_off(digits: &mut Vec<u8>, count: usize) {
    if count > digits.len() {
        digits.clear();
        return;
    }
    let keep = digits.len() - count;
    let first_dropped = digits[keep];
    let rest_nonzero = digits[keep + 1..].iter().any(|&d| d != 0);
    digits.truncate(keep);
    let last_odd = digits.last().is_some_and(|d| d % 2 == 1);
    let round_up = first_dropped > 5 || (first_dropped == 5 && (rest_nonzero || last_odd));
    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }
}

fn digits_to_i128(digits: &[u8]) -> i128 {
    digits
        .iter()
        .fold(0i128, |acc, &d| {
            acc.saturating_mul(10).saturating_add(d as i128)
        })
}

fn pow10(scale: u8) -> i128 {
    10i128.pow(scale as u32)
}
